//! Prompt templates for RAG queries

use std::collections::HashMap;

/// System message sent ahead of every question
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer the user's question using only the provided context.";

const CONTEXT_QA: &str = r"Context:
{{context}}

Question: {{question}}

Answer the question based on the context above. If the context does not contain the answer, say that you don't know.";

/// Template with `{{name}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Built-in question-answering template
    #[must_use]
    pub fn context_qa() -> Self {
        Self::new(CONTEXT_QA)
    }

    /// Fill in the template with variables
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, &str>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var.as_str()) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Render the user message for a retrieved passage and a question
    #[must_use]
    pub fn render_qa(&self, context: &str, question: &str) -> String {
        let values = HashMap::from([("context", context), ("question", question)]);
        self.render(&values)
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::context_qa()
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                chars.next();
                if ch == '}' {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                    }
                    break;
                }
                var_name.push(ch);
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_variables() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{age}} years old.");
        assert_eq!(template.variables(), &["name", "age"]);
    }

    #[test]
    fn test_context_qa_variables() {
        assert_eq!(
            PromptTemplate::context_qa().variables(),
            &["context", "question"]
        );
    }

    #[test]
    fn test_render_qa_keeps_text_verbatim() {
        let template = PromptTemplate::context_qa();
        let question = "  When does the chess club meet?  ";
        let rendered = template.render_qa("The club meets on Thursdays.", question);

        assert!(rendered.contains("The club meets on Thursdays."));
        assert!(rendered.contains(question));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_unknown_variables_left_in_place() {
        let template = PromptTemplate::new("{{context}} / {{extra}}");
        let rendered = template.render_qa("ctx", "q");
        assert_eq!(rendered, "ctx / {{extra}}");
    }
}
