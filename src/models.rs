use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Message printed when retrieval comes back empty
pub const NOT_FOUND_MESSAGE: &str = "No relevant document found.";

/// A stored passage and its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// Result of a nearest-neighbour lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub content: String,
    /// Distance as reported by the backend for the configured metric
    pub distance: f64,
}

/// The user's question and its embedding
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub question: String,
    pub embedding: Vec<f32>,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The model answered using `context` as its only source
    Generated { context: String, text: String },
    /// Storage returned nothing; the model was not called
    NotFound,
}

impl Answer {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    /// Retrieved passage the answer was based on, if any
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Generated { context, .. } => Some(context),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { text, .. } => f.write_str(text),
            Self::NotFound => f.write_str(NOT_FOUND_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_display() {
        let answer = Answer::Generated {
            context: "ctx".to_string(),
            text: "The club meets on Thursdays.".to_string(),
        };
        assert_eq!(answer.to_string(), "The club meets on Thursdays.");
        assert_eq!(answer.context(), Some("ctx"));
        assert!(answer.is_found());

        assert_eq!(Answer::NotFound.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(Answer::NotFound.context(), None);
    }
}
