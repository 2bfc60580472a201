//! Interactive question prompt

use std::io::BufRead;
use std::io::Write;

use crate::Result;

pub const QUESTION_PROMPT: &str = "Enter your question: ";

/// Write the prompt, then read one line.
///
/// Only the trailing line terminator is removed; end of input gives an empty
/// question.
pub fn read_question<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<String> {
    write!(writer, "{QUESTION_PROMPT}")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Prompt on stdout and read from stdin
pub fn prompt_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    read_question(&mut stdin.lock(), &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn ask(input: &str) -> (String, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let question = read_question(&mut reader, &mut out).unwrap();
        (question, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prompt_written() {
        let (_, out) = ask("hi\n");
        assert_eq!(out, QUESTION_PROMPT);
    }

    #[test]
    fn test_only_line_terminator_stripped() {
        assert_eq!(ask("  padded question?  \n").0, "  padded question?  ");
        assert_eq!(ask("windows line\r\n").0, "windows line");
        assert_eq!(ask("no newline").0, "no newline");
    }

    #[test]
    fn test_only_first_line_read() {
        assert_eq!(ask("first\nsecond\n").0, "first");
    }

    #[test]
    fn test_eof_gives_empty_question() {
        assert_eq!(ask("").0, "");
    }
}
