//! CLI output formatting utilities

use crate::models::Answer;

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

/// Print the answer, or the fixed not-found message
pub fn print_answer(answer: &Answer) {
    println!("{answer}");
}
