//! Syntax diagnostics built on `serde_json` parse errors.

use jsoncmp_types::JsonValue;
use serde::Serialize;
use serde_json::error::Category;

/// Broad class of a parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxCategory {
    /// Malformed JSON text.
    Syntax,
    /// The input ended before the document was complete.
    Eof,
    /// Well-formed text with semantically invalid content (e.g. a number
    /// out of range).
    Data,
}

/// A located parse failure with a fix suggestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
    /// The parser's message without its location suffix.
    pub message: String,
    pub category: SyntaxCategory,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// The text of the offending line, if it exists.
    pub source_line: Option<String>,
    pub suggestion: String,
}

/// Parse `text`, returning the value or a located diagnostic.
pub fn check_syntax(text: &str) -> Result<JsonValue, SyntaxIssue> {
    serde_json::from_str(text).map_err(|e| {
        let category = match e.classify() {
            Category::Eof => SyntaxCategory::Eof,
            Category::Data => SyntaxCategory::Data,
            Category::Syntax | Category::Io => SyntaxCategory::Syntax,
        };
        let full = e.to_string();
        let location = format!(" at line {} column {}", e.line(), e.column());
        let message = full.strip_suffix(&location).unwrap_or(&full).to_string();
        let source_line = e
            .line()
            .checked_sub(1)
            .and_then(|i| text.lines().nth(i))
            .map(str::to_string);
        SyntaxIssue {
            suggestion: suggestion_for(&message, category).to_string(),
            message,
            category,
            line: e.line(),
            column: e.column(),
            source_line,
        }
    })
}

fn suggestion_for(message: &str, category: SyntaxCategory) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("trailing comma") {
        "Remove the extra comma(,) before the closing bracket or brace."
    } else if category == SyntaxCategory::Eof {
        "The JSON appears to be incomplete. Check for missing closing brackets, braces, or quotes."
    } else if lower.contains("key must be a string") {
        "Check for missing quotes around property names. Every key must be a double-quoted string."
    } else if lower.contains("expected `:`") {
        "Check for a missing colon(:) between a property name and its value."
    } else if lower.contains("expected `,` or") {
        "Check for a missing comma(,) between values or properties."
    } else if lower.contains("number") {
        "Check for invalid number format or missing quotes around string values."
    } else if lower.contains("control character") || lower.contains("escape") {
        "Check string contents: control characters and backslashes must be escaped."
    } else if lower.contains("expected value") || lower.contains("expected ident") {
        "Check for missing quotes around string values or an unexpected character."
    } else if lower.contains("trailing characters") {
        "Remove the content after the end of the JSON document."
    } else {
        "Review the JSON syntax around the indicated position. Common issues include missing commas, extra commas, or unclosed brackets/braces."
    }
}
