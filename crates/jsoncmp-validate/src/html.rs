//! Tag-balance checks for HTML fragments stored in string values.

use std::fmt;
use std::sync::LazyLock;

use jsoncmp_types::{JsonPath, JsonValue};
use regex::Regex;
use serde::Serialize;

/// Opening, closing, or self-closing tag. Attributes are skipped.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/)?([A-Za-z][A-Za-z0-9-]*)(?:\s[^<>]*?)?(/)?>").expect("tag pattern compiles")
});

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// What is wrong with a fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum HtmlProblem {
    /// A tag opened and never closed.
    Unclosed { tag: String },
    /// A closing tag with no matching opening tag.
    UnexpectedClose { tag: String },
    /// A closing tag that skips over a still-open inner tag.
    Mismatched { expected: String, found: String },
}

impl fmt::Display for HtmlProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclosed { tag } => write!(f, "unclosed <{tag}> tag"),
            Self::UnexpectedClose { tag } => write!(f, "unexpected closing </{tag}> tag"),
            Self::Mismatched { expected, found } => {
                write!(f, "found </{found}> while <{expected}> is still open")
            }
        }
    }
}

/// A malformed fragment and where it lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HtmlIssue {
    pub path: JsonPath,
    #[serde(flatten)]
    pub problem: HtmlProblem,
}

/// Check the tag balance of a single fragment.
pub fn check_fragment(text: &str) -> Vec<HtmlProblem> {
    let mut problems = Vec::new();
    let mut open: Vec<String> = Vec::new();

    for caps in TAG.captures_iter(text) {
        let name = caps[2].to_ascii_lowercase();
        let closing = caps.get(1).is_some();
        let self_closing = caps.get(3).is_some();
        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            continue;
        }
        if !closing {
            open.push(name);
            continue;
        }
        match open.iter().rposition(|t| *t == name) {
            Some(pos) if pos + 1 == open.len() => {
                open.pop();
            }
            Some(pos) => {
                let expected = open[open.len() - 1].clone();
                problems.push(HtmlProblem::Mismatched {
                    expected,
                    found: name,
                });
                open.truncate(pos);
            }
            None => problems.push(HtmlProblem::UnexpectedClose { tag: name }),
        }
    }

    problems.extend(open.into_iter().rev().map(|tag| HtmlProblem::Unclosed { tag }));
    problems
}

/// Check every string value in `value` that contains markup.
pub fn check_html(value: &JsonValue) -> Vec<HtmlIssue> {
    let mut issues = Vec::new();
    let mut path = JsonPath::root();
    walk(value, &mut path, &mut issues);
    issues
}

fn walk(value: &JsonValue, path: &mut JsonPath, issues: &mut Vec<HtmlIssue>) {
    match value {
        JsonValue::String(s) if s.contains('<') => {
            for problem in check_fragment(s) {
                issues.push(HtmlIssue {
                    path: path.clone(),
                    problem,
                });
            }
        }
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index);
                walk(item, path, issues);
                path.pop();
            }
        }
        JsonValue::Object(map) => {
            for (key, child) in map {
                path.push(key.as_str());
                walk(child, path, issues);
                path.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn balanced_fragment_is_clean() {
        assert!(check_fragment("<div><span>Properly closed</span></div>").is_empty());
        assert!(check_fragment(r#"<a href="/x/y">link</a>"#).is_empty());
    }

    #[test]
    fn void_and_self_closing_tags_are_exempt() {
        assert!(check_fragment("line<br>next<BR/><img src=\"a.png\" />").is_empty());
        assert!(check_fragment("<custom-widget/>").is_empty());
    }

    #[test]
    fn unclosed_tags_reported_innermost_first() {
        assert_eq!(
            check_fragment("<div><p>Unclosed paragraph"),
            vec![
                HtmlProblem::Unclosed { tag: "p".into() },
                HtmlProblem::Unclosed { tag: "div".into() },
            ]
        );
    }

    #[test]
    fn stray_closing_tag() {
        assert_eq!(
            check_fragment("text</b>"),
            vec![HtmlProblem::UnexpectedClose { tag: "b".into() }]
        );
    }

    #[test]
    fn crossed_tags_are_mismatched() {
        assert_eq!(
            check_fragment("<b><i>x</b></i>"),
            vec![
                HtmlProblem::Mismatched {
                    expected: "i".into(),
                    found: "b".into()
                },
                HtmlProblem::UnexpectedClose { tag: "i".into() },
            ]
        );
    }

    #[test]
    fn comparisons_are_not_tags() {
        assert!(check_fragment("a < b and c > d").is_empty());
    }

    #[test]
    fn tag_names_are_case_insensitive() {
        assert!(check_fragment("<DIV>x</div>").is_empty());
    }

    #[test]
    fn issues_carry_json_path() {
        let value = json!({
            "content": "<div><p>Unclosed paragraph",
            "valid": "<div><p>Valid HTML</p></div>",
            "list": ["plain", "<em>oops"]
        });
        let issues = check_html(&value);
        let located: Vec<_> = issues
            .iter()
            .map(|i| format!("{}: {}", i.path, i.problem))
            .collect();
        assert_eq!(
            located,
            vec![
                "content: unclosed <p> tag",
                "content: unclosed <div> tag",
                "list.1: unclosed <em> tag",
            ]
        );
    }
}
