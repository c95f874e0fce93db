//! Best-effort extraction of a start/destination pair from generative model output.
//!
//! The model is only prompted to answer with a JSON object, nothing enforces it.
//! Each strategy either yields a [`LocationPair`] or gives up, and the first
//! success wins. When every strategy gives up the text is treated as containing
//! no locations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub has_locations: bool,
}

impl LocationPair {
    pub fn absent() -> Self {
        LocationPair::default()
    }

    /// Start and end, only when the model flagged locations and named both.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        if !self.has_locations {
            return None;
        }

        match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
                Some((start, end))
            }
            _ => None,
        }
    }
}

type ExtractionStrategy = fn(&str) -> Option<LocationPair>;

const STRATEGIES: [(&str, ExtractionStrategy); 2] =
    [("strict", parse_strict), ("relaxed", parse_relaxed)];

pub fn extract_locations(text: &str) -> LocationPair {
    for (name, strategy) in STRATEGIES {
        if let Some(pair) = strategy(text) {
            debug!("Locations extracted with {} strategy", name);
            return pair;
        }
    }

    debug!("No locations found in model output: {:?}", text);
    LocationPair::absent()
}

fn parse_strict(text: &str) -> Option<LocationPair> {
    parse_object(text.trim())
}

fn parse_relaxed(text: &str) -> Option<LocationPair> {
    let candidate = outermost_object(strip_code_fence(text.trim()))?;

    parse_object(candidate).or_else(|| parse_object(&python_literal_to_json(candidate)))
}

fn parse_object(text: &str) -> Option<LocationPair> {
    let value: Value = serde_json::from_str(text).ok()?;
    if !value.is_object() {
        return None;
    }

    serde_json::from_value(value).ok()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    // Language tag such as ```json
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}

/// Rewrites Python dict literal spelling into JSON: single quoted strings,
/// `True`/`False`/`None` and trailing commas.
fn python_literal_to_json(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                output.push('"');
                while let Some(c) = chars.next() {
                    output.push(c);
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                output.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '\'' => {
                output.push('"');
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some('\'') => output.push('\''),
                            Some(escaped) => {
                                output.push('\\');
                                output.push(escaped);
                            }
                            None => {}
                        },
                        '"' => output.push_str("\\\""),
                        '\'' => break,
                        c => output.push(c),
                    }
                }
                output.push('"');
            }
            ',' => {
                let mut lookahead = chars.clone();
                while lookahead.next_if(|c| c.is_whitespace()).is_some() {}
                if !matches!(lookahead.peek(), Some('}') | Some(']')) {
                    output.push(',');
                }
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(c) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
                    word.push(c);
                }
                output.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            c => output.push(c),
        }
    }

    output
}
