//! Projection of the form state into displayable panels.
//!
//! Two panels mirror the web form: "LLM Final Response" (the answer) and
//! "Debug Details" (one section per `_debug` entry, the Mongo filter first).
//! Front-ends decide how to style them; [`ResultView`]'s `Display` is plain
//! text.

use std::fmt;

use serde_json::{Map, Value};
use sherpa_client::FormState;

use crate::normalize::{display_value, normalize_fragment};

pub const RESULT_PANEL_TITLE: &str = "LLM Final Response";
pub const ANSWER_SECTION_TITLE: &str = "LLM Answer";
pub const DEBUG_PANEL_TITLE: &str = "Debug Details";
pub const MONGO_SECTION_TITLE: &str = "Mongo Query";

/// Debug key whose `content` goes through [`normalize_fragment`].
pub const MONGO_FILTER_KEY: &str = "mongo_filter";

/// One titled block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A titled group of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

/// Everything the form displays below the submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    /// Error text, verbatim.
    pub error: Option<String>,
    /// Answer panel; present whenever the result is truthy.
    pub result: Option<Panel>,
    /// `context_docs_count` reported by the backend, when it is a number.
    pub context_docs: Option<u64>,
    /// Debug panel; present when the result carries a truthy `_debug`.
    pub debug: Option<Panel>,
}

impl ResultView {
    /// Builds the view from a raw result and/or error.
    pub fn build(result: Option<&Value>, error: Option<&str>) -> Self {
        let error = error.filter(|e| !e.is_empty()).map(str::to_string);

        let Some(result) = result.filter(|r| is_truthy(r)) else {
            return Self {
                error,
                ..Self::default()
            };
        };

        let mut sections = Vec::new();
        if let Some(answer) = result.get("llm_answer").filter(|a| is_truthy(a)) {
            sections.push(Section::new(ANSWER_SECTION_TITLE, render_answer(answer)));
        }

        let debug = result
            .get("_debug")
            .filter(|d| is_truthy(d))
            .map(|d| Panel {
                title: DEBUG_PANEL_TITLE,
                sections: render_debug(d),
            });

        Self {
            error,
            result: Some(Panel {
                title: RESULT_PANEL_TITLE,
                sections,
            }),
            context_docs: result.get("context_docs_count").and_then(Value::as_u64),
            debug,
        }
    }

    /// Builds the view from the controller's state.
    pub fn from_state(state: &FormState) -> Self {
        Self::build(state.result.as_ref(), state.error.as_deref())
    }

    /// Nothing to show.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.result.is_none() && self.debug.is_none()
    }

    /// Panels in display order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.result.iter().chain(self.debug.iter())
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.error {
            writeln!(f, "{err}")?;
        }
        for panel in self.panels() {
            writeln!(f, "{}", panel.title)?;
            for s in &panel.sections {
                writeln!(f, "--- {} ---", s.title)?;
                writeln!(f, "{}", s.body)?;
            }
        }
        Ok(())
    }
}

/// Text of the `llm_answer` field.
///
/// - object with `content` that is an array: elements joined by a blank line,
///   strings as-is and everything else as indented JSON
/// - object with any other `content`: that value, string as-is else JSON
/// - anything else: the answer itself, string as-is else JSON
pub fn render_answer(answer: &Value) -> String {
    match answer {
        Value::Object(map) if map.contains_key("content") => match &map["content"] {
            Value::Array(parts) => parts
                .iter()
                .map(display_value)
                .collect::<Vec<_>>()
                .join("\n\n"),
            content => display_value(content),
        },
        other => display_value(other),
    }
}

/// Sections of the `_debug` mapping.
///
/// The Mongo filter comes first (only when its `content` is truthy) and is
/// normalized; every other key becomes a section titled with underscores
/// replaced by spaces. A non-object `_debug` yields no sections.
pub fn render_debug(debug: &Value) -> Vec<Section> {
    let Value::Object(entries) = debug else {
        return Vec::new();
    };

    let mut sections = Vec::with_capacity(entries.len());
    if let Some(content) = mongo_filter_content(entries) {
        sections.push(Section::new(MONGO_SECTION_TITLE, normalize_fragment(content)));
    }

    for (key, value) in entries {
        if key == MONGO_FILTER_KEY {
            continue;
        }
        sections.push(Section::new(key.replace('_', " "), display_value(value)));
    }
    sections
}

fn mongo_filter_content(entries: &Map<String, Value>) -> Option<&Value> {
    entries
        .get(MONGO_FILTER_KEY)
        .filter(|m| is_truthy(m))
        .and_then(|m| m.get("content"))
        .filter(|c| is_truthy(c))
}

/// JavaScript-style truthiness, which decides what the form shows.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
