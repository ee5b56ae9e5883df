use std::fmt;

use serde::Serialize;

/// How a [`Response`] was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Disposition {
    Generated,
    InputRefused { rule: String },
    OutputRefused { rule: String },
}

/// Final text returned to the caller: generated documentation or a refusal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub text: String,
    pub disposition: Disposition,
}

impl Response {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disposition: Disposition::Generated,
        }
    }

    pub fn input_refused(text: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disposition: Disposition::InputRefused { rule: rule.into() },
        }
    }

    pub fn output_refused(text: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disposition: Disposition::OutputRefused { rule: rule.into() },
        }
    }

    pub fn is_refusal(&self) -> bool {
        !matches!(self.disposition, Disposition::Generated)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
