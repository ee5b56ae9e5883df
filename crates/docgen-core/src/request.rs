use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key holding the caller's raw source text.
pub const INPUT_KEY: &str = "input";

/// Per-call input mapping. Normally holds a single `input` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request {
    fields: BTreeMap<String, String>,
}

impl Request {
    pub fn new(input: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(INPUT_KEY.to_string(), input.into());
        Self { fields }
    }

    pub fn input(&self) -> Option<&str> {
        self.get(INPUT_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Copy of this request with `input` replaced. Used when a policy rule
    /// rewrites the caller's text.
    pub fn with_input(&self, input: impl Into<String>) -> Self {
        self.clone().with_field(INPUT_KEY, input)
    }
}
