use serde::{Deserialize, Serialize};
use std::fmt;

const PREVIEW_LEN: usize = 30;

/// One adversarial input value. Owned by exactly one probe, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    value: String,
}

impl Payload {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Truncated form for report detail lines.
    pub fn preview(&self) -> String {
        if self.value.chars().count() <= PREVIEW_LEN {
            self.value.clone()
        } else {
            let head: String = self.value.chars().take(PREVIEW_LEN).collect();
            format!("{}...", head)
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
