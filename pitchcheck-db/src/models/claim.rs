use crate::models::IsoDateTime;
use serde::{Deserialize, Serialize};

/// A short statement lifted from a pitch transcript or submitted directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub submitted_at: IsoDateTime,
}

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            submitted_at: IsoDateTime::now(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.trim().is_empty() {
            None
        } else {
            Some(context)
        };
        self
    }

    pub fn context_str(&self) -> &str {
        self.context.as_deref().unwrap_or("")
    }
}
