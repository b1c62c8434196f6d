use crate::models::AlertGate;
use crate::pipeline::{
    ChatModel, ClaimVerifier, FactChecker, LlmVerifier, OpenAiChat, SearchChat, SessionConfig,
    DEFAULT_VERIFY_TIMEOUT,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub web_search: bool,
    pub search_model: String,
    pub search_context_size: String,
    pub addr: String,
    pub alert_threshold: f32,
    pub verify_timeout: Duration,
    pub buffer_size: usize,
    pub context_chars: usize,
    pub log_file: PathBuf,
    pub citations_file: PathBuf,
    pub webhook_secret: Option<String>,
}

/// Rejects empty keys and the `sk-...` placeholders left in sample env files.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_or = |key: &str, default: f64| {
            get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(default)
        };
        let usize_or = |key: &str, default: usize| {
            get(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(default)
        };

        Self {
            api_key: get("OPENAI_API_KEY").filter(|k| valid_api_key(k)),
            api_base: get("OPENAI_API_BASE"),
            model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            web_search: get("PITCHCHECK_WEB_SEARCH")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
            search_model: get("OPENAI_SEARCH_MODEL")
                .unwrap_or_else(|| "gpt-4o-search-preview".to_string()),
            search_context_size: get("SEARCH_CONTEXT_SIZE")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| matches!(v.as_str(), "low" | "medium" | "high"))
                .unwrap_or_else(|| "medium".to_string()),
            addr: get("PITCHCHECK_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            alert_threshold: parse_or("PITCHCHECK_ALERT_THRESHOLD", 0.7) as f32,
            verify_timeout: get("PITCHCHECK_VERIFY_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .unwrap_or(DEFAULT_VERIFY_TIMEOUT),
            buffer_size: usize_or("PITCHCHECK_BUFFER_SIZE", 300),
            context_chars: usize_or("PITCHCHECK_CONTEXT_CHARS", 200),
            log_file: get("PITCHCHECK_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("bullshit_detections.log")),
            citations_file: get("PITCHCHECK_CITATIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("fact_check_citations.json")),
            webhook_secret: get("VAPI_WEBHOOK_SECRET"),
        }
    }

    pub fn gate(&self) -> AlertGate {
        AlertGate::new(self.alert_threshold)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            buffer_size: self.buffer_size,
            context_chars: self.context_chars,
            gate: self.gate(),
        }
    }

    /// Build the verification pipeline. Without a usable key only the
    /// pattern table is wired in.
    pub fn fact_checker(&self) -> anyhow::Result<FactChecker> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(FactChecker::new(None, self.verify_timeout));
        };
        let chat: Arc<dyn ChatModel> = if self.web_search {
            Arc::new(SearchChat::new(
                key,
                self.api_base.as_deref(),
                &self.search_model,
                &self.search_context_size,
            )?)
        } else {
            Arc::new(OpenAiChat::new(key, self.api_base.as_deref(), &self.model))
        };
        let remote: Arc<dyn ClaimVerifier> = Arc::new(LlmVerifier::new(chat));
        Ok(FactChecker::new(Some(remote), self.verify_timeout))
    }
}
