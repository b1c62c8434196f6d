//! Chat completion against a search-enabled model. The request carries
//! `web_search_options` and the reply's `url_citation` annotations are kept.

use crate::models::Citation;
use crate::pipeline::traits::{ChatModel, ChatReply};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

pub struct SearchChat {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    search_context_size: String,
}

impl SearchChat {
    pub fn new(
        api_key: &str,
        api_base: Option<&str>,
        model: &str,
        search_context_size: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pitchcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building search http client")?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_base: api_base
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
            search_context_size: search_context_size.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Deserialize)]
struct Annotation {
    #[serde(rename = "type")]
    kind: String,
    url_citation: Option<UrlCitation>,
}

#[derive(Deserialize)]
struct UrlCitation {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    start_index: usize,
    #[serde(default)]
    end_index: usize,
}

/// Characters `[start, end)` of `text`; out-of-range spans are cut short.
fn char_span(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

fn collect_citations(content: &str, annotations: Vec<Annotation>) -> Vec<Citation> {
    annotations
        .into_iter()
        .filter(|a| a.kind == "url_citation")
        .filter_map(|a| a.url_citation)
        .map(|c| Citation {
            used_at: char_span(content, c.start_index, c.end_index),
            url: c.url,
            title: c.title,
        })
        .collect()
}

#[async_trait]
impl ChatModel for SearchChat {
    async fn complete(&self, system: &str, user: &str) -> Result<ChatReply> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "web_search_options": { "search_context_size": self.search_context_size },
            "max_tokens": 1000,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<CompletionResponse>()
            .await?;

        let message = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .context("search response has no choices")?;
        let content = message.content.context("search response missing content")?;
        let citations = collect_citations(&content, message.annotations);

        Ok(ChatReply { content, citations })
    }
}
