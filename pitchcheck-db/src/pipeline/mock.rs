use crate::models::Citation;
use crate::pipeline::traits::{ChatModel, ChatReply};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Replies with the same canned content on every call.
pub struct ScriptedChat {
    reply: ChatReply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedChat {
    pub fn new(content: &str) -> Self {
        Self {
            reply: ChatReply {
                content: content.to_string(),
                citations: Vec::new(),
            },
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.reply.citations = citations;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The user prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, _system: &str, user: &str) -> anyhow::Result<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(user.to_string());
        }
        Ok(self.reply.clone())
    }
}

/// Always fails, like an unreachable or unauthorized endpoint.
pub struct FailingChat;

#[async_trait]
impl ChatModel for FailingChat {
    async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<ChatReply> {
        anyhow::bail!("remote model unavailable")
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledChat(pub Duration);

#[async_trait]
impl ChatModel for StalledChat {
    async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<ChatReply> {
        tokio::time::sleep(self.0).await;
        Ok(ChatReply::default())
    }
}
