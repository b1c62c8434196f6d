use crate::models::{Citation, Verdict};
use async_trait::async_trait;

/// Raw reply from a remote chat model.
#[derive(Clone, Debug, Default)]
pub struct ChatReply {
    pub content: String,
    pub citations: Vec<Citation>,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<ChatReply>;
}

#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Judge one claim. An `Err` means the remote path failed and the caller
    /// should degrade to the local fallback.
    async fn verify(&self, claim: &str, context: &str) -> anyhow::Result<Verdict>;
}
