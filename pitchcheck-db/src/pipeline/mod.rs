pub mod checker;
pub mod extract;
pub mod fallback;
pub mod llm_verifier;
pub mod mock;
pub mod openai;
pub mod parse;
pub mod search;
pub mod traits;
pub mod worker;

pub use checker::{FactChecker, DEFAULT_VERIFY_TIMEOUT};
pub use extract::KeywordExtractor;
pub use fallback::PatternVerifier;
pub use llm_verifier::LlmVerifier;
pub use mock::{FailingChat, ScriptedChat, StalledChat};
pub use openai::OpenAiChat;
pub use search::SearchChat;
pub use traits::{ChatModel, ChatReply, ClaimVerifier};
pub use worker::{SessionConfig, SessionHandle, SessionMessage, SessionWorker};
