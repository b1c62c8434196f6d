pub mod api;
pub mod citations;
pub mod engine;
pub mod index;

pub use api::{read_entries, LogEntry};
pub use citations::CitationStore;
pub use engine::VerdictLog;
pub use index::{DetectionHistory, SessionSummary};
