pub mod claim;
pub mod common;
pub mod output;
pub mod verdict;
pub mod verify;

pub use claim::Claim;
pub use common::{Id, IsoDateTime};
pub use output::{AlertGate, DEFAULT_ALERT_THRESHOLD};
pub use verdict::{clamp_unit, Citation, CitationRecord, Verdict};
pub use verify::{AnalysisMethod, VerdictLabel};
