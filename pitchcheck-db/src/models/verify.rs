use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    True,
    False,
    Misleading,
    Unverifiable,
}

impl VerdictLabel {
    /// Lenient parse of a model-reported label. Anything unknown, including
    /// `REQUIRES_VERIFICATION`, lands on `Unverifiable`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "TRUE" => VerdictLabel::True,
            "FALSE" => VerdictLabel::False,
            "MISLEADING" => VerdictLabel::Misleading,
            _ => VerdictLabel::Unverifiable,
        }
    }

    pub fn leans_false(self) -> bool {
        matches!(self, VerdictLabel::False | VerdictLabel::Misleading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLabel::True => "TRUE",
            VerdictLabel::False => "FALSE",
            VerdictLabel::Misleading => "MISLEADING",
            VerdictLabel::Unverifiable => "UNVERIFIABLE",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which code path produced a verdict.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    LlmJson,
    LlmText,
    LocalFallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lenient_maps_unknown_to_unverifiable() {
        assert_eq!(VerdictLabel::parse_lenient(" false "), VerdictLabel::False);
        assert_eq!(VerdictLabel::parse_lenient("Misleading"), VerdictLabel::Misleading);
        assert_eq!(
            VerdictLabel::parse_lenient("REQUIRES_VERIFICATION"),
            VerdictLabel::Unverifiable
        );
        assert_eq!(VerdictLabel::parse_lenient(""), VerdictLabel::Unverifiable);
    }

    #[test]
    fn labels_serialize_screaming() {
        let json = serde_json::to_string(&VerdictLabel::Unverifiable).unwrap();
        assert_eq!(json, "\"UNVERIFIABLE\"");
        let json = serde_json::to_string(&AnalysisMethod::LocalFallback).unwrap();
        assert_eq!(json, "\"local_fallback\"");
    }
}
