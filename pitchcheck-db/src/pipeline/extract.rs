//! Keyword heuristic that picks claim-like sentences out of transcript text.

pub const MIN_CLAIM_LEN: usize = 20;

const CLAIM_TRIGGERS: &[&str] = &[
    "we have",
    "we are",
    "we've",
    "our",
    "achieved",
    "reached",
    "secured",
    "partnered",
    "revenue",
    "customers",
    "users",
    "accuracy",
    "faster than",
    "better than",
    "more than",
    "%",
    "$",
    "million",
    "billion",
];

#[derive(Clone, Copy, Debug)]
pub struct KeywordExtractor {
    pub min_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            min_len: MIN_CLAIM_LEN,
        }
    }
}

impl KeywordExtractor {
    /// Sentences that look like factual claims, in source order. The iterator
    /// borrows `text`, so calling again restarts the scan.
    pub fn claims<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min_len = self.min_len;
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(move |s| s.chars().count() >= min_len)
            .filter(|s| is_claim_like(s))
    }
}

pub fn is_claim_like(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    CLAIM_TRIGGERS.iter().any(|t| lower.contains(t))
}
