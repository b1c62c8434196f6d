use crate::db::{CitationStore, DetectionHistory, SessionSummary, VerdictLog};
use crate::models::{AlertGate, AnalysisMethod, Claim, Verdict, VerdictLabel};
use crate::pipeline::checker::FactChecker;
use crate::pipeline::extract::KeywordExtractor;
use crate::pipeline::parse::truncate_chars;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub const DEFAULT_BUFFER_SIZE: usize = 300;
pub const DEFAULT_CONTEXT_CHARS: usize = 200;

#[derive(Debug)]
pub enum SessionMessage {
    /// A raw transcript chunk for the streaming path.
    Transcript(String),
    /// A verdict produced elsewhere that still belongs in the session record.
    Analyzed { text: String, verdict: Verdict },
}

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub buffer_size: usize,
    pub context_chars: usize,
    pub gate: AlertGate,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            context_chars: DEFAULT_CONTEXT_CHARS,
            gate: AlertGate::default(),
        }
    }
}

/// Producer side of the session queue. Cheap to clone; sending never blocks.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionMessage>,
    detections: Arc<AtomicUsize>,
    started_at: Instant,
}

impl SessionHandle {
    /// Queue a transcript chunk. Returns false once the worker has stopped.
    pub fn submit_transcript(&self, chunk: impl Into<String>) -> bool {
        self.tx.send(SessionMessage::Transcript(chunk.into())).is_ok()
    }

    pub fn record(&self, text: impl Into<String>, verdict: Verdict) -> bool {
        self.tx
            .send(SessionMessage::Analyzed {
                text: text.into(),
                verdict,
            })
            .is_ok()
    }

    pub fn detections(&self) -> usize {
        self.detections.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Single consumer of the session queue. Owns every piece of per-session state,
/// so nothing it touches needs a lock.
pub struct SessionWorker {
    checker: FactChecker,
    extractor: KeywordExtractor,
    config: SessionConfig,
    buffer: String,
    history: DetectionHistory,
    log: Option<VerdictLog>,
    citations: CitationStore,
    alerts: usize,
    detections: Arc<AtomicUsize>,
    rx: mpsc::UnboundedReceiver<SessionMessage>,
}

impl SessionWorker {
    pub fn new(
        checker: FactChecker,
        config: SessionConfig,
        log: Option<VerdictLog>,
        citations: CitationStore,
    ) -> (SessionHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let detections = Arc::new(AtomicUsize::new(0));
        let handle = SessionHandle {
            tx,
            detections: Arc::clone(&detections),
            started_at: Instant::now(),
        };
        let worker = Self {
            checker,
            extractor: KeywordExtractor::default(),
            config,
            buffer: String::new(),
            history: DetectionHistory::default(),
            log,
            citations,
            alerts: 0,
            detections,
            rx,
        };
        (handle, worker)
    }

    /// Drain the queue until every handle is dropped, then flush what is left
    /// and return the session summary.
    pub async fn run(mut self) -> SessionSummary {
        info!("session worker started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                SessionMessage::Transcript(chunk) => self.on_transcript(&chunk).await,
                SessionMessage::Analyzed { text, verdict } => self.record(&text, verdict),
            }
        }

        info!("session queue closed, flushing");
        if !self.buffer.trim().is_empty() {
            self.process_buffer().await;
        }
        if let Err(e) = self.citations.save() {
            error!(
                "failed to write citations to {}: {e:#}",
                self.citations.path().display()
            );
        }

        let summary = self
            .history
            .summary(&self.config.gate, self.citations.records().len());
        log_summary(&summary, &self.citations);
        summary
    }

    async fn on_transcript(&mut self, chunk: &str) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return;
        }
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(chunk);

        if self.buffer.chars().count() > self.config.buffer_size {
            self.process_buffer().await;
        }
    }

    async fn process_buffer(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        debug!("processing buffer: {}", truncate_chars(&buffer, 100));

        let context: String = buffer.chars().take(self.config.context_chars).collect();
        let claims: Vec<Claim> = self
            .extractor
            .claims(&buffer)
            .map(|text| Claim::new(text).with_context(context.as_str()))
            .collect();
        if claims.is_empty() {
            debug!("no claim-like sentences in buffer");
            return;
        }

        let progress = ProgressBar::new(claims.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{pos}/{len}]") {
            progress.set_style(style);
        }
        progress.set_message(format!("Fact-checking {} claims", claims.len()));

        for claim in &claims {
            let verdict = self.checker.verify_claim(claim).await;
            self.record(&claim.text, verdict);
            progress.inc(1);
        }
        progress.finish_and_clear();
    }

    fn record(&mut self, text: &str, verdict: Verdict) {
        self.detections.fetch_add(1, Ordering::Relaxed);

        if verdict.analysis_method == AnalysisMethod::LlmJson {
            self.citations.record(&verdict.claim, &verdict.citations);
        }

        if self.config.gate.should_alert(verdict.bullshit_score) {
            self.alerts += 1;
            announce(self.alerts, text, &verdict);
        } else if verdict.label == VerdictLabel::True {
            info!("verified: {}", truncate_chars(text, 60));
        } else {
            info!(
                score = verdict.bullshit_score,
                "claim appears reasonable: {}",
                truncate_chars(text, 60)
            );
        }

        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.append(text, &verdict) {
                error!("failed to append to {}: {e:#}", log.path().display());
            }
        }
        self.history.push(verdict);
    }
}

fn announce(n: usize, text: &str, verdict: &Verdict) {
    warn!(
        detection = n,
        verdict = %verdict.label,
        score = verdict.bullshit_score,
        method = ?verdict.analysis_method,
        "BULLSHIT DETECTED: \"{}\"",
        truncate_chars(text, 100)
    );
    warn!("analysis: {}", truncate_chars(&verdict.explanation, 200));
    for cite in verdict.citations.iter().take(3) {
        warn!("source: {} <{}>", truncate_chars(&cite.title, 50), cite.url);
    }
    if !verdict.voice_response.is_empty() {
        warn!("voice response: \"{}\"", verdict.voice_response);
    }
}

fn log_summary(summary: &SessionSummary, citations: &CitationStore) {
    info!("session duration: {}s", summary.duration_secs);
    info!("total claims checked: {}", summary.total_claims);
    info!(
        "bullshit detected: {} ({:.1}%)",
        summary.bullshit_claims,
        summary.bullshit_pct()
    );
    info!(
        "verified as true: {} ({:.1}%)",
        summary.verified_claims,
        summary.verified_pct()
    );
    info!("web searches performed: {}", summary.searches_performed);
    info!("citations saved to {}", citations.path().display());
    if summary.bullshit_claims > 0 {
        warn!(
            "this pitch contained {} false or misleading claims",
            summary.bullshit_claims
        );
    } else {
        info!("no significant false claims detected");
    }
}
