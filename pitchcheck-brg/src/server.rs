use crate::api::message::{
    AnalyzeRequest, AnalyzeResponse, Health, Sample, TranscriptAck, TranscriptRequest, VoiceReply,
    VoiceWebhook,
};
use crate::auth::bearer_matches;
use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use pitchcheck::models::{AlertGate, Claim};
use pitchcheck::pipeline::{FactChecker, SessionHandle};
use std::sync::Arc;
use tracing::{info, warn};

const SAMPLE_PITCH: &str = "Hi everyone, I'm the founder and CEO of DevFlow AI. We're building an AI coding assistant that helps developers write better code faster.

We're already working with 12 Fortune 500 companies including Goldman Sachs and JP Morgan. Our accuracy benchmarks show 94.7% code correctness, which is 23% better than GitHub Copilot.

Sequoia led our $8M seed round at a $45M valuation, with participation from Andreessen Horowitz and Y Combinator. We have a strategic partnership with Microsoft to integrate directly into GitHub, and they're considering acquiring us for $200 million.";

pub struct AppState {
    pub checker: FactChecker,
    pub session: SessionHandle,
    pub gate: AlertGate,
    pub webhook_secret: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/transcript", post(receive_transcript))
        .route("/api/analyze", post(analyze))
        .route("/api/vapi_function", post(voice_function))
        .route("/api/sample", get(sample))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

pub async fn receive_transcript(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranscriptAck>, ApiError> {
    let req = TranscriptRequest::parse(&body);
    let Some(transcript) = req.text() else {
        return Err(ApiError::MissingTranscript);
    };
    let length = transcript.chars().count();
    if !state.session.submit_transcript(transcript) {
        return Err(ApiError::SessionClosed);
    }
    info!(length, "transcript chunk queued");
    Ok(Json(TranscriptAck {
        status: "received",
        queued: true,
        length,
    }))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let req = AnalyzeRequest::parse(&body);
    let Some(text) = req.text() else {
        return Err(ApiError::MissingText);
    };
    let claim = Claim::new(text).with_context(req.context());
    let verdict = state.checker.verify_claim(&claim).await;
    if !state.session.record(claim.text, verdict.clone()) {
        warn!("session worker stopped, verdict not recorded");
    }
    Ok(Json(AnalyzeResponse {
        status: "analyzed",
        result: verdict,
    }))
}

pub async fn voice_function(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<VoiceReply>, ApiError> {
    if let Some(secret) = state.webhook_secret.as_deref() {
        if !bearer_matches(&headers, secret) {
            return Err(ApiError::Unauthorized);
        }
    }

    let hook: VoiceWebhook = serde_json::from_slice(&body).unwrap_or_default();
    let Some(text) = hook.detect_text() else {
        return Ok(Json(VoiceReply::silent()));
    };
    info!("voice function call: {text}");

    let claim = Claim::new(text);
    let verdict = state.checker.verify_claim(&claim).await;
    let score = verdict.bullshit_score;
    let reply = if state.gate.should_alert(score) {
        VoiceReply {
            result: verdict.voice_response.clone(),
            detected: true,
            score: Some(score),
        }
    } else {
        VoiceReply {
            result: String::new(),
            detected: false,
            score: Some(score),
        }
    };
    if !state.session.record(claim.text, verdict) {
        warn!("session worker stopped, verdict not recorded");
    }
    Ok(Json(reply))
}

pub async fn sample() -> Json<Sample> {
    Json(Sample {
        sample: SAMPLE_PITCH,
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: "pitchcheck",
        detections_made: state.session.detections(),
        session_uptime_secs: state.session.uptime().as_secs(),
    })
}
