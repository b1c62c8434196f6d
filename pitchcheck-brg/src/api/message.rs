use pitchcheck::models::Verdict;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /transcript`. Missing, null or non-string values all read
/// as no transcript.
#[derive(Debug, Default, Deserialize)]
pub struct TranscriptRequest {
    #[serde(default)]
    pub transcript: Option<Value>,
}

impl TranscriptRequest {
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn text(&self) -> Option<&str> {
        non_blank(self.transcript.as_ref())
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptAck {
    pub status: &'static str,
    pub queued: bool,
    pub length: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub context: Option<Value>,
}

impl AnalyzeRequest {
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn text(&self) -> Option<&str> {
        non_blank(self.text.as_ref())
    }

    pub fn context(&self) -> &str {
        self.context.as_ref().and_then(Value::as_str).unwrap_or("")
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then_some(text)
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub result: Verdict,
}

/// Function-call envelope posted by the voice platform.
#[derive(Debug, Default, Deserialize)]
pub struct VoiceWebhook {
    #[serde(default)]
    pub message: Option<VoiceMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceMessage {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "functionCall", default)]
    pub function_call: Option<FunctionCall>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: FunctionParameters,
}

#[derive(Debug, Default, Deserialize)]
pub struct FunctionParameters {
    #[serde(default)]
    pub text: String,
}

impl VoiceWebhook {
    /// The claim text, when this is a `detectBullshit` function call.
    pub fn detect_text(&self) -> Option<&str> {
        let message = self.message.as_ref()?;
        if message.kind.as_deref() != Some("function-call") {
            return None;
        }
        let call = message.function_call.as_ref()?;
        if call.name.as_deref() != Some("detectBullshit") {
            return None;
        }
        let text = call.parameters.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceReply {
    pub result: String,
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl VoiceReply {
    pub fn silent() -> Self {
        Self {
            result: String::new(),
            detected: false,
            score: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub detections_made: usize,
    pub session_uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct Sample {
    pub sample: &'static str,
}
