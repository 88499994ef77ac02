//! `/ask-ai`: forward a farmer's question to the generative-language API.
//!
//! The system prompt is attached here, never by the client. Upstream failure
//! of any kind (no key, non-2xx, unparseable body) degrades to a non-2xx
//! response that still carries a displayable `answer`, which is exactly what
//! the widget's application-failure path expects.

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mitra_core::AskRequest;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SYSTEM_PROMPT: &str = "You are 'Krishi Mitra', an AI assistant for Indian farmers. \
    You must provide all answers in English. \
    Your answers should be short, easy to understand, and focused on Indian agriculture \
    (crops, weather, government schemes, soil).";

/// User-facing fallback carried on the failure response.
pub const UPSTREAM_FALLBACK: &str =
    "Sorry, the AI assistant is currently unavailable. Please try again later.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerBody {
    pub answer: String,
}

// Gemini-style generateContent wire format
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: RequestContent,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

pub async fn ask_ai(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> (StatusCode, Json<AnswerBody>) {
    match answer_question(&state, &req.message).await {
        Ok(answer) => (StatusCode::OK, Json(AnswerBody { answer })),
        Err(e) => {
            warn!("ask-ai upstream failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(AnswerBody {
                    answer: UPSTREAM_FALLBACK.to_string(),
                }),
            )
        }
    }
}

async fn answer_question(state: &AppState, question: &str) -> anyhow::Result<String> {
    let key = state
        .config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not configured"))?;
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        state.config.gemini_api_base.trim_end_matches('/'),
        state.config.gemini_model,
        key
    );
    let body = GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: question.to_string(),
            }],
        }],
        system_instruction: RequestContent {
            parts: vec![RequestPart {
                text: SYSTEM_PROMPT.to_string(),
            }],
        },
    };

    let res = state.client.post(&url).json(&body).send().await?;
    if !res.status().is_success() {
        anyhow::bail!("generateContent error {}", res.status());
    }
    let parsed: GenerateResponse = res.json().await?;
    parsed
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or_else(|| anyhow::anyhow!("generateContent returned no candidates"))
}
