use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use tracing::{debug, warn};

use crate::{
    api::{app_state::AppState, dto::media_dto::*},
    error::AppError,
    security::Claims,
};

/// 高档位会员的朗读音色
const PREMIUM_VOICE: &str = "nova";

/// 按会员档位选择缺省音色
fn voice_for_tier(tier: &str, default_voice: &str) -> String {
    if tier == "premium" {
        PREMIUM_VOICE.to_string()
    } else {
        default_voice.to_string()
    }
}

pub async fn synthesize_speech(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SynthesizeSpeechRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Speech text must not be empty".into(),
        ));
    }

    let voice = request
        .voice
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| voice_for_tier(&claims.tier, &state.genai_config.default_voice));

    debug!("Synthesizing speech with voice {}", voice);

    // 合成不可用时返回空引用而不是失败，朗读是增强功能
    let reference = match state.media_pipeline.speech(&request.text, &voice).await {
        Ok(reference) => Some(reference),
        Err(e) => {
            warn!("Speech synthesis unavailable: {}", e);
            None
        }
    };

    Ok(Json(SynthesizeSpeechResponse { reference }))
}
