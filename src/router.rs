use crate::converters::chat_builder::{
    ImageInput, UploadedFile, append_reply, build_image_turn, build_multimodal_turn,
    build_text_turn,
};
use crate::converters::history::HistoryParse;
use crate::error::{ApiError, ChatError, Result};
use crate::extract::ChatJson;
use crate::llm_client::ChatCompletion;
use crate::models::{
    ImageAnalysisRequest, ImageAnalysisResponse, MultimodalResponse, PresetsResponse, ServiceInfo,
    TextChatRequest, TextChatResponse,
};
use crate::presets::PRESETS;
use crate::request_id::{RequestId, inject_request_id};
use axum::{
    Extension, Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

/// Uploads and base64 payloads routinely exceed axum's 2 MiB default.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

const CHAT_CONTEXT: &str = "Error processing chat";
const IMAGE_CONTEXT: &str = "Error processing image";
const MULTIMODAL_CONTEXT: &str = "Error processing multimodal chat";

#[derive(Clone)]
pub struct AppState {
    pub llm_client: Arc<dyn ChatCompletion>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/presets", get(list_presets))
        .route("/chat/text", post(text_chat))
        .route("/chat/image-upload", post(image_upload_chat))
        .route("/chat/image-base64", post(image_base64_chat))
        .route("/chat/multimodal", post(multimodal_chat))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(inject_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn fail(context: &'static str) -> impl FnOnce(ChatError) -> ApiError {
    move |e| {
        warn!("{}: {}", context, e);
        e.into_api_error(context)
    }
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Vision Chat Gateway",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: IndexMap::from([
            ("/chat/text", "Text-only chat"),
            ("/chat/image-upload", "Upload an image and chat about it"),
            ("/chat/image-base64", "Send a base64 image and chat about it"),
            ("/chat/multimodal", "Text chat with an optional image and history"),
            ("/presets", "Get available preset actions for images"),
        ]),
    })
}

pub async fn list_presets() -> Json<PresetsResponse> {
    Json(PresetsResponse { presets: PRESETS })
}

#[axum_macros::debug_handler]
pub async fn text_chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ChatJson(request): ChatJson<TextChatRequest>,
) -> std::result::Result<Json<TextChatResponse>, ApiError> {
    let history = request.conversation_history.unwrap_or_default();
    debug!("Text chat with {} prior turn(s)", history.len());
    let messages = build_text_turn(history, request.message);

    let reply = state
        .llm_client
        .complete(&messages, &request_id)
        .await
        .map_err(fail(CHAT_CONTEXT))?;

    Ok(Json(TextChatResponse {
        conversation_history: append_reply(messages, &reply),
        response: reply,
    }))
}

#[axum_macros::debug_handler]
pub async fn image_upload_chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    multipart: Multipart,
) -> std::result::Result<Json<ImageAnalysisResponse>, ApiError> {
    analyze_upload(&state, &request_id, multipart)
        .await
        .map(Json)
        .map_err(fail(IMAGE_CONTEXT))
}

async fn analyze_upload(
    state: &AppState,
    request_id: &RequestId,
    multipart: Multipart,
) -> Result<ImageAnalysisResponse> {
    let form = FormFields::read(multipart).await?;
    let file = form.image.as_ref().ok_or(ChatError::MissingField("image"))?;
    let image = ImageInput::from_upload(file).inspect_err(|_| {
        info!("Rejected upload with content type {:?}", file.content_type);
    })?;

    let (messages, analysis_type) =
        build_image_turn(&image, form.text("prompt"), form.text("preset_action"));
    let response = state.llm_client.complete(&messages, request_id).await?;
    Ok(ImageAnalysisResponse { response, analysis_type })
}

#[axum_macros::debug_handler]
pub async fn image_base64_chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ChatJson(request): ChatJson<ImageAnalysisRequest>,
) -> std::result::Result<Json<ImageAnalysisResponse>, ApiError> {
    let image = ImageInput::from_base64(request.image_base64);
    let (messages, analysis_type) = build_image_turn(
        &image,
        request.prompt.as_deref(),
        request.preset_action.as_deref(),
    );

    let response = state
        .llm_client
        .complete(&messages, &request_id)
        .await
        .map_err(fail(IMAGE_CONTEXT))?;

    Ok(Json(ImageAnalysisResponse { response, analysis_type }))
}

#[axum_macros::debug_handler]
pub async fn multimodal_chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    multipart: Multipart,
) -> std::result::Result<Json<MultimodalResponse>, ApiError> {
    chat_multimodal(&state, &request_id, multipart)
        .await
        .map(Json)
        .map_err(fail(MULTIMODAL_CONTEXT))
}

async fn chat_multimodal(
    state: &AppState,
    request_id: &RequestId,
    multipart: Multipart,
) -> Result<MultimodalResponse> {
    let mut form = FormFields::read(multipart).await?;
    let message = form
        .fields
        .remove("message")
        .ok_or(ChatError::MissingField("message"))?;
    let history = HistoryParse::from_json(form.text("conversation_history"));

    let turn = build_multimodal_turn(history, message, form.image.as_ref());
    let response = state.llm_client.complete(&turn.messages, request_id).await?;

    Ok(MultimodalResponse {
        conversation_history: append_reply(turn.messages, &response),
        response,
        has_image: turn.has_image,
    })
}

/// Text fields and the `image` file of a multipart form.
#[derive(Debug, Default)]
struct FormFields {
    fields: HashMap<String, String>,
    image: Option<UploadedFile>,
}

impl FormFields {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = FormFields::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                let bytes = field.bytes().await?;
                // browsers send an empty part for an untouched file input
                if !has_file_name && bytes.is_empty() {
                    continue;
                }
                debug!("Received image field: {} ({} bytes)", content_type, bytes.len());
                form.image = Some(UploadedFile { content_type, bytes });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
