use axum::Json;
use serde::Serialize;

use skylift_domain::pagination::PageInfo;

/// Success envelope: `{success: true, message, payload}`. The payload key is
/// dropped entirely for message-only responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

/// Wrap a payload in the success envelope.
pub fn success<T: Serialize>(message: &'static str, payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message,
        payload: Some(payload),
    })
}

/// Success envelope with no payload.
pub fn message_only(message: &'static str) -> Json<Envelope<()>> {
    Json(Envelope {
        success: true,
        message,
        payload: None,
    })
}

/// List payload: items plus page metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}
