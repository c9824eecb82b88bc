use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/pastes`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaste {
    pub content: String,
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
    #[serde(default)]
    pub max_views: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPaste {
    pub id: String,
    /// Shareable link to the HTML view, derived from the configured base URL.
    pub url: String,
}

/// A successful fetch: the content plus whatever limits remain. Both limit
/// fields serialize as `null` for unlimited pastes.
#[derive(Debug, Serialize)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
}
