use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Paste, FIELD_VIEWS, MAX_TTL_SECONDS};
use crate::store::{keys, AnyStore, Store};
use crate::types::api::{CreatePaste, PasteView};

/// How long exhausted and unreadable records linger before the store
/// reclaims them. Deleting outright would let a fetch racing us recreate
/// the key through its increment and sneak past the view limit; retiring
/// also reclaims the counter-only stubs such races leave behind.
const RETIRE_SECS: u64 = 60;

/// Validate a create request and persist the paste.
pub async fn create(
    store: &mut AnyStore,
    request: CreatePaste,
    now: DateTime<Utc>,
) -> crate::ApiResult<Paste> {
    if request.content.trim().is_empty() {
        return Err(ApiError::EmptyContent);
    }
    if let Some(ttl_seconds) = request.ttl_seconds {
        if ttl_seconds == 0 || ttl_seconds > MAX_TTL_SECONDS {
            return Err(ApiError::InvalidTtl);
        }
    }
    if request.max_views == Some(0) {
        return Err(ApiError::InvalidMaxViews);
    }

    let paste = Paste {
        id: Uuid::new_v4().to_string(),
        content: request.content,
        created_at: now,
        ttl_seconds: request.ttl_seconds,
        max_views: request.max_views,
        views: 0,
    };

    info!(
        "new paste: id='{id}', size={size}, ttl_seconds={ttl:?}, max_views={max_views:?}",
        id = paste.id,
        size = paste.content.len(),
        ttl = paste.ttl_seconds,
        max_views = paste.max_views
    );

    let key = keys::paste(&paste.id);
    store.put(&key, &paste.to_fields()).await?;
    if let Some(ttl_seconds) = paste.ttl_seconds {
        store.expire(&key, ttl_seconds).await?;
    }

    Ok(paste)
}

/// Look up a paste and account for the view in one pass.
///
/// Checks run in a fixed order: absent record, logical expiry, exhausted
/// counter, then the increment itself. The increment is verified after the
/// fact, so fetches racing over the last view settle against the counter
/// and at most `max_views` of them ever see content.
pub async fn fetch(
    store: &mut AnyStore,
    id: &str,
    now: DateTime<Utc>,
) -> crate::ApiResult<PasteView> {
    let key = keys::paste(id);

    let Some(fields) = store.get(&key).await? else {
        return Err(ApiError::NotFound);
    };

    let Some(paste) = Paste::from_fields(id, &fields) else {
        warn!("unreadable paste record: id='{id}'");
        store.expire(&key, RETIRE_SECS).await?;
        return Err(ApiError::NotFound);
    };

    // logical expiry wins even when the store's own timer lags behind it
    if paste.is_expired(now) {
        info!("paste expired: id='{id}'");
        store.delete(&key).await?;
        return Err(ApiError::NotFound);
    }

    if paste.is_exhausted() {
        info!("paste view limit reached: id='{id}'");
        store.expire(&key, RETIRE_SECS).await?;
        return Err(ApiError::NotFound);
    }

    let views = u64::try_from(store.incr(&key, FIELD_VIEWS).await?).unwrap_or(u64::MAX);
    if let Some(max_views) = paste.max_views {
        if views > max_views {
            warn!("view limit raced past: id='{id}', views={views}, max_views={max_views}");
            store.expire(&key, RETIRE_SECS).await?;
            return Err(ApiError::NotFound);
        }
    }

    let remaining_views = paste
        .max_views
        .map(|max_views| max_views.saturating_sub(views));
    let expires_at = paste.expires_at();

    Ok(PasteView {
        content: paste.content,
        remaining_views,
        expires_at,
    })
}
