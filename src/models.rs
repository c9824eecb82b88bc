use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

pub const FIELD_CONTENT: &str = "content";
pub const FIELD_CREATED_AT: &str = "created_at";
pub const FIELD_TTL_SECONDS: &str = "ttl_seconds";
pub const FIELD_MAX_VIEWS: &str = "max_views";
pub const FIELD_VIEWS: &str = "views";

/// Upper bound on `ttl_seconds` accepted at creation: one century. Keeps
/// the expiry instant and the store's own timer inside the range every
/// backend can represent.
pub const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// A paste as persisted: a flat map of string fields under one store key.
/// `ttl_seconds` and `max_views` are simply absent when unlimited.
#[derive(Debug, Clone, PartialEq)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub ttl_seconds: Option<u64>,
    pub max_views: Option<u64>,
    pub views: u64,
}

impl Paste {
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            (FIELD_CONTENT.to_string(), self.content.clone()),
            (FIELD_CREATED_AT.to_string(), self.created_at.to_rfc3339()),
            (FIELD_VIEWS.to_string(), self.views.to_string()),
        ];

        if let Some(ttl_seconds) = self.ttl_seconds {
            fields.push((FIELD_TTL_SECONDS.to_string(), ttl_seconds.to_string()));
        }
        if let Some(max_views) = self.max_views {
            fields.push((FIELD_MAX_VIEWS.to_string(), max_views.to_string()));
        }

        fields
    }

    /// Rebuild a paste from stored fields. Returns `None` when a required
    /// field is missing or unparseable, so damaged records read as absent.
    pub fn from_fields(id: &str, fields: &HashMap<String, String>) -> Option<Self> {
        let content = fields.get(FIELD_CONTENT)?.clone();
        let created_at = fields.get(FIELD_CREATED_AT)?.parse::<DateTime<Utc>>().ok()?;

        let ttl_seconds = match fields.get(FIELD_TTL_SECONDS) {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        let max_views = match fields.get(FIELD_MAX_VIEWS) {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        let views = match fields.get(FIELD_VIEWS) {
            Some(raw) => raw.parse().ok()?,
            None => 0,
        };

        Some(Self {
            id: id.to_string(),
            content,
            created_at,
            ttl_seconds,
            max_views,
            views,
        })
    }

    /// The instant this paste stops being served, if it has a TTL at all.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let ttl_seconds = i64::try_from(self.ttl_seconds?).ok()?;
        let seconds = self.created_at.timestamp().checked_add(ttl_seconds)?;

        Utc.timestamp_opt(seconds, self.created_at.timestamp_subsec_nanos())
            .single()
    }

    /// Expiry boundary is exclusive of availability: a paste created at T
    /// with a TTL of S is gone from T+S onward.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        match self.max_views {
            Some(max_views) => self.views >= max_views,
            None => false,
        }
    }
}
