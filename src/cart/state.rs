//! Per-Session Application State
//!
//! Each shopper owns an independent cart and order history, keyed by a
//! `cart_session` cookie. DashMap entry access serializes operations
//! within one session while keeping sessions independent.

use super::models::{Cart, Order};
use crate::catalog::Catalog;
use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use std::{collections::BTreeMap, sync::Arc};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "cart_session";

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// State owned by one shopper: the live cart and the append-only order
/// history.
#[derive(Debug, Default)]
pub struct Session {
    pub cart: Cart,
    pub history: BTreeMap<u32, Order>,
}

/// Core application state: the per-session store and the read-only
/// catalog.
pub struct AppState {
    /// In-memory session storage, keyed by session id
    pub sessions: DashMap<String, Session>,

    /// The plant and coupon catalog
    pub catalog: Catalog,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates fresh state over the embedded catalog.
    pub fn new() -> Self {
        let catalog = Catalog::load().expect("embedded seed data is valid");
        Self {
            sessions: DashMap::new(),
            catalog,
        }
    }
}

/// Reads the session id from the `cart_session` cookie, minting a new one
/// when the request carries none. The flag reports whether the id is new
/// and a `Set-Cookie` must go on the response.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|part| {
                let (name, value) = part.trim().split_once('=')?;
                (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
            })
        });

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Builds the `Set-Cookie` value for a newly minted session id.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly")
}
