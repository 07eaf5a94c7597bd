//! Per-viewer pagination state.
//!
//! Each viewer browsing a ranking gets their own page cursor, keyed by a
//! session id. State is shared behind `Arc`, so clones observe the same
//! cursors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Page State
// ============================================================================

/// A page cursor over a fixed number of pages.
///
/// Pages are 1-based. Navigation clamps to `[1, total]`; a cursor over an
/// empty ranking stays pinned at page 1 of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page number, 1-based.
    pub current: usize,
    /// Total pages available.
    pub total: usize,
}

impl PageState {
    /// Creates a cursor at page 1 over `total` pages.
    pub fn new(total: usize) -> Self {
        Self { current: 1, total }
    }

    /// Advances one page, clamped to the last page.
    pub fn next(&mut self) {
        if self.current < self.total {
            self.current += 1;
        }
    }

    /// Steps back one page, clamped to the first page.
    pub fn back(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Jumps to a page, clamped to `[1, total]`.
    pub fn jump_to(&mut self, page: usize) {
        self.current = page.clamp(1, self.total.max(1));
    }

    /// Whether the cursor sits on the last page.
    pub fn is_last(&self) -> bool {
        self.current >= self.total
    }

    /// Whether the cursor sits on the first page.
    pub fn is_first(&self) -> bool {
        self.current <= 1
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// In-memory store of page cursors keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, PageState>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cursor for `session_id`, creating one over `total` pages
    /// if the session is new.
    pub async fn get_or_insert(&self, session_id: &str, total: usize) -> PageState {
        let mut sessions = self.sessions.write().await;
        *sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, total, "Creating page cursor");
                PageState::new(total)
            })
    }

    /// Returns the cursor for `session_id`, if one exists.
    pub async fn get(&self, session_id: &str) -> Option<PageState> {
        self.sessions.read().await.get(session_id).copied()
    }

    /// Applies `f` to the session's cursor and returns the updated state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SessionNotFound`] for an unknown session id;
    /// the store is left untouched.
    pub async fn update<F>(&self, session_id: &str, f: F) -> Result<PageState, StoreError>
    where
        F: FnOnce(&mut PageState),
    {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        f(state);
        Ok(*state)
    }

    /// Drops a session's cursor.
    pub async fn remove(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Number of tracked sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clamps() {
        let mut state = PageState::new(3);
        assert!(state.is_first());

        state.back();
        assert_eq!(state.current, 1);

        state.next();
        state.next();
        state.next();
        state.next();
        assert_eq!(state.current, 3);
        assert!(state.is_last());

        state.jump_to(99);
        assert_eq!(state.current, 3);
        state.jump_to(0);
        assert_eq!(state.current, 1);
    }

    #[test]
    fn test_empty_ranking_cursor() {
        let mut state = PageState::new(0);
        state.next();
        assert_eq!(state.current, 1);
        state.jump_to(4);
        assert_eq!(state.current, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store.get_or_insert("viewer-a", 5).await;
        store.get_or_insert("viewer-b", 5).await;

        store.update("viewer-a", PageState::next).await.unwrap();
        store.update("viewer-a", PageState::next).await.unwrap();

        assert_eq!(store.get("viewer-a").await.unwrap().current, 3);
        assert_eq!(store.get("viewer-b").await.unwrap().current, 1);
    }

    #[tokio::test]
    async fn test_get_or_insert_keeps_existing_cursor() {
        let store = SessionStore::new();
        store.get_or_insert("viewer", 5).await;
        store.update("viewer", |s| s.jump_to(4)).await.unwrap();

        let state = store.get_or_insert("viewer", 5).await;
        assert_eq!(state.current, 4);
    }

    #[tokio::test]
    async fn test_update_missing_session() {
        let store = SessionStore::new();
        let err = store.update("ghost", PageState::next).await.unwrap_err();
        assert!(matches!(err, StoreError::SessionNotFound(id) if id == "ghost"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        store.get_or_insert("viewer", 2).await;
        assert_eq!(store.len().await, 1);
        store.remove("viewer").await;
        assert!(store.get("viewer").await.is_none());
    }
}
