//! # Session Holder
//!
//! Tracks the currently authenticated owner.
//!
//! ## Explicit Injection
//! No ambient auth state: every store and service receives this cheap
//! clonable handle explicitly. Sign-in and sign-out flip the owner;
//! consumers read it at call time, so an owner switch is picked up by the
//! next operation (which resets its per-owner cache).

use std::sync::{Arc, RwLock};

/// Clonable handle to the authenticated owner, shared across stores.
///
/// ## Thread Safety
/// Uses `Arc<RwLock<T>>`: many concurrent readers (every operation checks
/// the owner), rare writers (sign-in/sign-out).
#[derive(Debug, Clone, Default)]
pub struct Session {
    owner: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Creates a session already signed in as `owner_id` (tests, restores).
    pub fn signed_in(owner_id: impl Into<String>) -> Self {
        let session = Session::new();
        session.sign_in(owner_id);
        session
    }

    /// Signs in as `owner_id`, replacing any previous owner.
    pub fn sign_in(&self, owner_id: impl Into<String>) {
        let mut owner = self.owner.write().expect("session lock poisoned");
        *owner = Some(owner_id.into());
    }

    /// Signs out.
    pub fn sign_out(&self) {
        let mut owner = self.owner.write().expect("session lock poisoned");
        *owner = None;
    }

    /// The current owner id, if signed in.
    pub fn current_owner(&self) -> Option<String> {
        self.owner.read().expect("session lock poisoned").clone()
    }

    /// Whether anyone is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.owner.read().expect("session lock poisoned").is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
