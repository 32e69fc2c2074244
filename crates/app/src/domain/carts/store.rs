//! Session cart store.
//!
//! One cart per session. Each cart sits behind its own async mutex, so writers
//! on the same session are serialised while other sessions proceed
//! independently.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tally::cart::Cart;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::sessions::SessionId;

type Slot = Arc<Mutex<Cart>>;

#[derive(Debug, Default)]
pub struct SessionCarts {
    carts: Mutex<FxHashMap<SessionId, Slot>>,
}

impl SessionCarts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the session's current cart, or `None` if it never had one.
    pub async fn snapshot(&self, session: SessionId) -> Option<Cart> {
        let slot = self.carts.lock().await.get(&session).cloned()?;

        let cart = slot.lock().await.clone();

        Some(cart)
    }

    /// Exclusive access to the session's cart until the guard drops.
    ///
    /// A session without a cart starts from the empty cart. Assigning through
    /// the guard replaces the stored cart.
    pub async fn lock(&self, session: SessionId) -> OwnedMutexGuard<Cart> {
        let slot = Arc::clone(self.carts.lock().await.entry(session).or_default());

        slot.lock_owned().await
    }

    /// Exclusive access to the session's cart, or `None` if it never had one.
    ///
    /// Unlike [`SessionCarts::lock`], this never creates a slot.
    pub async fn lock_existing(&self, session: SessionId) -> Option<OwnedMutexGuard<Cart>> {
        let slot = self.carts.lock().await.get(&session).cloned()?;

        Some(slot.lock_owned().await)
    }

    /// Number of sessions holding a cart.
    pub async fn len(&self) -> usize {
        self.carts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
