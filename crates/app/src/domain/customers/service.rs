//! Customers service.
//!
//! Tracks the pricing tier of each session. Sessions that never chose a tier
//! are standard customers.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tally::tiers::CustomerTier;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::sessions::SessionId;

#[derive(Debug, Default)]
pub struct InMemoryCustomersService {
    tiers: RwLock<FxHashMap<SessionId, CustomerTier>>,
}

impl InMemoryCustomersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomersService for InMemoryCustomersService {
    async fn get_tier(&self, session: SessionId) -> CustomerTier {
        self.tiers
            .read()
            .await
            .get(&session)
            .copied()
            .unwrap_or_default()
    }

    #[tracing::instrument(
        name = "customers.service.set_tier",
        skip_all,
        fields(session = %session, tier = %tier)
    )]
    async fn set_tier(&self, session: SessionId, tier: CustomerTier) {
        self.tiers.write().await.insert(session, tier);

        info!("customer tier updated");
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Current tier for the session.
    async fn get_tier(&self, session: SessionId) -> CustomerTier;

    /// Replace the tier for the session.
    async fn set_tier(&self, session: SessionId, tier: CustomerTier);
}
