//! Shared service context.

use std::sync::Arc;
use tankobon_persistence::PersistenceGateway;
use tankobon_storage::ObjectStorage;

/// Gateways every admin service operates through.
///
/// Cheap to clone; both gateways are shared behind [`Arc`].
#[derive(Clone)]
pub struct AdminContext {
    gateway: Arc<dyn PersistenceGateway>,
    storage: Arc<dyn ObjectStorage>,
}

impl AdminContext {
    /// Build a context from its gateways.
    pub fn new(gateway: Arc<dyn PersistenceGateway>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { gateway, storage }
    }

    /// The persistence gateway.
    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.gateway.as_ref()
    }

    /// The object storage gateway.
    pub fn storage(&self) -> &dyn ObjectStorage {
        self.storage.as_ref()
    }
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext").finish_non_exhaustive()
    }
}
