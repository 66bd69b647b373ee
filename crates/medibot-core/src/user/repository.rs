//! Identity repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::Identity;

/// Local key-value persistence for the signed-in identity.
///
/// The presence of a stored identity alone decides auto-login on launch.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Returns the persisted identity, if any.
    async fn load(&self) -> Result<Option<Identity>>;

    /// Persists the identity, replacing any previous one.
    async fn save(&self, identity: &Identity) -> Result<()>;

    /// Removes the persisted identity. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}
