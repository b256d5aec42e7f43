//! Source of the opaque hardware identity that seeds the configuration key.

/// Error raised when no identity could be obtained.
//
// // 无法获取硬件标识时产生的错误。
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider has no identity to offer on this machine.
    //
    // // 提供者在此机器上无法提供标识。
    #[error("Hardware identity unavailable: {0}")]
    Unavailable(String),
}

/// Supplies a stable, machine-specific string.
///
/// The value is treated as opaque key material; it only needs to be the same on every run
/// on the same machine.
pub trait IdentityProvider: Send + Sync {
    fn hardware_id(&self) -> Result<String, IdentityError>;
}

/// An identity fixed at construction time.
#[derive(Debug, Clone)]
pub struct StaticIdentity(String);

impl StaticIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdentityProvider for StaticIdentity {
    fn hardware_id(&self) -> Result<String, IdentityError> {
        if self.0.is_empty() {
            return Err(IdentityError::Unavailable("empty identity".to_string()));
        }
        Ok(self.0.clone())
    }
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for Box<P> {
    fn hardware_id(&self) -> Result<String, IdentityError> {
        (**self).hardware_id()
    }
}
