pub mod common;
pub mod crypto;
pub mod identity;
pub mod record;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;

pub use common::mode::{FileSizeUnit, FilterMode, TagMode};
pub use identity::{IdentityProvider, StaticIdentity};
pub use record::MetadataRecord;
pub use store::{Store, StoreError, StoreLayout, StoreState};
