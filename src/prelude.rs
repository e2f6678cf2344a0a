//! Convenience re-exports for common use.

pub use crate::catalog::{
    resolve_catalog, CatalogResolution, CatalogResolver, FallbackReason, ModelCatalog,
    ModelDescriptor,
};
pub use crate::config::CatalogConfig;
pub use crate::diagnostics::{CheckTarget, ConnectionCheck, ConnectionChecker};
pub use crate::error::{CatalogError, Result};
pub use crate::settings::{AiSettings, FileSettingsStore, SettingsStore};
