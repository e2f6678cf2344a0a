//! Model catalog: descriptors, ranking, and remote discovery.
//!
//! A [`ModelCatalog`] is always non-empty when it comes out of
//! [`CatalogResolver::resolve`]: any failure to discover models remotely is
//! answered with the fixed default catalog plus a [`FallbackReason`].

pub mod ranking;
pub mod resolver;
pub mod response;

pub use ranking::{compare_ids, extract_version, ModelVersion};
pub use resolver::{resolve_catalog, CatalogResolver};
pub use response::parse_models_response;

use std::collections::HashMap;
use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Capability string marking a model as usable for content generation.
pub const GENERATION_CAPABILITY: &str = "generateContent";

pub const CONNECTION_FAILED_MESSAGE: &str = "connection failed — using default model list";
pub const LOAD_FAILED_MESSAGE: &str = "failed to load model list";
pub const INVALID_FORMAT_MESSAGE: &str = "invalid response format";
pub const NO_GENERATION_MODELS_MESSAGE: &str =
    "no models supporting content generation were found";

/// The fallback catalog, as `(id, display name)` pairs in presentation order.
pub const DEFAULT_MODELS: [(&str, &str); 4] = [
    ("gemini-2.5-flash", "Gemini 2.5 Flash"),
    ("gemini-2.5-pro", "Gemini 2.5 Pro"),
    ("gemini-2.0-flash", "Gemini 2.0 Flash"),
    ("gemini-1.5-flash", "Gemini 1.5 Flash"),
];

/// One generation-capable model reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct ModelDescriptor {
    /// Identifier with any `models/` prefix removed.
    #[builder(into)]
    pub id: String,
    /// Label for selection lists; includes the description when one exists.
    #[builder(into)]
    pub display_name: String,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default = true)]
    pub supports_generation: bool,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: None,
            supports_generation: true,
        }
    }
}

/// Ordered, id-unique list of generation-capable models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// The fixed fallback catalog.
    pub fn default_catalog() -> Self {
        Self {
            models: DEFAULT_MODELS
                .iter()
                .map(|(id, name)| ModelDescriptor::new(*id, *name))
                .collect(),
        }
    }

    /// Build a ranked catalog from discovered entries.
    ///
    /// Entries that do not support generation are dropped. A repeated id
    /// replaces the earlier entry.
    pub fn from_entries(entries: impl IntoIterator<Item = ModelDescriptor>) -> Self {
        let mut by_id: HashMap<String, ModelDescriptor> = HashMap::new();
        for entry in entries {
            if !entry.supports_generation {
                continue;
            }
            by_id.insert(entry.id.clone(), entry);
        }

        let mut models: Vec<ModelDescriptor> = by_id.into_values().collect();
        ranking::rank(&mut models);
        Self { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelDescriptor> {
        self.models.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// `(id, display name)` pairs for rendering a selectable list.
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.models
            .iter()
            .map(|m| (m.id.as_str(), m.display_name.as_str()))
            .collect()
    }

    pub fn into_vec(self) -> Vec<ModelDescriptor> {
        self.models
    }
}

impl<'a> IntoIterator for &'a ModelCatalog {
    type Item = &'a ModelDescriptor;
    type IntoIter = std::slice::Iter<'a, ModelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

/// Why a resolution answered with the default catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential was supplied; nothing was requested.
    NoCredential,
    /// Timeout, DNS, TLS, or refused connection.
    ConnectionFailure,
    /// Non-success HTTP status, with the server's `error.message` if any.
    ServerError {
        status: u16,
        message: Option<String>,
    },
    /// The body was not JSON or had no `models` array.
    MalformedResponse,
    /// The response parsed, but no model supports generation.
    EmptyResultSet,
}

impl FallbackReason {
    /// Advisory message for the user. `None` for a missing credential.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoCredential => None,
            Self::ConnectionFailure => Some(CONNECTION_FAILED_MESSAGE.to_string()),
            Self::ServerError { message, .. } => Some(
                message
                    .clone()
                    .unwrap_or_else(|| LOAD_FAILED_MESSAGE.to_string()),
            ),
            Self::MalformedResponse => Some(INVALID_FORMAT_MESSAGE.to_string()),
            Self::EmptyResultSet => Some(NO_GENERATION_MODELS_MESSAGE.to_string()),
        }
    }

    pub(crate) fn from_error(error: &CatalogError) -> Self {
        match error {
            CatalogError::Api { status, message } => Self::ServerError {
                status: *status,
                message: message.clone(),
            },
            CatalogError::Serialization(_) | CatalogError::MalformedResponse(_) => {
                Self::MalformedResponse
            }
            _ => Self::ConnectionFailure,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredential => f.write_str("no credential"),
            Self::ConnectionFailure => f.write_str("connection failure"),
            Self::ServerError { status, .. } => write!(f, "server error (status {status})"),
            Self::MalformedResponse => f.write_str("malformed response"),
            Self::EmptyResultSet => f.write_str("no generation-capable models"),
        }
    }
}

/// Outcome of one catalog resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResolution {
    pub catalog: ModelCatalog,
    /// Set whenever `catalog` is the default catalog.
    pub fallback: Option<FallbackReason>,
}

impl CatalogResolution {
    pub(crate) fn discovered(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            fallback: None,
        }
    }

    pub(crate) fn defaulted(reason: FallbackReason) -> Self {
        Self {
            catalog: ModelCatalog::default_catalog(),
            fallback: Some(reason),
        }
    }

    /// Whether the catalog is the default one.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Advisory message to display, if any.
    pub fn error_message(&self) -> Option<String> {
        self.fallback.as_ref().and_then(FallbackReason::message)
    }

    /// Split into `(catalog, error message)`.
    pub fn into_parts(self) -> (ModelCatalog, Option<String>) {
        let message = self.error_message();
        (self.catalog, message)
    }
}
