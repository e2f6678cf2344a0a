//! gemini-catalog — Gemini model discovery with a guaranteed fallback.
//!
//! Lists the models a credential can use for content generation, ranks them
//! newest version first, and answers with a fixed default catalog whenever
//! discovery is impossible or inconclusive. Also provides connectivity checks
//! for the generation and vision APIs and a small settings store for the
//! chosen model.
//!
//! # Quick Start
//!
//! ```no_run
//! use gemini_catalog::prelude::*;
//!
//! # async fn example() {
//! let resolution = CatalogResolver::new().resolve("my-api-key").await;
//! if let Some(message) = resolution.error_message() {
//!     eprintln!("{message}");
//! }
//! for (id, name) in resolution.catalog.options() {
//!     println!("{id}: {name}");
//! }
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod settings;

#[cfg(feature = "cli")]
pub mod cli;
