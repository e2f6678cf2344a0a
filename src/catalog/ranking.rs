//! Version-recency ordering for model ids.
//!
//! Ids carrying a `<major>.<minor>` number (the first one found) rank newest
//! first. Ids without one sort lexicographically after all versioned ids.
//! Ties between equal versions fall back to the id itself, so the ordering
//! is total and independent of discovery order.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use super::ModelDescriptor;

static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn version_pattern() -> &'static Regex {
    VERSION_PATTERN.get_or_init(|| Regex::new(r"(\d+)\.(\d+)").expect("valid version regex"))
}

/// A `<major>.<minor>` pair parsed out of a model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModelVersion {
    pub major: u64,
    pub minor: u64,
}

/// First `<digits>.<digits>` occurrence in `id`.
///
/// Components too large for `u64` count as 0.
pub fn extract_version(id: &str) -> Option<ModelVersion> {
    let caps = version_pattern().captures(id)?;
    let component = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    Some(ModelVersion {
        major: component(1),
        minor: component(2),
    })
}

/// Ordering used for catalog presentation.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (extract_version(a), extract_version(b)) {
        (Some(va), Some(vb)) => vb
            .major
            .cmp(&va.major)
            .then(vb.minor.cmp(&va.minor))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort descriptors in place by [`compare_ids`].
pub fn rank(models: &mut [ModelDescriptor]) {
    models.sort_by(|a, b| compare_ids(&a.id, &b.id));
}
