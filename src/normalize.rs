//! # Normalizer
//!
//! Prepares a live object for encoding: server-assigned metadata is dropped
//! and names are rewritten to satisfy the API server's and Rust's naming rules.
//!
//! Per-kind clearing (status blocks, resource requirements) lives with each
//! kind's [`crate::codify::Codify`] impl; this module holds the parts shared by
//! every kind. All functions here are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::api::meta::v1::ObjectMeta;
use crate::config::GeneratorConfig;

/// Longest name the API server accepts for most kinds (DNS subdomain).
pub const MAX_OBJECT_NAME_LEN: usize = 253;

static INVALID_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9.-]+").expect("object name regex should be valid"));

static NON_IDENT_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("identifier regex should be valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Annotation keys dropped from metadata
    pub strip_annotations: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for NormalizeOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            strip_annotations: config.strip_annotations.clone(),
        }
    }
}

/// Metadata with only the user-declared fields left.
///
/// Builds a fresh [`ObjectMeta`] from `name`, `generate_name`, `namespace`,
/// `labels`, `annotations` and `finalizers`; everything the server assigns
/// (uid, resource version, timestamps, generation, managed fields, owner
/// references, self link) is gone. Annotations listed in
/// [`NormalizeOptions::strip_annotations`] are removed, and an annotation map
/// left empty becomes `None`.
pub fn clean_object_meta(meta: &ObjectMeta, options: &NormalizeOptions) -> ObjectMeta {
    let annotations = meta.annotations.as_ref().and_then(|annotations| {
        let kept: BTreeMap<String, String> = annotations
            .iter()
            .filter(|(key, _)| !options.strip_annotations.contains(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        (!kept.is_empty()).then_some(kept)
    });

    ObjectMeta {
        annotations,
        finalizers: meta.finalizers.clone(),
        generate_name: meta.generate_name.clone(),
        labels: meta.labels.clone(),
        name: meta.name.clone(),
        namespace: meta.namespace.clone(),
        ..Default::default()
    }
}

/// Rewrite `name` into a valid object name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9.-]` into a
/// single `-`, trims non-alphanumerics from both ends and caps the length at
/// [`MAX_OBJECT_NAME_LEN`]. `My_Claim!` becomes `my-claim`.
pub fn sanitize_object_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = INVALID_NAME_CHARS.replace_all(&lowered, "-");
    let trimmed = trim_non_alphanumeric(&replaced);
    if trimmed.len() <= MAX_OBJECT_NAME_LEN {
        return trimmed.to_string();
    }
    // Only ASCII survives the replacement, so any byte index is a char boundary
    trim_non_alphanumeric(&trimmed[..MAX_OBJECT_NAME_LEN]).to_string()
}

fn trim_non_alphanumeric(s: &str) -> &str {
    s.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// Rust variable name for an object: `My_Claim!` with suffix
/// `persistent_volume_claim` becomes `my_claim_persistent_volume_claim`.
///
/// Uniqueness across a generation run is up to the caller.
pub fn variable_name(name: &str, suffix: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = NON_IDENT_CHARS.replace_all(&lowered, "_");
    let base = replaced.trim_matches('_');
    let ident = match (base.is_empty(), suffix.is_empty()) {
        (true, true) => "object".to_string(),
        (true, false) => suffix.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}_{suffix}"),
    };
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::meta::v1::{ManagedFieldsEntry, OwnerReference, Time};

    fn live_meta() -> ObjectMeta {
        ObjectMeta {
            name: Some("data".to_string()),
            namespace: Some("apps".to_string()),
            uid: Some("7f1c".to_string()),
            resource_version: Some("42".to_string()),
            creation_timestamp: Some(Time("2024-01-01T00:00:00Z".to_string())),
            generation: Some(3),
            managed_fields: Some(vec![ManagedFieldsEntry::default()]),
            owner_references: Some(vec![OwnerReference::default()]),
            labels: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            annotations: Some(BTreeMap::from([
                (
                    "kubectl.kubernetes.io/last-applied-configuration".to_string(),
                    "{}".to_string(),
                ),
                ("team".to_string(), "storage".to_string()),
            ])),
            finalizers: Some(vec!["kubernetes.io/pvc-protection".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_object_meta_keeps_declared_fields() {
        let cleaned = clean_object_meta(&live_meta(), &NormalizeOptions::default());
        assert_eq!(
            cleaned,
            ObjectMeta {
                name: Some("data".to_string()),
                namespace: Some("apps".to_string()),
                labels: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
                annotations: Some(BTreeMap::from([(
                    "team".to_string(),
                    "storage".to_string()
                )])),
                finalizers: Some(vec!["kubernetes.io/pvc-protection".to_string()]),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_clean_object_meta_drops_emptied_annotations() {
        let mut meta = live_meta();
        meta.annotations = Some(BTreeMap::from([(
            "kubectl.kubernetes.io/last-applied-configuration".to_string(),
            "{}".to_string(),
        )]));
        assert_eq!(
            clean_object_meta(&meta, &NormalizeOptions::default()).annotations,
            None
        );
    }

    #[test]
    fn test_clean_object_meta_is_idempotent() {
        let options = NormalizeOptions::default();
        let once = clean_object_meta(&live_meta(), &options);
        assert_eq!(clean_object_meta(&once, &options), once);
    }

    #[test]
    fn test_sanitize_object_name() {
        assert_eq!(sanitize_object_name("My_Claim!"), "my-claim");
        assert_eq!(sanitize_object_name("data"), "data");
        assert_eq!(sanitize_object_name("a.b-c"), "a.b-c");
        assert_eq!(sanitize_object_name("--Weird  Name__"), "weird-name");
        assert_eq!(sanitize_object_name("!!!"), "");
    }

    #[test]
    fn test_sanitize_object_name_truncates() {
        let long = format!("{}-tail", "a".repeat(MAX_OBJECT_NAME_LEN - 1));
        let sanitized = sanitize_object_name(&long);
        assert_eq!(sanitized, "a".repeat(MAX_OBJECT_NAME_LEN - 1));
    }

    #[test]
    fn test_sanitize_object_name_is_idempotent() {
        for name in ["My_Claim!", "x..y", "ÄÖÜ-data", "UPPER"] {
            let once = sanitize_object_name(name);
            assert_eq!(sanitize_object_name(&once), once);
        }
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(
            variable_name("My_Claim!", "persistent_volume_claim"),
            "my_claim_persistent_volume_claim"
        );
        assert_eq!(variable_name("web-config", "config_map"), "web_config_config_map");
        assert_eq!(variable_name("9lives", "config_map"), "_9lives_config_map");
        assert_eq!(variable_name("!!!", "config_map"), "config_map");
        assert_eq!(variable_name("", ""), "object");
    }
}
