//! # Generator Configuration
//!
//! Settings that shape generated snippets, loaded from a TOML file and
//! overridable from the environment.
//!
//! ## File format
//!
//! ```toml
//! encode_errors = "tolerate"
//! template_errors = "fail"
//! default_namespace = "default"
//! strip_annotations = ["kubectl.kubernetes.io/last-applied-configuration"]
//!
//! [aliases]
//! "kodify::api::core::v1" = "corev1"
//! "kodify::api::meta::v1" = "metav1"
//!
//! [templates]
//! install = "templates/install.rs.j2"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ## Environment Variables
//!
//! - `KODIFY_ENCODE_ERRORS` - `tolerate` or `fail`
//! - `KODIFY_TEMPLATE_ERRORS` - `tolerate` or `fail`
//! - `KODIFY_DEFAULT_NAMESPACE` - namespace for objects that declare none
//!
//! Invalid values are ignored with a warning.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::literal::{CORE_V1, META_V1};

/// What to do when a step can fail without making the whole call pointless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Keep going with a placeholder and report the failure as a diagnostic
    #[default]
    Tolerate,
    /// Return the failure to the caller
    Fail,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerate" => Ok(ErrorPolicy::Tolerate),
            "fail" => Ok(ErrorPolicy::Fail),
            other => Err(format!(
                "invalid error policy '{other}', expected 'tolerate' or 'fail'"
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Tolerate => write!(f, "tolerate"),
            ErrorPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Optional template overrides, as file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstall: Option<PathBuf>,
}

/// Configuration for [`crate::Generator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package prefix -> alias applied to every generated literal
    pub aliases: BTreeMap<String, String>,
    /// Policy for values without a literal form (default: tolerate)
    pub encode_errors: ErrorPolicy,
    /// Policy for template parse/render failures (default: fail)
    pub template_errors: ErrorPolicy,
    /// Namespace used when an object declares none
    pub default_namespace: String,
    /// Annotation keys removed during normalization
    pub strip_annotations: Vec<String>,
    pub templates: TemplatePaths,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::from([
                (CORE_V1.to_string(), "corev1".to_string()),
                (META_V1.to_string(), "metav1".to_string()),
            ]),
            encode_errors: ErrorPolicy::Tolerate,
            template_errors: ErrorPolicy::Fail,
            default_namespace: "default".to_string(),
            strip_annotations: vec![
                "kubectl.kubernetes.io/last-applied-configuration".to_string()
            ],
            templates: TemplatePaths::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a TOML document. Relative template paths are kept as written.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse generator config")
    }

    /// Load a TOML config file.
    ///
    /// Relative template paths are resolved against the file's directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse generator config: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.templates.install = config.templates.install.map(|p| base.join(p));
            config.templates.uninstall = config.templates.uninstall.map(|p| base.join(p));
        }
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `KODIFY_*` overrides on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(policy) = policy_override(&lookup, "KODIFY_ENCODE_ERRORS") {
            self.encode_errors = policy;
        }
        if let Some(policy) = policy_override(&lookup, "KODIFY_TEMPLATE_ERRORS") {
            self.template_errors = policy;
        }
        if let Some(ns) = lookup("KODIFY_DEFAULT_NAMESPACE") {
            let ns = ns.trim();
            if !ns.is_empty() {
                self.default_namespace = ns.to_string();
            }
        }
        self
    }
}

fn policy_override(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<ErrorPolicy> {
    let value = lookup(key)?;
    match value.parse() {
        Ok(policy) => Some(policy),
        Err(err) => {
            warn!(key, error = %err, "ignoring invalid environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.encode_errors, ErrorPolicy::Tolerate);
        assert_eq!(config.template_errors, ErrorPolicy::Fail);
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.aliases.get(CORE_V1).map(String::as_str), Some("corev1"));
        assert_eq!(config.aliases.get(META_V1).map(String::as_str), Some("metav1"));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Fail".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Fail));
        assert_eq!(" tolerate ".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Tolerate));
        assert!("abort".parse::<ErrorPolicy>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
encode_errors = "fail"

[aliases]
"kodify::api::core::v1" = "core"
"#,
        )
        .unwrap();
        assert_eq!(config.encode_errors, ErrorPolicy::Fail);
        assert_eq!(config.template_errors, ErrorPolicy::Fail);
        assert_eq!(config.default_namespace, "default");
        // A table replaces the default map as a whole
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.aliases[CORE_V1], "core");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(GeneratorConfig::from_toml_str("encode_errors = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_resolves_template_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kodify.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[templates]\ninstall = \"install.j2\"").unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.templates.install, Some(dir.path().join("install.j2")));
        assert_eq!(config.templates.uninstall, None);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/kodify.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read generator config"));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("KODIFY_ENCODE_ERRORS", "fail"),
            ("KODIFY_TEMPLATE_ERRORS", "bogus"),
            ("KODIFY_DEFAULT_NAMESPACE", "apps"),
        ]);
        let config = GeneratorConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.encode_errors, ErrorPolicy::Fail);
        assert_eq!(config.template_errors, ErrorPolicy::Fail);
        assert_eq!(config.default_namespace, "apps");
    }
}
