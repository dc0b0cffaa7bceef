//! Manifest loading.
//!
//! Reads multi-document YAML (and therefore JSON) into typed objects,
//! dispatching on each document's `kind`. `List` documents are flattened.
//! Kinds without a [`crate::codify::Codify`] impl are skipped with a warning.

use anyhow::{anyhow, Context};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;
use tracing::warn;

use crate::api::core::v1::{ConfigMap, PersistentVolumeClaim};
use crate::resource::Resource;

/// One supported object read from a manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    PersistentVolumeClaim(PersistentVolumeClaim),
    ConfigMap(ConfigMap),
}

impl Manifest {
    pub fn kind(&self) -> &'static str {
        match self {
            Manifest::PersistentVolumeClaim(_) => PersistentVolumeClaim::KIND,
            Manifest::ConfigMap(_) => ConfigMap::KIND,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Manifest::PersistentVolumeClaim(o) => o.name(),
            Manifest::ConfigMap(o) => o.name(),
        }
    }
}

/// Parse every document in `input`.
///
/// Empty documents are ignored. A document without `kind`, or one whose body
/// does not match its kind's schema, is an error naming the document's
/// position.
pub fn parse_documents(input: &str) -> anyhow::Result<Vec<Manifest>> {
    let mut manifests = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = Value::deserialize(document)
            .with_context(|| format!("Failed to parse manifest document {}", index + 1))?;
        if value.is_null() {
            continue;
        }
        collect(value, &mut manifests)
            .with_context(|| format!("Invalid manifest document {}", index + 1))?;
    }
    Ok(manifests)
}

/// Read and parse a manifest file.
pub fn load(path: &Path) -> anyhow::Result<Vec<Manifest>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    parse_documents(&contents).with_context(|| format!("In manifest: {}", path.display()))
}

fn collect(value: Value, out: &mut Vec<Manifest>) -> anyhow::Result<()> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("document has no 'kind'"))?
        .to_string();

    match kind.as_str() {
        "PersistentVolumeClaim" => out.push(Manifest::PersistentVolumeClaim(
            serde_yaml::from_value(value).context("Invalid PersistentVolumeClaim")?,
        )),
        "ConfigMap" => out.push(Manifest::ConfigMap(
            serde_yaml::from_value(value).context("Invalid ConfigMap")?,
        )),
        "List" => {
            let items = match value.get("items") {
                Some(Value::Sequence(items)) => items.clone(),
                Some(Value::Null) | None => Vec::new(),
                Some(_) => return Err(anyhow!("'items' of a List must be a sequence")),
            };
            for item in items {
                collect(item, out)?;
            }
        }
        other => {
            let name = value
                .get("metadata")
                .and_then(|m| m.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>");
            warn!(kind = other, name, "skipping unsupported kind");
        }
    }
    Ok(())
}
