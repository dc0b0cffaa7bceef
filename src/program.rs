//! Whole-program output.
//!
//! Wraps the install and uninstall snippets of a manifest's objects into one
//! Rust module: a struct owning a [`Registry`], with `install` running the
//! install snippets in manifest order and `uninstall` running the uninstall
//! snippets in reverse.

use anyhow::Context;
use askama::Template;
use std::collections::{BTreeSet, HashSet};
use tracing::{info, warn};

use crate::client::ResourceClient;
use crate::codify::{use_declarations, Codify, Generator, Snippet};
use crate::error::GenerateError;
use crate::manifest::Manifest;
use crate::registry::Registry;

/// Struct name used when the requested one has no usable characters.
pub const DEFAULT_STRUCT_NAME: &str = "Cluster";

#[derive(Template)]
#[template(path = "program.rs.txt", escape = "none")]
struct ProgramTemplate<'a> {
    origin: &'a str,
    struct_name: &'a str,
    uses: Vec<String>,
    installs: Vec<&'a str>,
    uninstalls: Vec<&'a str>,
}

/// Snippets generated for one manifest object.
#[derive(Debug)]
pub struct ProgramObject {
    pub kind: &'static str,
    /// Sanitized object name
    pub name: String,
    /// Variable the install snippet binds, unique within the program
    pub variable: String,
    pub install: Snippet,
    pub uninstall: Snippet,
}

/// A rendered program plus everything produced on the way.
#[derive(Debug)]
pub struct Program {
    pub source: String,
    pub objects: Vec<ProgramObject>,
    /// Objects captured while generating, in install order
    pub registry: Registry,
}

impl Program {
    /// Number of diagnostics across every snippet.
    pub fn diagnostic_count(&self) -> usize {
        self.objects
            .iter()
            .map(|o| o.install.diagnostics.len() + o.uninstall.diagnostics.len())
            .sum()
    }
}

/// Generate install and uninstall snippets for each manifest, in order.
///
/// Install snippets go through `client` and `registry` as with
/// [`Generator::install`]. Uninstall snippets are rendered only, never
/// applied. Variables are deduplicated by suffixing `_1`, `_2`, ...
///
/// # Errors
///
/// Stops at the first object whose install or uninstall fails.
pub fn codify_manifests(
    generator: &Generator,
    manifests: Vec<Manifest>,
    registry: &mut Registry,
    client: Option<&dyn ResourceClient>,
) -> Result<Vec<ProgramObject>, GenerateError> {
    let mut seen = HashSet::new();
    manifests
        .into_iter()
        .map(|manifest| match manifest {
            Manifest::PersistentVolumeClaim(o) => {
                codify_one(generator, o, &mut seen, registry, client)
            }
            Manifest::ConfigMap(o) => codify_one(generator, o, &mut seen, registry, client),
        })
        .collect()
}

fn codify_one<K: Codify>(
    generator: &Generator,
    object: K,
    seen: &mut HashSet<String>,
    registry: &mut Registry,
    client: Option<&dyn ResourceClient>,
) -> Result<ProgramObject, GenerateError> {
    let mut codified = generator.codify(object);
    let variable = unique_variable(seen, codified.variable());
    codified.set_variable(variable.clone());

    let install = generator.install(&mut codified, registry, client)?;
    let uninstall = generator.uninstall(&mut codified, None)?;
    Ok(ProgramObject {
        kind: K::KIND,
        name: codified.object().name().to_string(),
        variable,
        install,
        uninstall,
    })
}

fn unique_variable(seen: &mut HashSet<String>, variable: &str) -> String {
    if seen.insert(variable.to_string()) {
        return variable.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{variable}_{counter}");
        if seen.insert(candidate.clone()) {
            warn!(variable, renamed = %candidate, "duplicate variable name");
            return candidate;
        }
        counter += 1;
    }
}

/// `my-cluster` -> `MyCluster`
pub fn struct_name(name: &str) -> String {
    let camel: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    match camel.chars().next() {
        None => DEFAULT_STRUCT_NAME.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{DEFAULT_STRUCT_NAME}{camel}"),
        Some(_) => camel,
    }
}

/// Render a program named `name` for `manifests`. `origin` names the input in
/// the generated header.
///
/// No client is involved: the program's own `install` performs the creates
/// when it runs.
pub fn generate_program(
    generator: &Generator,
    name: &str,
    origin: &str,
    manifests: Vec<Manifest>,
) -> anyhow::Result<Program> {
    let mut registry = Registry::new();
    let objects = codify_manifests(generator, manifests, &mut registry, None)
        .context("Failed to generate snippets")?;

    let packages: BTreeSet<String> = objects
        .iter()
        .flat_map(|o| o.install.packages.iter().cloned())
        .collect();
    let struct_name = struct_name(name);
    let source = ProgramTemplate {
        origin,
        struct_name: &struct_name,
        uses: use_declarations(&packages, &generator.config().aliases),
        installs: objects.iter().map(|o| o.install.text.as_str()).collect(),
        uninstalls: objects
            .iter()
            .rev()
            .map(|o| o.uninstall.text.as_str())
            .collect(),
    }
    .render()
    .context("Failed to render program")?;

    info!(
        program = %struct_name,
        objects = objects.len(),
        "generated program"
    );
    Ok(Program {
        source,
        objects,
        registry,
    })
}
