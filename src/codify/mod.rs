//! # Codify Module
//!
//! Turns normalized API objects into install and uninstall snippets.
//!
//! ## Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Gen as Generator
//!     participant Lit as literal::Literal
//!     participant Tpl as Templates
//!     participant Client as ResourceClient
//!     participant Reg as Registry
//!
//!     Caller->>Gen: install(&mut codified, &mut registry, client)
//!     Gen->>Gen: sanitize object name
//!     Gen->>Lit: encode(object, symbols, encode_errors)
//!     Lit-->>Gen: expr tree, packages, diagnostics
//!     Gen->>Gen: alias symbols, render literal
//!     Gen->>Tpl: render_install(context)
//!     Tpl-->>Gen: text (or TemplateError)
//!     opt client present
//!         Gen->>Client: create(namespace, object)
//!         Client-->>Gen: Err(E) aborts, registry untouched
//!     end
//!     Gen->>Reg: push(object)
//!     Gen-->>Caller: Snippet { text, packages, diagnostics }
//! ```
//!
//! Each supported kind implements [`Codify`], which adds kind-specific
//! clearing on top of [`crate::normalize::clean_object_meta`].

mod config_map;
mod persistent_volume_claim;
mod templates;

pub use templates::{
    SnippetContext, Templates, INSTALL_TEMPLATE, LITERAL_INDENT, UNINSTALL_TEMPLATE,
};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, warn};

use crate::alias;
use crate::client::ResourceClient;
use crate::config::{ErrorPolicy, GeneratorConfig};
use crate::error::{EncodingError, GenerateError, TemplateError};
use crate::literal::{Literal, SymbolTable};
use crate::normalize::{sanitize_object_name, variable_name, NormalizeOptions};
use crate::registry::Registry;
use crate::resource::{DynamicObject, Resource};

/// A kind the generator can emit snippets for.
pub trait Codify: Resource {
    /// Appended to the object name to form its variable (`data` ->
    /// `data_persistent_volume_claim`)
    const VARIABLE_SUFFIX: &'static str;

    /// Clear server-managed and environment-dependent fields in place.
    ///
    /// Must be idempotent.
    fn normalize(&mut self, options: &NormalizeOptions);
}

/// A normalized object together with its generated variable name.
///
/// The object is owned: normalization and name sanitization rewrite it, so
/// the caller's original is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Codified<K> {
    object: K,
    variable: String,
}

impl<K: Codify> Codified<K> {
    /// Normalize `object` and derive its variable name from the declared name.
    pub fn new(mut object: K, options: &NormalizeOptions) -> Self {
        object.normalize(options);
        let variable = variable_name(object.name(), K::VARIABLE_SUFFIX);
        Self { object, variable }
    }

    pub fn object(&self) -> &K {
        &self.object
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Bind the object to a different variable, e.g. to keep names unique
    /// within one generated program.
    pub fn set_variable(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
    }

    pub fn into_inner(self) -> K {
        self.object
    }

    /// Rewrite the object's name into a valid object name, returning it.
    fn sanitize_name(&mut self) -> String {
        let name = sanitize_object_name(self.object.name());
        self.object.metadata_mut().name = Some(name.clone());
        name
    }
}

/// A problem that did not stop generation.
#[derive(Debug)]
pub enum Diagnostic {
    /// A field was replaced by `Default::default()`
    Encoding(EncodingError),
    /// The template failed; the snippet text is empty
    Template(TemplateError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Encoding(e) => write!(f, "encoding: {e}"),
            Diagnostic::Template(e) => write!(f, "{e}"),
        }
    }
}

/// Rendered text for one lifecycle operation.
#[derive(Debug, Default)]
pub struct Snippet {
    pub text: String,
    /// Packages the literal references, as full paths before aliasing.
    /// Empty for uninstall.
    pub packages: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Snippet {
    /// `use` lines the embedding program needs for `aliases`.
    ///
    /// Packages without an alias are spelled out in full in the text and need
    /// no import.
    pub fn use_declarations(&self, aliases: &BTreeMap<String, String>) -> Vec<String> {
        use_declarations(&self.packages, aliases)
    }
}

/// `use` lines for every package in `packages` that has an alias.
pub fn use_declarations(
    packages: &BTreeSet<String>,
    aliases: &BTreeMap<String, String>,
) -> Vec<String> {
    packages
        .iter()
        .filter_map(|package| {
            aliases
                .get(package)
                .map(|alias| format!("use {package} as {alias};"))
        })
        .collect()
}

/// Renders install and uninstall snippets and applies them through an
/// optional live client.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    symbols: SymbolTable,
    templates: Templates,
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_templates(GeneratorConfig::default(), Templates::default())
    }
}

impl Generator {
    /// Generator for `config`, reading any template overrides it names.
    pub fn new(config: GeneratorConfig) -> anyhow::Result<Self> {
        let templates = Templates::load(&config.templates)?;
        Ok(Self::with_templates(config, templates))
    }

    /// Generator with explicit templates; `config.templates` is ignored.
    pub fn with_templates(config: GeneratorConfig, templates: Templates) -> Self {
        Self {
            config,
            symbols: SymbolTable::builtin(),
            templates,
        }
    }

    /// Replace the symbol table used to resolve type names.
    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Normalize `object` with this generator's options.
    pub fn codify<K: Codify>(&self, object: K) -> Codified<K> {
        Codified::new(object, &NormalizeOptions::from(&self.config))
    }

    /// Install snippet for `codified`.
    ///
    /// Sanitizes the object's name, encodes the object and renders the
    /// install template. With a client, the object is created right away;
    /// only once that succeeds (or with no client) is it appended to
    /// `registry`.
    ///
    /// The registry receives exactly what the generated code builds: an
    /// object without a namespace keeps none, and the configured default
    /// namespace only reaches the create call.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Remote`] when the client's create fails; nothing
    ///   is appended to `registry`
    /// - [`GenerateError::Encoding`] / [`GenerateError::Template`] when the
    ///   matching policy is [`ErrorPolicy::Fail`]
    /// - [`GenerateError::Object`] when the object cannot be captured as a
    ///   [`DynamicObject`]
    pub fn install<K: Codify>(
        &self,
        codified: &mut Codified<K>,
        registry: &mut Registry,
        client: Option<&dyn ResourceClient>,
    ) -> Result<Snippet, GenerateError> {
        let name = codified.sanitize_name();
        let namespace = self.namespace_of(&codified.object);

        let mut literal = Literal::encode(
            &codified.object,
            &self.symbols,
            self.config.encode_errors,
        )?;
        let packages = literal.packages().clone();
        for (prefix, short) in &self.config.aliases {
            literal.alias(prefix, short);
        }
        let source = literal.expr().render(LITERAL_INDENT);
        let mut diagnostics: Vec<Diagnostic> = literal
            .into_diagnostics()
            .into_iter()
            .map(Diagnostic::Encoding)
            .collect();
        if !diagnostics.is_empty() {
            warn!(
                kind = K::KIND,
                name = %name,
                count = diagnostics.len(),
                "literal contains placeholders for unencodable fields"
            );
        }

        let cx = SnippetContext {
            variable: &codified.variable,
            namespace: &namespace,
            name: &name,
            kind: K::KIND,
            literal: &source,
        };
        let text = self.finish_text(self.templates.render_install(&cx), &mut diagnostics)?;

        let object = DynamicObject::from_resource(&codified.object)?;

        if let Some(client) = client {
            client.create(&namespace, &object)?;
            info!(kind = K::KIND, namespace = %namespace, name = %name, "created object");
        }
        registry.push(object);
        debug!(
            kind = K::KIND,
            name = %name,
            variable = %codified.variable,
            "rendered install snippet"
        );

        Ok(Snippet {
            text,
            packages,
            diagnostics,
        })
    }

    /// Uninstall snippet for `codified`; with a client, the object is
    /// deleted right away.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Remote`] when the client's delete fails
    /// - [`GenerateError::Template`] under [`ErrorPolicy::Fail`]
    pub fn uninstall<K: Codify>(
        &self,
        codified: &mut Codified<K>,
        client: Option<&dyn ResourceClient>,
    ) -> Result<Snippet, GenerateError> {
        let name = codified.sanitize_name();
        let namespace = self.namespace_of(&codified.object);

        let cx = SnippetContext {
            variable: &codified.variable,
            namespace: &namespace,
            name: &name,
            kind: K::KIND,
            literal: "",
        };
        let mut diagnostics = Vec::new();
        let text = self.finish_text(self.templates.render_uninstall(&cx), &mut diagnostics)?;

        if let Some(client) = client {
            client.delete(K::KIND, &namespace, &name)?;
            info!(kind = K::KIND, namespace = %namespace, name = %name, "deleted object");
        }

        Ok(Snippet {
            text,
            packages: BTreeSet::new(),
            diagnostics,
        })
    }

    fn namespace_of<K: Resource>(&self, object: &K) -> String {
        match object.namespace() {
            Some(ns) if !ns.is_empty() => ns.to_string(),
            _ => self.config.default_namespace.clone(),
        }
    }

    /// Apply the template error policy and alias template-authored paths.
    fn finish_text(
        &self,
        rendered: Result<String, TemplateError>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<String, TemplateError> {
        let text = match rendered {
            Ok(text) => text,
            Err(err) if self.config.template_errors == ErrorPolicy::Tolerate => {
                warn!(error = %err, "template failed, emitting empty snippet");
                diagnostics.push(Diagnostic::Template(err));
                return Ok(String::new());
            }
            Err(err) => return Err(err),
        };
        Ok(self
            .config
            .aliases
            .iter()
            .fold(text, |text, (prefix, short)| alias::rewrite(&text, prefix, short)))
    }
}
