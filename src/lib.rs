//! # kodify
//!
//! **kodify** turns Kubernetes objects into Rust source that rebuilds them:
//! a literal construction expression for the object, plus install and
//! uninstall snippets that register, create and delete it.
//!
//! ## Overview
//!
//! A captured object usually carries state the API server added (uid,
//! resource version, status, managed fields). kodify strips that, encodes
//! what is left as a deterministic Rust literal and wraps the literal in a
//! user-overridable template.
//!
//! ## Architecture
//!
//! - **[`normalize`]** - clears server-managed metadata and sanitizes names
//! - **[`literal`]** - encodes any `Serialize` value as a Rust literal expression
//! - **[`alias`]** - rewrites package paths to short aliases outside strings and comments
//! - **[`codify`]** - per-kind normalization and the install/uninstall [`Generator`]
//! - **[`program`]** - wraps a manifest's snippets into one generated module
//! - **[`manifest`]** - reads multi-document YAML/JSON into typed objects
//! - **[`registry`]** / **[`client`]** - where generated objects go
//! - **[`config`]** / **[`logging`]** - TOML configuration and `tracing` setup
//! - **[`cli`]** - the `kodify` binary
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(kodify)
//!     participant Manifest as manifest::load
//!     participant Gen as codify::Generator
//!     participant Lit as literal::Literal
//!     participant Prog as program::generate_program
//!
//!     User->>CLI: kodify generate --file cluster.yaml
//!     CLI->>Manifest: load("cluster.yaml")
//!     Manifest-->>CLI: Vec<Manifest>
//!     CLI->>Prog: generate_program(generator, name, manifests)
//!     loop each object
//!         Prog->>Gen: codify(object)
//!         Gen->>Gen: normalize, derive variable
//!         Prog->>Gen: install / uninstall
//!         Gen->>Lit: encode(object)
//!         Lit-->>Gen: literal + packages + diagnostics
//!         Gen-->>Prog: Snippet
//!     end
//!     Prog-->>CLI: rendered module
//!     CLI-->>User: stdout or --output file
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use kodify::api::core::v1::ConfigMap;
//! use kodify::api::meta::v1::ObjectMeta;
//! use kodify::{Generator, Registry};
//!
//! let object = ConfigMap {
//!     metadata: ObjectMeta {
//!         name: Some("settings".to_string()),
//!         uid: Some("5f0c".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let generator = Generator::default();
//! let mut codified = generator.codify(object);
//! let mut registry = Registry::new();
//! let snippet = generator.install(&mut codified, &mut registry, None).unwrap();
//!
//! assert!(snippet.text.contains("let settings_config_map = corev1::ConfigMap {"));
//! assert!(!snippet.text.contains("uid"));
//! assert_eq!(registry.len(), 1);
//! ```

pub mod alias;
pub mod api;
pub mod cli;
pub mod client;
pub mod codify;
pub mod config;
pub mod error;
pub mod literal;
pub mod logging;
pub mod manifest;
pub mod normalize;
pub mod program;
pub mod registry;
pub mod resource;

pub use client::ResourceClient;
pub use codify::{Codified, Codify, Diagnostic, Generator, Snippet};
pub use config::{ErrorPolicy, GeneratorConfig};
pub use error::{EncodingError, GenerateError, RemoteOperationError, TemplateError};
pub use literal::{Literal, SymbolTable};
pub use registry::Registry;
pub use resource::{DynamicObject, Resource};
