//! # CLI Module
//!
//! Command-line front end for the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Render a whole program from a manifest:
//!
//! ```bash
//! kodify generate --file cluster.yaml --name prod --output src/prod.rs
//! ```
//!
//! Options:
//! - `--file <FILE>` - YAML or JSON manifest, multi-document allowed (required)
//! - `--config <FILE>` - Generator configuration (TOML)
//! - `--output <FILE>` - Write here instead of stdout
//! - `--name <NAME>` - Name of the generated struct (default: cluster)
//! - `--strict` - Fail on the first encoding or template problem
//!
//! ### `snippets`
//!
//! Print each object's install snippet, and optionally its uninstall snippet:
//!
//! ```bash
//! kodify snippets --file claim.yaml --uninstall
//! ```
//!
//! ## Configuration
//!
//! Without `--config`, defaults apply. Either way `KODIFY_ENCODE_ERRORS`,
//! `KODIFY_TEMPLATE_ERRORS` and `KODIFY_DEFAULT_NAMESPACE` override the
//! loaded values, and `--strict` overrides both policies.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use kodify::cli::{run, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run(&cli, &mut std::io::stdout())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
