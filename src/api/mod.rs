//! # API Model
//!
//! Typed Kubernetes resources that the generator reads and the generated code
//! rebuilds. The layout follows the upstream API groups so that a rendered
//! literal such as `kodify::api::core::v1::PersistentVolumeClaim { .. }`
//! names the same type it was captured from.
//!
//! Conventions shared by every type in this tree:
//!
//! - Rust fields are snake_case, wire names are camelCase (`#[serde(rename_all = "camelCase")]`)
//! - fields whose wire name is a Rust keyword carry a trailing underscore (`type_`)
//! - optional fields are `Option<T>` and skipped when `None`
//! - every type implements `Default`, which the literal encoder relies on for
//!   `..Default::default()`

pub mod core;
pub mod meta;
