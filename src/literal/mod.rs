//! # Literal Module
//!
//! Converts `Serialize` values into Rust source that rebuilds them, within
//! the limits listed below.
//!
//! ## Overview
//!
//! The encoder is a `serde::Serializer` whose output is an [`Expr`] tree
//! rather than bytes. serde already exposes every value through the same
//! small set of shapes (scalars, options, sequences, maps, structs, enum
//! variants), so one serializer covers every type without a hand-written
//! case per type.
//!
//! ```text
//! value ──serialize──► Expr tree ──alias──► Expr tree ──render──► source text
//!                          │
//!                          └──► package set (collected from symbol nodes)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kodify::api::core::v1::Quantity;
//! use kodify::config::ErrorPolicy;
//! use kodify::literal::{Literal, SymbolTable};
//!
//! let literal = Literal::encode(
//!     &Some(Quantity("10Gi".to_string())),
//!     &SymbolTable::builtin(),
//!     ErrorPolicy::Fail,
//! )
//! .unwrap();
//! assert_eq!(
//!     literal.source(),
//!     "Some(kodify::api::core::v1::Quantity(\"10Gi\".to_string()))"
//! );
//! assert!(literal.packages().contains("kodify::api::core::v1"));
//! ```
//!
//! ## Limits
//!
//! serde does not tell a `Vec` from other sequences or a `BTreeMap` from
//! other maps. Every sequence renders as `vec![..]`, every tuple (including
//! fixed-size arrays, which serde reports as tuples) as `(..)` and every map
//! as `std::collections::BTreeMap::from([..])`. Fields of type `[T; N]`,
//! `BTreeSet<T>`, `HashMap<K, V>` and the like therefore produce literals
//! that do not type-check.
//!
//! ## Named types
//!
//! serde reports only a bare type name, so named types are resolved through a
//! [`SymbolTable`]. A name missing from the table, or registered as opaque,
//! is an [`crate::EncodingError`]; see [`crate::config::ErrorPolicy`] for how
//! that is handled.

mod encoder;
mod expr;
mod symbols;

pub use encoder::{field_ident, variant_ident, Literal};
pub use expr::{Expr, Symbol, MAP_PACKAGE};
pub use symbols::{SymbolTable, CORE_V1, META_V1};
