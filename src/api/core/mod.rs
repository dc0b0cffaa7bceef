//! Core API group (`v1`).

pub mod v1;
