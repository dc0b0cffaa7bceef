//! Object metadata shared by every kind (`meta/v1`).

pub mod v1;
