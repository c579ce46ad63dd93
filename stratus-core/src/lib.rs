//! Stratus Core
//!
//! Core library for a cloud-resource lifecycle provider: the resource and
//! state model, the Provider trait driven by a host reconciliation engine,
//! attribute schemas, and key-value tag handling.

pub mod provider;
pub mod resource;
pub mod schema;
pub mod tags;
