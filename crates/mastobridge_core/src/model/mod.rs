//! Native domain projections consumed by the compatibility layer.
//!
//! # Responsibility
//! - Describe the native aggregates exactly as the native store returns them.
//! - Keep native naming; wire naming lives in `entity`.
//!
//! # Invariants
//! - Every aggregate is identified by a native base-36 id string.
//! - These are read-only, per-request values; nothing here is persisted in
//!   wire form.

pub mod edit;
pub mod note;
pub mod notification;
pub mod social;
pub mod user;
