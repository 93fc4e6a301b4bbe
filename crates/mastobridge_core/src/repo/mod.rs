//! Persistence implementations of collaborator contracts.
//!
//! # Invariants
//! - Repository APIs validate ids before SQL mutations.
//! - Persisted rows that fail to decode are reported, never masked.

pub mod edit_repo;
