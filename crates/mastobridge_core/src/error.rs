//! Error taxonomy for the compatibility layer.
//!
//! # Responsibility
//! - Give every failing conversion one semantic error class.
//! - Map error classes onto the HTTP status the gateway should surface.
//!
//! # Invariants
//! - Missing native entities are `NotFound`, never a generic fault.
//! - Partial degradation is logged by callers and never returned as `Err`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Native entity family referenced by a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Note,
    Notification,
    List,
    Filter,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Note => "note",
            Self::Notification => "notification",
            Self::List => "list",
            Self::Filter => "filter",
        }
    }
}

/// Classification of failures, including the non-fatal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidId,
    UpstreamUnavailable,
    /// One mention/emoji/field failed; the enclosing conversion still succeeds.
    PartialDegradation,
}

/// Crate-wide error for conversion and request translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Referenced native entity does not exist.
    NotFound { kind: EntityKind, id: String },
    /// Id string rejected by the codec.
    InvalidId(String),
    /// A collaborator failed for infrastructural reasons.
    UpstreamUnavailable(String),
    /// Malformed wire request parameter other than an id.
    InvalidInput(String),
}

impl BridgeError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidId(_) | Self::InvalidInput(_) => ErrorKind::InvalidId,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }

    /// HTTP status the gateway should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidId(_) | Self::InvalidInput(_) => 400,
            Self::UpstreamUnavailable(_) => 503,
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidId(_) => "invalid_id",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
            Self::InvalidId(value) => write!(f, "invalid id: `{value}`"),
            Self::UpstreamUnavailable(message) => write!(f, "upstream unavailable: {message}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for BridgeError {}
