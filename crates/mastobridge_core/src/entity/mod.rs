//! Wire entities of the external (Mastodon) dialect.
//!
//! # Responsibility
//! - Define the JSON shapes external clients consume and submit.
//!
//! # Invariants
//! - Every `id` field holds a decimal wire id produced by `crate::id`.
//! - Timestamps are ISO-8601 strings with millisecond precision.

pub mod account;
pub mod notification;
pub mod request;
pub mod social;
pub mod status;

pub use account::{Account, AccountSource, Emoji, Field};
pub use notification::Notification;
pub use request::{CredentialSource, FieldAttribute, UpdateCredentialsRequest};
pub use social::{Announcement, Conversation, FeaturedTag, Filter, List, Relationship};
pub use status::{
    Attachment, AttachmentMeta, AttachmentType, Mention, Poll, PollOption, Reaction, Status,
    StatusEdit, Tag,
};
