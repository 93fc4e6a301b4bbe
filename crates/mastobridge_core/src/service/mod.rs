//! Request-parameter translation for the wire API.
//!
//! # Responsibility
//! - Convert wire ids echoed by clients in paths and pagination cursors
//!   back to native ids.
//! - Translate notification type filters through the reverse crosswalk.
//! - Clamp page sizes.
//!
//! # Invariants
//! - An invalid id in any position fails the whole request with `InvalidId`.
//! - Unknown external notification type names are ignored, not rejected.

pub mod params;

pub use params::{
    resolve_wire_id, NativeNotificationQuery, NativePage, NotificationParams, TimelineParams,
};
