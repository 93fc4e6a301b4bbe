//! Static crosswalks between native and external enumerations.
//!
//! # Responsibility
//! - Map native notification types onto the smaller external vocabulary.
//! - Translate external notification filters back into native terms.
//! - Map note visibility in both directions.
//!
//! # Invariants
//! - Native → external is total and may be many-to-one.
//! - External → native is total over the external vocabulary, not onto.
//! - Both directions are plain tables; lookups never branch on strings.

use serde::{Deserialize, Serialize};

/// Native notification vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NativeNotificationType {
    Note,
    Follow,
    Mention,
    Reply,
    Renote,
    Quote,
    Reaction,
    PollEnded,
    Edited,
    ReceiveFollowRequest,
    FollowRequestAccepted,
    RoleAssigned,
    AchievementEarned,
    App,
    Test,
}

impl NativeNotificationType {
    pub const ALL: [NativeNotificationType; 15] = [
        Self::Note,
        Self::Follow,
        Self::Mention,
        Self::Reply,
        Self::Renote,
        Self::Quote,
        Self::Reaction,
        Self::PollEnded,
        Self::Edited,
        Self::ReceiveFollowRequest,
        Self::FollowRequestAccepted,
        Self::RoleAssigned,
        Self::AchievementEarned,
        Self::App,
        Self::Test,
    ];

    /// Native wire name as stored in the native system.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::Reply => "reply",
            Self::Renote => "renote",
            Self::Quote => "quote",
            Self::Reaction => "reaction",
            Self::PollEnded => "pollEnded",
            Self::Edited => "edited",
            Self::ReceiveFollowRequest => "receiveFollowRequest",
            Self::FollowRequestAccepted => "followRequestAccepted",
            Self::RoleAssigned => "roleAssigned",
            Self::AchievementEarned => "achievementEarned",
            Self::App => "app",
            Self::Test => "test",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// External (Mastodon dialect) notification vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalNotificationType {
    Follow,
    FollowRequest,
    Mention,
    Reblog,
    Favourite,
    Reaction,
    Poll,
    Status,
    Update,
}

impl ExternalNotificationType {
    pub const ALL: [ExternalNotificationType; 9] = [
        Self::Follow,
        Self::FollowRequest,
        Self::Mention,
        Self::Reblog,
        Self::Favourite,
        Self::Reaction,
        Self::Poll,
        Self::Status,
        Self::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::FollowRequest => "follow_request",
            Self::Mention => "mention",
            Self::Reblog => "reblog",
            Self::Favourite => "favourite",
            Self::Reaction => "reaction",
            Self::Poll => "poll",
            Self::Status => "status",
            Self::Update => "update",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// How faithfully one native type is represented externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fidelity {
    Exact,
    /// Nearest semantic neighbour (e.g. accepted follow request → follow).
    Approximate,
    /// No counterpart; the fallback entry is used.
    Fallback,
}

/// External type used for native types without any counterpart.
pub const FALLBACK_EXTERNAL_TYPE: ExternalNotificationType = ExternalNotificationType::Status;

const NATIVE_TO_EXTERNAL: &[(NativeNotificationType, ExternalNotificationType, Fidelity)] = &[
    (NativeNotificationType::Note, ExternalNotificationType::Status, Fidelity::Exact),
    (NativeNotificationType::Follow, ExternalNotificationType::Follow, Fidelity::Exact),
    (NativeNotificationType::Mention, ExternalNotificationType::Mention, Fidelity::Exact),
    (NativeNotificationType::Reply, ExternalNotificationType::Mention, Fidelity::Approximate),
    (NativeNotificationType::Renote, ExternalNotificationType::Reblog, Fidelity::Exact),
    (NativeNotificationType::Quote, ExternalNotificationType::Reblog, Fidelity::Approximate),
    (NativeNotificationType::Reaction, ExternalNotificationType::Reaction, Fidelity::Exact),
    (NativeNotificationType::PollEnded, ExternalNotificationType::Poll, Fidelity::Exact),
    (NativeNotificationType::Edited, ExternalNotificationType::Update, Fidelity::Exact),
    (
        NativeNotificationType::ReceiveFollowRequest,
        ExternalNotificationType::FollowRequest,
        Fidelity::Exact,
    ),
    (
        NativeNotificationType::FollowRequestAccepted,
        ExternalNotificationType::Follow,
        Fidelity::Approximate,
    ),
    (NativeNotificationType::RoleAssigned, FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback),
    (NativeNotificationType::AchievementEarned, FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback),
    (NativeNotificationType::App, FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback),
    (NativeNotificationType::Test, FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback),
];

const EXTERNAL_TO_NATIVE: &[(ExternalNotificationType, &[NativeNotificationType])] = &[
    (
        ExternalNotificationType::Follow,
        &[
            NativeNotificationType::Follow,
            NativeNotificationType::FollowRequestAccepted,
        ],
    ),
    (
        ExternalNotificationType::FollowRequest,
        &[NativeNotificationType::ReceiveFollowRequest],
    ),
    (
        ExternalNotificationType::Mention,
        &[NativeNotificationType::Mention, NativeNotificationType::Reply],
    ),
    (
        ExternalNotificationType::Reblog,
        &[NativeNotificationType::Renote, NativeNotificationType::Quote],
    ),
    (
        ExternalNotificationType::Favourite,
        &[NativeNotificationType::Reaction],
    ),
    (
        ExternalNotificationType::Reaction,
        &[NativeNotificationType::Reaction],
    ),
    (ExternalNotificationType::Poll, &[NativeNotificationType::PollEnded]),
    (ExternalNotificationType::Status, &[NativeNotificationType::Note]),
    (ExternalNotificationType::Update, &[NativeNotificationType::Edited]),
];

/// Native → external lookup with fidelity.
pub fn external_notification_entry(
    native: NativeNotificationType,
) -> (ExternalNotificationType, Fidelity) {
    NATIVE_TO_EXTERNAL
        .iter()
        .find(|(candidate, _, _)| *candidate == native)
        .map(|(_, external, fidelity)| (*external, *fidelity))
        .unwrap_or((FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback))
}

/// Native → external notification type.
pub fn to_external_notification_type(native: NativeNotificationType) -> ExternalNotificationType {
    external_notification_entry(native).0
}

/// External → native notification types (used for `exclude_types`/`types`).
pub fn to_native_notification_types(
    external: ExternalNotificationType,
) -> &'static [NativeNotificationType] {
    EXTERNAL_TO_NATIVE
        .iter()
        .find(|(candidate, _)| *candidate == external)
        .map(|(_, natives)| *natives)
        .unwrap_or(&[])
}

/// Expands a list of external types into a deduplicated native list,
/// preserving first-seen order.
pub fn expand_external_types(external: &[ExternalNotificationType]) -> Vec<NativeNotificationType> {
    let mut expanded = Vec::new();
    for kind in external {
        for native in to_native_notification_types(*kind) {
            if !expanded.contains(native) {
                expanded.push(*native);
            }
        }
    }
    expanded
}

/// Native note visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeVisibility {
    Public,
    Home,
    Followers,
    Specified,
}

/// External status visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalVisibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

impl ExternalVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
            Self::Direct => "direct",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "unlisted" => Some(Self::Unlisted),
            "private" => Some(Self::Private),
            "direct" => Some(Self::Direct),
            _ => None,
        }
    }
}

const VISIBILITY_TABLE: &[(NativeVisibility, ExternalVisibility)] = &[
    (NativeVisibility::Public, ExternalVisibility::Public),
    (NativeVisibility::Home, ExternalVisibility::Unlisted),
    (NativeVisibility::Followers, ExternalVisibility::Private),
    (NativeVisibility::Specified, ExternalVisibility::Direct),
];

pub fn to_external_visibility(native: NativeVisibility) -> ExternalVisibility {
    VISIBILITY_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == native)
        .map(|(_, external)| *external)
        .unwrap_or(ExternalVisibility::Public)
}

pub fn to_native_visibility(external: ExternalVisibility) -> NativeVisibility {
    VISIBILITY_TABLE
        .iter()
        .find(|(_, candidate)| *candidate == external)
        .map(|(native, _)| *native)
        .unwrap_or(NativeVisibility::Public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn native_table_covers_every_native_type_exactly_once() {
        for native in NativeNotificationType::ALL {
            let count = NATIVE_TO_EXTERNAL
                .iter()
                .filter(|(candidate, _, _)| *candidate == native)
                .count();
            assert_eq!(count, 1, "{native:?} must appear exactly once");
        }
        assert_eq!(NATIVE_TO_EXTERNAL.len(), NativeNotificationType::ALL.len());
    }

    #[test]
    fn external_table_covers_every_external_type() {
        for external in ExternalNotificationType::ALL {
            assert!(
                !to_native_notification_types(external).is_empty(),
                "{external:?} must map to at least one native type"
            );
        }
        assert_eq!(EXTERNAL_TO_NATIVE.len(), ExternalNotificationType::ALL.len());
    }

    #[test]
    fn reverse_entries_map_forward_to_the_same_external_type() {
        for (external, natives) in EXTERNAL_TO_NATIVE {
            for native in *natives {
                let forward = to_external_notification_type(*native);
                // `favourite` filters also match native reactions.
                let alias_ok = *external == ExternalNotificationType::Favourite
                    && forward == ExternalNotificationType::Reaction;
                assert!(forward == *external || alias_ok, "{native:?} -> {forward:?}");
            }
        }
    }

    #[test]
    fn native_only_types_are_never_produced_by_the_reverse_direction() {
        let produced: HashSet<NativeNotificationType> = ExternalNotificationType::ALL
            .into_iter()
            .flat_map(|kind| to_native_notification_types(kind).iter().copied())
            .collect();
        for native_only in [
            NativeNotificationType::AchievementEarned,
            NativeNotificationType::App,
            NativeNotificationType::RoleAssigned,
            NativeNotificationType::Test,
        ] {
            assert!(!produced.contains(&native_only));
            assert_eq!(
                external_notification_entry(native_only),
                (FALLBACK_EXTERNAL_TYPE, Fidelity::Fallback)
            );
        }
    }

    #[test]
    fn reactions_keep_their_own_external_type() {
        assert_eq!(
            external_notification_entry(NativeNotificationType::Reaction),
            (ExternalNotificationType::Reaction, Fidelity::Exact)
        );
        assert_eq!(
            to_native_notification_types(ExternalNotificationType::Favourite),
            &[NativeNotificationType::Reaction]
        );
    }

    #[test]
    fn accepted_follow_request_collapses_onto_follow() {
        assert_eq!(
            external_notification_entry(NativeNotificationType::FollowRequestAccepted),
            (ExternalNotificationType::Follow, Fidelity::Approximate)
        );
        assert_eq!(
            to_external_notification_type(NativeNotificationType::Reply),
            ExternalNotificationType::Mention
        );
    }

    #[test]
    fn expand_external_types_deduplicates() {
        let expanded = expand_external_types(&[
            ExternalNotificationType::Favourite,
            ExternalNotificationType::Reaction,
            ExternalNotificationType::Mention,
        ]);
        assert_eq!(
            expanded,
            vec![
                NativeNotificationType::Reaction,
                NativeNotificationType::Mention,
                NativeNotificationType::Reply,
            ]
        );
    }

    #[test]
    fn names_roundtrip_through_parse() {
        for native in NativeNotificationType::ALL {
            assert_eq!(NativeNotificationType::parse(native.as_str()), Some(native));
        }
        for external in ExternalNotificationType::ALL {
            assert_eq!(ExternalNotificationType::parse(external.as_str()), Some(external));
        }
        assert_eq!(ExternalNotificationType::parse("achievementEarned"), None);
    }

    #[test]
    fn visibility_table_is_bijective() {
        for (native, external) in VISIBILITY_TABLE {
            assert_eq!(to_external_visibility(*native), *external);
            assert_eq!(to_native_visibility(*external), *native);
        }
        assert_eq!(to_external_visibility(NativeVisibility::Home), ExternalVisibility::Unlisted);
    }
}
