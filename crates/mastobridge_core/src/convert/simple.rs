//! Shallow aggregates that need no collaborator lookups.

use super::format_timestamp;
use crate::entity::{
    Announcement, Attachment, AttachmentMeta, AttachmentType, FeaturedTag, Filter, List, Poll,
    PollOption, Relationship,
};
use crate::error::BridgeResult;
use crate::id::to_wire_id;
use crate::markup::escape_html;
use crate::model::note::{NativeFile, NativePoll};
use crate::model::social::{
    NativeAnnouncement, NativeFeaturedTag, NativeFilter, NativeList, NativeRelation,
};
use chrono::{DateTime, Utc};

pub fn convert_relationship(relation: &NativeRelation) -> BridgeResult<Relationship> {
    Ok(Relationship {
        id: to_wire_id(&relation.id)?,
        following: relation.is_following,
        followed_by: relation.is_followed,
        blocking: relation.is_blocking,
        blocked_by: relation.is_blocked,
        muting: relation.is_muted,
        muting_notifications: relation.is_muted,
        requested: relation.has_pending_follow_request_from_you,
        requested_by: relation.has_pending_follow_request_to_you,
        domain_blocking: false,
        showing_reblogs: !relation.is_renote_muted,
        endorsed: false,
        notifying: false,
    })
}

pub fn convert_list(list: &NativeList) -> BridgeResult<List> {
    Ok(List {
        id: to_wire_id(&list.id)?,
        title: list.name.clone(),
    })
}

pub fn convert_filter(filter: &NativeFilter) -> BridgeResult<Filter> {
    Ok(Filter {
        id: to_wire_id(&filter.id)?,
        phrase: filter.phrase.clone(),
        context: filter.context.clone(),
        expires_at: filter.expires_at.as_ref().map(format_timestamp),
        irreversible: filter.irreversible,
        whole_word: filter.whole_word,
    })
}

/// Announcement content is `<h1>title</h1>text`, both escaped.
pub fn convert_announcement(announcement: &NativeAnnouncement) -> BridgeResult<Announcement> {
    Ok(Announcement {
        id: to_wire_id(&announcement.id)?,
        content: format!(
            "<h1>{}</h1>{}",
            escape_html(&announcement.title),
            escape_html(&announcement.text)
        ),
        starts_at: None,
        ends_at: None,
        published: true,
        all_day: false,
        published_at: format_timestamp(&announcement.created_at),
        updated_at: announcement.updated_at.as_ref().map(format_timestamp),
        read: announcement.is_read,
        reactions: Vec::new(),
    })
}

pub fn convert_featured_tag(tag: &NativeFeaturedTag) -> BridgeResult<FeaturedTag> {
    Ok(FeaturedTag {
        id: to_wire_id(&tag.id)?,
        name: tag.name.clone(),
        statuses_count: tag.notes_count,
        last_status_at: tag.last_note_at.as_ref().map(format_timestamp),
    })
}

fn attachment_type(mime_type: &str) -> AttachmentType {
    if mime_type == "image/gif" {
        return AttachmentType::Gifv;
    }
    match mime_type.split('/').next().unwrap_or_default() {
        "image" => AttachmentType::Image,
        "video" => AttachmentType::Video,
        "audio" => AttachmentType::Audio,
        _ => AttachmentType::Unknown,
    }
}

pub fn convert_attachment(file: &NativeFile) -> BridgeResult<Attachment> {
    let meta = match (file.width, file.height) {
        (None, None) => None,
        (width, height) => Some(AttachmentMeta { width, height }),
    };
    Ok(Attachment {
        id: to_wire_id(&file.id)?,
        kind: attachment_type(&file.mime_type),
        url: file.url.clone(),
        remote_url: Some(file.url.clone()),
        preview_url: file.thumbnail_url.clone(),
        text_url: Some(file.url.clone()),
        meta,
        description: file.comment.clone(),
        blurhash: file.blurhash.clone(),
    })
}

/// Projects the poll embedded in note `note_id`, evaluating expiry at `now`.
///
/// The poll shares the note's wire id.
pub fn convert_poll(poll: &NativePoll, note_id: &str, now: DateTime<Utc>) -> BridgeResult<Poll> {
    let own_votes = poll
        .choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| choice.is_voted)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    Ok(Poll {
        id: to_wire_id(note_id)?,
        expires_at: poll.expires_at.as_ref().map(format_timestamp),
        expired: poll.expires_at.is_some_and(|at| at <= now),
        multiple: poll.multiple,
        votes_count: poll.choices.iter().map(|choice| choice.votes).sum(),
        options: poll
            .choices
            .iter()
            .map(|choice| PollOption {
                title: choice.text.clone(),
                votes_count: choice.votes,
            })
            .collect(),
        voted: !own_votes.is_empty(),
        own_votes,
    })
}
