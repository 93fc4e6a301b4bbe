//! Regex-based parser for the inline subset of native markup.
//!
//! Recognizes urls, mentions, hashtags and `:emoji:` codes; everything else is
//! text. Full block syntax is handled by the native markup service.

use super::{MarkupNode, MarkupParser};
use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<url>https?://[^\s<>"]+)|(?P<mention>@(?P<user>[A-Za-z0-9_]+)(?:@(?P<host>[A-Za-z0-9](?:[A-Za-z0-9.\-]*[A-Za-z0-9])?))?)|(?P<hashtag>#(?P<tag>[^\s#.,!?'":;()\[\]{}<>]+))|(?P<emoji>:(?P<code>[A-Za-z0-9_+\-]+):)"#,
    )
    .expect("valid inline token regex")
});

/// Default `MarkupParser` for notes and profile text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMarkupParser;

impl SimpleMarkupParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for SimpleMarkupParser {
    fn parse(&self, text: &str) -> Vec<MarkupNode> {
        let mut nodes = Vec::new();
        let mut cursor = 0;

        for caps in INLINE_TOKEN_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            // `user@host.tld` inside a word is an address, not a mention.
            let glued_to_word = text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');

            let node = if let Some(url) = caps.name("url") {
                Some(MarkupNode::Url(url.as_str().to_string()))
            } else if caps.name("mention").is_some() && !glued_to_word {
                let username = caps["user"].to_string();
                let host = caps.name("host").map(|m| m.as_str().to_string());
                Some(MarkupNode::Mention {
                    username,
                    host,
                    acct: whole.as_str().to_string(),
                })
            } else if caps.name("hashtag").is_some() && !glued_to_word {
                Some(MarkupNode::Hashtag(caps["tag"].to_string()))
            } else if caps.name("emoji").is_some() {
                Some(MarkupNode::EmojiCode(caps["code"].to_string()))
            } else {
                None
            };

            if let Some(node) = node {
                push_text(&mut nodes, &text[cursor..whole.start()]);
                nodes.push(node);
                cursor = whole.end();
            }
        }

        push_text(&mut nodes, &text[cursor..]);
        nodes
    }
}

fn push_text(nodes: &mut Vec<MarkupNode>, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if let Some(MarkupNode::Text(previous)) = nodes.last_mut() {
        previous.push_str(segment);
        return;
    }
    nodes.push(MarkupNode::Text(segment.to_string()));
}
