//! Markup collaborator contract and default implementation.
//!
//! # Responsibility
//! - Define the parsed markup tree as a closed tagged enum.
//! - Define the parse/render contracts the converter consumes.
//! - Provide a regex-based parser and an HTML renderer usable as defaults.
//!
//! # Invariants
//! - Rendering dispatches on `MarkupNode` with an exhaustive `match`; adding a
//!   node kind fails to compile until every renderer handles it.
//! - Renderers never emit unescaped user text.

mod escape;
mod html;
mod parser;

pub use escape::{escape_html, escape_markup};
pub use html::HtmlRenderer;
pub use parser::SimpleMarkupParser;

use crate::error::BridgeResult;
use crate::model::note::MentionedRemoteUser;
use async_trait::async_trait;

/// Parsed markup tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Text(String),
    Bold(Vec<MarkupNode>),
    Italic(Vec<MarkupNode>),
    Strike(Vec<MarkupNode>),
    Small(Vec<MarkupNode>),
    Center(Vec<MarkupNode>),
    Quote(Vec<MarkupNode>),
    Plain(Vec<MarkupNode>),
    /// Animation/effect function; rendered as its children.
    Fn {
        name: String,
        children: Vec<MarkupNode>,
    },
    InlineCode(String),
    BlockCode {
        code: String,
        lang: Option<String>,
    },
    MathInline(String),
    MathBlock(String),
    Mention {
        username: String,
        host: Option<String>,
        acct: String,
    },
    Hashtag(String),
    Url(String),
    Link {
        url: String,
        children: Vec<MarkupNode>,
    },
    EmojiCode(String),
    UnicodeEmoji(String),
    Search {
        query: String,
        content: String,
    },
}

/// Turns native markup text into a node tree.
pub trait MarkupParser: Send + Sync {
    fn parse(&self, text: &str) -> Vec<MarkupNode>;
}

/// Renders a node tree into wire HTML.
#[async_trait]
pub trait MarkupRenderer: Send + Sync {
    /// Renders `nodes`.
    ///
    /// - `mentioned_remote_users` resolves remote mentions to profile links.
    /// - `inline` skips the outer `<p>` wrapper.
    /// - `quote_uri` appends a trailing `RE: <link>` backlink when set.
    async fn render(
        &self,
        nodes: &[MarkupNode],
        mentioned_remote_users: &[MentionedRemoteUser],
        inline: bool,
        quote_uri: Option<&str>,
    ) -> BridgeResult<String>;
}
