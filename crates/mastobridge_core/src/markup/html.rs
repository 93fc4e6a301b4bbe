//! Default HTML renderer for parsed markup.

use super::escape::escape_html;
use super::{MarkupNode, MarkupRenderer};
use crate::error::BridgeResult;
use crate::model::note::MentionedRemoteUser;
use async_trait::async_trait;

const EXTERNAL_LINK_ATTRS: &str = r#"rel="nofollow noopener noreferrer" target="_blank""#;

/// Renders markup into the HTML subset external clients display.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    base_url: String,
    local_host: String,
}

impl HtmlRenderer {
    /// `base_url` is the local instance URL, e.g. `https://example.social`.
    /// The local host is taken from its authority part.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let local_host = strip_scheme(&base_url)
            .split('/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self {
            base_url,
            local_host,
        }
    }

    fn is_local_host(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.local_host)
            || self
                .local_host
                .split_once(':')
                .is_some_and(|(bare, _)| host.eq_ignore_ascii_case(bare))
    }

    /// Synchronous rendering entry point shared by the async contract.
    pub fn render_html(
        &self,
        nodes: &[MarkupNode],
        mentioned_remote_users: &[MentionedRemoteUser],
        inline: bool,
        quote_uri: Option<&str>,
    ) -> String {
        let mut out = String::new();
        self.render_children(nodes, mentioned_remote_users, &mut out);

        if let Some(uri) = quote_uri {
            out.push_str(r#"<span class="quote-inline"><br><br>RE: "#);
            out.push_str(&format!(
                r#"<a href="{}">{}</a></span>"#,
                escape_html(uri),
                escape_html(strip_scheme(uri))
            ));
        }

        if inline {
            out
        } else {
            format!("<p>{out}</p>")
        }
    }

    fn render_children(
        &self,
        nodes: &[MarkupNode],
        remote: &[MentionedRemoteUser],
        out: &mut String,
    ) {
        for node in nodes {
            self.render_node(node, remote, out);
        }
    }

    fn wrap(
        &self,
        tag: &str,
        children: &[MarkupNode],
        remote: &[MentionedRemoteUser],
        out: &mut String,
    ) {
        out.push_str(&format!("<{tag}>"));
        self.render_children(children, remote, out);
        out.push_str(&format!("</{tag}>"));
    }

    fn render_node(&self, node: &MarkupNode, remote: &[MentionedRemoteUser], out: &mut String) {
        match node {
            MarkupNode::Text(text) => push_text_with_breaks(text, out),
            MarkupNode::Bold(children) => self.wrap("b", children, remote, out),
            MarkupNode::Italic(children) => self.wrap("i", children, remote, out),
            MarkupNode::Strike(children) => self.wrap("del", children, remote, out),
            MarkupNode::Small(children) => self.wrap("small", children, remote, out),
            MarkupNode::Center(children) => self.wrap("div", children, remote, out),
            MarkupNode::Quote(children) => self.wrap("blockquote", children, remote, out),
            MarkupNode::Plain(children) => self.wrap("span", children, remote, out),
            MarkupNode::Fn { children, .. } => self.wrap("i", children, remote, out),
            MarkupNode::InlineCode(code) | MarkupNode::MathInline(code) => {
                out.push_str(&format!("<code>{}</code>", escape_html(code)));
            }
            MarkupNode::MathBlock(formula) => {
                out.push_str(&format!("<code>{}</code>", escape_html(formula)));
            }
            MarkupNode::BlockCode { code, .. } => {
                out.push_str("<pre><code>");
                push_text_with_breaks(code, out);
                out.push_str("</code></pre>");
            }
            MarkupNode::Mention {
                username,
                host,
                acct,
            } => self.render_mention(username, host.as_deref(), acct, remote, out),
            MarkupNode::Hashtag(tag) => {
                out.push_str(&format!(
                    r#"<a href="{}/tags/{}" rel="tag" class="hashtag">#{}</a>"#,
                    self.base_url,
                    escape_html(tag),
                    escape_html(tag)
                ));
            }
            MarkupNode::Url(url) => {
                out.push_str(&format!(
                    r#"<a {EXTERNAL_LINK_ATTRS} href="{}">{}</a>"#,
                    escape_html(url),
                    escape_html(strip_scheme(url))
                ));
            }
            MarkupNode::Link { url, children } => {
                out.push_str(&format!(
                    r#"<a {EXTERNAL_LINK_ATTRS} href="{}">"#,
                    escape_html(url)
                ));
                self.render_children(children, remote, out);
                out.push_str("</a>");
            }
            MarkupNode::EmojiCode(name) => {
                out.push_str(&format!("\u{200B}:{}:\u{200B}", escape_html(name)));
            }
            MarkupNode::UnicodeEmoji(emoji) => out.push_str(&escape_html(emoji)),
            MarkupNode::Search { query, content } => {
                out.push_str(&format!(
                    r#"<a href="https://www.google.com/search?q={}">{}</a>"#,
                    escape_html(query),
                    escape_html(content)
                ));
            }
        }
    }

    fn render_mention(
        &self,
        username: &str,
        host: Option<&str>,
        acct: &str,
        remote: &[MentionedRemoteUser],
        out: &mut String,
    ) {
        let host = host.filter(|host| !self.is_local_host(host));
        let href = match host {
            Some(host) => remote
                .iter()
                .find(|user| user.username == username && user.host == host)
                .map(|user| user.url.clone().unwrap_or_else(|| user.uri.clone())),
            None => Some(format!("{}/@{}", self.base_url, username)),
        };

        match href {
            Some(href) => out.push_str(&format!(
                r#"<span class="h-card" translate="no"><a href="{}" class="u-url mention">@<span>{}</span></a></span>"#,
                escape_html(&href),
                escape_html(username)
            )),
            None => out.push_str(&escape_html(acct)),
        }
    }
}

#[async_trait]
impl MarkupRenderer for HtmlRenderer {
    async fn render(
        &self,
        nodes: &[MarkupNode],
        mentioned_remote_users: &[MentionedRemoteUser],
        inline: bool,
        quote_uri: Option<&str>,
    ) -> BridgeResult<String> {
        Ok(self.render_html(nodes, mentioned_remote_users, inline, quote_uri))
    }
}

fn push_text_with_breaks(text: &str, out: &mut String) {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    for (index, line) in normalized.split('\n').enumerate() {
        if index > 0 {
            out.push_str("<br>");
        }
        out.push_str(&escape_html(line));
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}
