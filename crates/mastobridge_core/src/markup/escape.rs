/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape fallback used when markup cannot be rendered: HTML escaping plus
/// backticks, with line breaks turned into `<br>`.
pub fn escape_markup(text: &str) -> String {
    escape_html(text)
        .replace('`', "&#x60;")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::{escape_html, escape_markup};

    #[test]
    fn escapes_html_significant_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn markup_fallback_handles_backticks_and_newlines() {
        assert_eq!(escape_markup("`code`\r\nnext\nline"), "&#x60;code&#x60;<br>next<br>line");
    }
}
