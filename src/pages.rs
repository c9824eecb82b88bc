//! Embedded HTML pages. Templating is two placeholder substitutions, which
//! is all the read-only view needs.

/// The create-a-paste page served at `/`.
pub const INDEX: &str = include_str!("../assets/index.html");

/// Error page shared by every unavailable paste.
pub const NOT_FOUND: &str = include_str!("../assets/not_found.html");

const VIEW_TEMPLATE: &str = include_str!("../assets/view.html");

/// Render the read-only HTML view of a paste. Content is escaped, never
/// interpreted as markup.
pub fn render_paste(id: &str, content: &str) -> String {
    VIEW_TEMPLATE
        .replace("{{id}}", &escape_html(id))
        .replace("{{content}}", &escape_html(content))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('&\"')</script>"),
            "&lt;script&gt;alert(&#x27;&amp;&quot;&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn ampersand_is_escaped_first() {
        // must not double-escape the output of other replacements
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn rendered_page_embeds_escaped_content() {
        let page = render_paste("abc-123", "<b>bold?</b>");

        assert!(page.contains("abc-123"));
        assert!(page.contains("&lt;b&gt;bold?&lt;/b&gt;"));
        assert!(!page.contains("<b>bold?</b>"));
    }
}
