//! Markup fragment re-serialization.
//!
//! The content block is re-emitted as markup text, not as a DOM, so
//! tags seen by the extractor have to be rendered back out with their
//! attributes intact.

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape, unescape};

/// An attribute as it appeared in the source tag. `None` means the
/// attribute had no value at all (`<input disabled>`).
pub(crate) type Attr = (String, Option<String>);

/// Render an opening tag with its attributes, in source order.
pub(crate) fn start_tag(name: &str, attrs: &[Attr]) -> String {
    build_tag(name, attrs, false)
}

/// Render a self-closing tag.
pub(crate) fn empty_tag(name: &str, attrs: &[Attr]) -> String {
    build_tag(name, attrs, true)
}

/// Render a closing tag.
pub(crate) fn end_tag(name: &str) -> String {
    format!("</{}>", escape(name))
}

fn build_tag(name: &str, attrs: &[Attr], self_closing: bool) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    result.push('<');
    result.push_str(&escape(name));

    for (key, value) in attrs {
        result.push(' ');
        result.push_str(&escape(key));
        if let Some(value) = value {
            // Values containing a double quote get single-quote
            // delimiters; quote characters are never escaped.
            let quote = if value.contains('"') { '\'' } else { '"' };
            result.push('=');
            result.push(quote);
            result.push_str(&partial_escape(value));
            result.push(quote);
        }
    }

    if self_closing {
        result.push_str(" />");
    } else {
        result.push('>');
    }
    result
}

/// Decode entity and character references in captured text.
///
/// References quick-xml cannot resolve are kept in their escaped form.
pub(crate) fn unescape_text(text: &str) -> String {
    match unescape(text) {
        Ok(Cow::Borrowed(_)) => text.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(key: &str, value: &str) -> Attr {
        (key.to_string(), Some(value.to_string()))
    }

    #[test]
    fn test_start_tag_no_attrs() {
        assert_eq!(start_tag("p", &[]), "<p>");
    }

    #[test]
    fn test_start_tag_with_attrs() {
        let attrs = [attr("class", "userstuff"), attr("id", "chapters")];
        assert_eq!(
            start_tag("div", &attrs),
            r#"<div class="userstuff" id="chapters">"#
        );
    }

    #[test]
    fn test_attr_order_preserved() {
        let attrs = [attr("b", "2"), attr("a", "1")];
        assert_eq!(start_tag("span", &attrs), r#"<span b="2" a="1">"#);
    }

    #[test]
    fn test_attr_value_escaped() {
        let attrs = [attr("alt", "salt & pepper <3")];
        assert_eq!(
            start_tag("img", &attrs),
            r#"<img alt="salt &amp; pepper &lt;3">"#
        );
    }

    #[test]
    fn test_attr_with_double_quote_uses_single_quotes() {
        let attrs = [attr("title", r#"she said "hi""#)];
        assert_eq!(start_tag("a", &attrs), r#"<a title='she said "hi"'>"#);
    }

    #[test]
    fn test_bare_attr() {
        let attrs = [("disabled".to_string(), None)];
        assert_eq!(start_tag("input", &attrs), "<input disabled>");
    }

    #[test]
    fn test_empty_tag() {
        let attrs = [attr("src", "cover.jpg")];
        assert_eq!(empty_tag("img", &attrs), r#"<img src="cover.jpg" />"#);
        assert_eq!(empty_tag("br", &[]), "<br />");
    }

    #[test]
    fn test_end_tag() {
        assert_eq!(end_tag("div"), "</div>");
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text("Fire &amp; Ice"), "Fire & Ice");
        assert_eq!(unescape_text("&#65;&#x42;"), "AB");
        assert_eq!(unescape_text("plain"), "plain");
    }

    #[test]
    fn test_unescape_text_unknown_reference_kept() {
        assert_eq!(unescape_text("a&bogus;b"), "a&bogus;b");
    }
}
