//! Minimal HTML building.
//!
//! Markup is assembled as strings; [`Html`] marks text that is already
//! safe to emit, and every piece of data goes through [`escape`] first.

use std::fmt;

/// A fragment of trusted markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap markup that is known to be safe.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape `text` into a fragment.
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    /// Wrap `inner` in `<tag>…</tag>`.
    pub fn element(tag: &str, inner: Html) -> Self {
        Self(format!("<{tag}>{}</{tag}>", inner.0))
    }

    pub fn push(&mut self, other: Html) {
        self.0.push_str(&other.0);
    }

    pub fn push_raw(&mut self, markup: &str) {
        self.0.push_str(markup);
    }

    pub fn push_text(&mut self, text: &str) {
        self.0.push_str(&escape(text));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Html> for Html {
    fn from_iter<I: IntoIterator<Item = Html>>(iter: I) -> Self {
        let mut out = Html::new();
        for fragment in iter {
            out.push(fragment);
        }
        out
    }
}

/// Escape text for element content and double-quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `<a href="…">label</a>`; `href` is escaped as an attribute.
pub fn anchor(href: &str, label: Html) -> Html {
    Html(format!("<a href=\"{}\">{}</a>", escape(href), label.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn anchor_escapes_href() {
        let a = anchor("/ws/diff?a=1&b=2", Html::text("Diff"));
        assert_eq!(a.as_str(), "<a href=\"/ws/diff?a=1&amp;b=2\">Diff</a>");
    }

    #[test]
    fn fragments_concatenate() {
        let joined: Html = ["a", "<b>"].iter().map(|t| Html::text(t)).collect();
        assert_eq!(joined.as_str(), "a&lt;b&gt;");
    }

    #[test]
    fn element_wraps_inner_markup() {
        assert_eq!(Html::element("li", Html::text("x")).as_str(), "<li>x</li>");
    }
}
