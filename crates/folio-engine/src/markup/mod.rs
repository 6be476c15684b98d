//! # Markup
//!
//! Owned snapshot of the markup tree that the parser walks. The parser only
//! needs three things from an element: its tag, its visible text and a named
//! attribute, plus its child elements in document order.
//!
//! - **`html`**: builds [`Element`]s from an HTML document via html5ever

pub mod html;

/// One markup element with its descendants already flattened to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element. Tag names are compared lowercase.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Append a child element. The child's text is appended to ours, the
    /// same way a text walk over the real tree would see it.
    pub fn with_child(mut self, child: Element) -> Self {
        self.text.push_str(&child.text);
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// All descendant text, verbatim.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// A short single-line preview of the text for error messages.
    pub fn snippet(&self) -> String {
        const MAX: usize = 40;
        let collapsed = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= MAX {
            format!("<{}> {collapsed:?}", self.tag)
        } else {
            let cut: String = collapsed.chars().take(MAX).collect();
            format!("<{}> \"{cut}…\"", self.tag)
        }
    }

    pub(crate) fn from_parts(
        tag: String,
        attrs: Vec<(String, String)>,
        text: String,
        children: Vec<Element>,
    ) -> Self {
        Self {
            tag,
            attrs,
            text,
            children,
        }
    }
}
