//! Element categories that drive tokenizing and tree construction.
//!
//! All lookups take a lowercased element name.

/// Elements that never have children or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose contents are raw text up to the matching end tag.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes",
];

/// Raw-text elements whose contents still decode character references.
pub const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "dd",
    "dt",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "ul",
    "xmp",
];

/// Elements that stop the search for an element to close implicitly.
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

pub const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Deepest element nesting the parser builds. Deeper start tags become
/// siblings of the element at this depth.
pub const MAX_NESTING: usize = 512;

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn is_escapable_raw_text(name: &str) -> bool {
    ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn closes_paragraph(name: &str) -> bool {
    CLOSES_PARAGRAPH.contains(&name)
}

pub fn is_scope_boundary(name: &str) -> bool {
    SCOPE_BOUNDARIES.contains(&name)
}

pub fn is_heading(name: &str) -> bool {
    HEADINGS.contains(&name)
}
