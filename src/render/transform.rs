//! Element transform table
//!
//! Every markdown element kind the article view styles is listed here with
//! the tag and presentation class it renders to. This table is the contract
//! between the renderer and the presentation layer. Anything not listed goes
//! through [`ElementKind::Generic`], which keeps a plain tag and no class.

use serde::Serialize;

/// Kind of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    BlockQuote,
    /// Code without a language annotation
    InlineCode,
    /// Fenced code with a language annotation
    CodeBlock,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    /// Neutral rendering: plain tag, no class
    Generic(&'static str),
}

/// How one element kind is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    /// Outer element `(tag, class)` the element is placed in
    pub wrapper: Option<(&'static str, &'static str)>,
}

impl Transform {
    const fn styled(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class: Some(class),
            wrapper: None,
        }
    }

    const fn plain(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            wrapper: None,
        }
    }
}

/// Look up the transform of an element kind
pub fn transform(kind: ElementKind) -> Transform {
    match kind {
        ElementKind::Heading1 => Transform::styled("h1", "text-3xl font-bold text-gray-900 mt-8 mb-4"),
        ElementKind::Heading2 => Transform::styled("h2", "text-2xl font-bold text-gray-900 mt-8 mb-4"),
        ElementKind::Heading3 => Transform::styled("h3", "text-xl font-bold text-gray-900 mt-6 mb-3"),
        ElementKind::Paragraph => Transform::styled("p", "text-gray-700 leading-relaxed mb-4"),
        ElementKind::UnorderedList => {
            Transform::styled("ul", "list-disc list-inside text-gray-700 mb-4 space-y-2")
        }
        ElementKind::OrderedList => {
            Transform::styled("ol", "list-decimal list-inside text-gray-700 mb-4 space-y-2")
        }
        ElementKind::ListItem => Transform::plain("li"),
        ElementKind::BlockQuote => Transform::styled(
            "blockquote",
            "border-l-4 border-blue-500 pl-4 italic text-gray-600 my-6",
        ),
        ElementKind::InlineCode => {
            Transform::styled("code", "bg-gray-100 text-gray-800 px-2 py-1 rounded text-sm")
        }
        ElementKind::CodeBlock => Transform::styled(
            "pre",
            "bg-gray-900 text-gray-100 p-4 rounded-lg overflow-x-auto my-6",
        ),
        ElementKind::Table => Transform {
            tag: "table",
            class: Some("min-w-full border border-gray-300"),
            wrapper: Some(("div", "overflow-x-auto my-6")),
        },
        ElementKind::TableHead => Transform::plain("thead"),
        ElementKind::TableBody => Transform::plain("tbody"),
        ElementKind::TableRow => Transform::plain("tr"),
        ElementKind::TableHeaderCell => Transform::styled(
            "th",
            "border border-gray-300 px-4 py-2 bg-gray-50 font-semibold text-left",
        ),
        ElementKind::TableCell => Transform::styled("td", "border border-gray-300 px-4 py-2"),
        ElementKind::Generic(tag) => Transform::plain(tag),
    }
}

/// Kind of a heading by level; levels past 3 render generically
pub fn heading_kind(level: u8) -> ElementKind {
    match level {
        1 => ElementKind::Heading1,
        2 => ElementKind::Heading2,
        3 => ElementKind::Heading3,
        4 => ElementKind::Generic("h4"),
        5 => ElementKind::Generic("h5"),
        _ => ElementKind::Generic("h6"),
    }
}
