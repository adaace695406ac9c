//! Markdown parsing into display nodes
//!
//! The pulldown-cmark event stream is folded into a tree of
//! [`DisplayNode`]s. Each element gets its tag and class from the
//! transform table; raw HTML goes through the sanitizer, so the tree only
//! ever holds allow-listed tags.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use serde::Serialize;

use super::sanitize::{self, HtmlToken};
use super::transform::{heading_kind, transform, ElementKind};

/// A node of rendered article content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayNode {
    Element {
        kind: ElementKind,
        tag: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<&'static str>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(&'static str, String)>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<DisplayNode>,
    },
    Text {
        text: String,
    },
}

impl DisplayNode {
    /// Build an element from the transform table, without its wrapper
    pub fn element(kind: ElementKind, children: Vec<DisplayNode>) -> Self {
        let t = transform(kind);
        DisplayNode::Element {
            kind,
            tag: t.tag,
            class: t.class,
            attrs: Vec::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        DisplayNode::Text { text: text.into() }
    }

    fn with_attrs(mut self, new_attrs: Vec<(&'static str, String)>) -> Self {
        if let DisplayNode::Element { attrs, .. } = &mut self {
            attrs.extend(new_attrs);
        }
        self
    }

    /// Element kind, `None` for text
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            DisplayNode::Element { kind, .. } => Some(*kind),
            DisplayNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[DisplayNode] {
        match self {
            DisplayNode::Element { children, .. } => children,
            DisplayNode::Text { .. } => &[],
        }
    }

    /// Value of an attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DisplayNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str()),
            DisplayNode::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(std::slice::from_ref(self), &mut out);
        out
    }
}

fn collect_text(nodes: &[DisplayNode], out: &mut String) {
    for node in nodes {
        match node {
            DisplayNode::Text { text } => out.push_str(text),
            DisplayNode::Element { children, .. } => collect_text(children, out),
        }
    }
}

/// Build an element, placing it in its wrapper when the transform has one
fn styled(
    kind: ElementKind,
    attrs: Vec<(&'static str, String)>,
    children: Vec<DisplayNode>,
) -> DisplayNode {
    let node = DisplayNode::element(kind, children).with_attrs(attrs);
    match transform(kind).wrapper {
        Some((tag, class)) => DisplayNode::Element {
            kind: ElementKind::Generic(tag),
            tag,
            class: Some(class),
            attrs: Vec::new(),
            children: vec![node],
        },
        None => node,
    }
}

#[derive(Debug)]
enum FrameKind {
    Element(ElementKind),
    /// Allow-listed tag opened by raw HTML
    Raw(&'static str),
    /// Container whose children are hoisted into the parent
    Transparent,
    CodeBlock(Option<String>),
    Image {
        src: Option<String>,
        title: String,
    },
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    attrs: Vec<(&'static str, String)>,
    children: Vec<DisplayNode>,
}

#[derive(Debug, Default)]
struct Builder {
    root: Vec<DisplayNode>,
    stack: Vec<Frame>,
    in_table_head: bool,
    /// Set while inside the content of a stripped raw HTML element, until
    /// its closing tag, across markdown block boundaries
    stripping: Option<&'static str>,
    /// Markdown elements opened while stripping; they are never built
    skipped: usize,
}

impl Builder {
    fn push_node(&mut self, node: DisplayNode) {
        if self.stripping.is_none() && self.skipped == 0 {
            self.attach(node);
        }
    }

    fn attach(&mut self, node: DisplayNode) {
        let children = match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        };
        if let (DisplayNode::Text { text }, Some(DisplayNode::Text { text: prev })) =
            (&node, children.last_mut())
        {
            prev.push_str(text);
            return;
        }
        children.push(node);
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push_node(DisplayNode::text(text));
        }
    }

    fn open(&mut self, kind: FrameKind, attrs: Vec<(&'static str, String)>) {
        self.stack.push(Frame {
            kind,
            attrs,
            children: Vec::new(),
        });
    }

    fn start(&mut self, tag: Tag<'_>) {
        if self.stripping.is_some() || self.skipped > 0 {
            self.skipped += 1;
            return;
        }
        let (kind, attrs) = match tag {
            Tag::Heading { level, .. } => (FrameKind::Element(heading_kind(level as u8)), vec![]),
            Tag::Paragraph => (FrameKind::Element(ElementKind::Paragraph), vec![]),
            Tag::BlockQuote(_) => (FrameKind::Element(ElementKind::BlockQuote), vec![]),
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                let lang = info
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .next()
                    .filter(|l| !l.is_empty())
                    .map(str::to_string);
                (FrameKind::CodeBlock(lang), vec![])
            }
            Tag::CodeBlock(CodeBlockKind::Indented) => (FrameKind::CodeBlock(None), vec![]),
            Tag::List(Some(start)) => {
                let attrs = if start == 1 {
                    vec![]
                } else {
                    vec![("start", start.to_string())]
                };
                (FrameKind::Element(ElementKind::OrderedList), attrs)
            }
            Tag::List(None) => (FrameKind::Element(ElementKind::UnorderedList), vec![]),
            Tag::Item => (FrameKind::Element(ElementKind::ListItem), vec![]),
            Tag::Table(_) => (FrameKind::Element(ElementKind::Table), vec![]),
            Tag::TableHead => {
                self.in_table_head = true;
                (FrameKind::Element(ElementKind::TableHead), vec![])
            }
            Tag::TableRow => (FrameKind::Element(ElementKind::TableRow), vec![]),
            Tag::TableCell => {
                let kind = if self.in_table_head {
                    ElementKind::TableHeaderCell
                } else {
                    ElementKind::TableCell
                };
                (FrameKind::Element(kind), vec![])
            }
            Tag::Emphasis => (FrameKind::Element(ElementKind::Generic("em")), vec![]),
            Tag::Strong => (FrameKind::Element(ElementKind::Generic("strong")), vec![]),
            Tag::Strikethrough => (FrameKind::Element(ElementKind::Generic("del")), vec![]),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut attrs = Vec::new();
                if sanitize::is_safe_url(&dest_url) {
                    let external = dest_url.starts_with("http://") || dest_url.starts_with("https://");
                    attrs.push(("href", dest_url.to_string()));
                    if external {
                        attrs.push(("rel", "noopener noreferrer".to_string()));
                    }
                }
                if !title.is_empty() {
                    attrs.push(("title", title.to_string()));
                }
                (FrameKind::Element(ElementKind::Generic("a")), attrs)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let src = sanitize::is_safe_url(&dest_url).then(|| dest_url.to_string());
                (
                    FrameKind::Image {
                        src,
                        title: title.to_string(),
                    },
                    vec![],
                )
            }
            _ => (FrameKind::Transparent, vec![]),
        };
        self.open(kind, attrs);
    }

    fn end(&mut self) {
        if self.skipped > 0 {
            self.skipped -= 1;
            return;
        }
        // Raw tags left open inside a markdown element close with it
        while matches!(
            self.stack.last(),
            Some(Frame {
                kind: FrameKind::Raw(_),
                ..
            })
        ) {
            self.close_top();
        }
        self.close_top();
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            for node in self.finish(frame) {
                self.attach(node);
            }
        }
    }

    fn finish(&mut self, frame: Frame) -> Vec<DisplayNode> {
        let Frame {
            kind,
            attrs,
            children,
        } = frame;

        match kind {
            FrameKind::Transparent => children,
            FrameKind::Raw(tag) => vec![DisplayNode::element(ElementKind::Generic(tag), children)],
            FrameKind::Element(ElementKind::TableHead) => {
                self.in_table_head = false;
                let has_rows = children
                    .iter()
                    .any(|c| c.kind() == Some(ElementKind::TableRow));
                let rows = if has_rows {
                    children
                } else {
                    vec![DisplayNode::element(ElementKind::TableRow, children)]
                };
                vec![DisplayNode::element(ElementKind::TableHead, rows)]
            }
            FrameKind::Element(ElementKind::Table) => {
                let (mut sections, body): (Vec<_>, Vec<_>) = children
                    .into_iter()
                    .partition(|c| c.kind() == Some(ElementKind::TableHead));
                if !body.is_empty() {
                    sections.push(DisplayNode::element(ElementKind::TableBody, body));
                }
                vec![styled(ElementKind::Table, attrs, sections)]
            }
            FrameKind::Element(kind) => vec![styled(kind, attrs, children)],
            FrameKind::CodeBlock(lang) => {
                let mut code = String::new();
                collect_text(&children, &mut code);
                let node = match lang {
                    Some(lang) => {
                        let inner = DisplayNode::element(
                            ElementKind::Generic("code"),
                            vec![DisplayNode::text(code)],
                        )
                        .with_attrs(vec![("class", format!("language-{}", lang))]);
                        styled(ElementKind::CodeBlock, vec![], vec![inner])
                    }
                    None => DisplayNode::element(
                        ElementKind::Generic("pre"),
                        vec![DisplayNode::element(
                            ElementKind::InlineCode,
                            vec![DisplayNode::text(code)],
                        )],
                    ),
                };
                vec![node]
            }
            FrameKind::Image { src, title } => {
                let mut alt = String::new();
                collect_text(&children, &mut alt);
                let mut attrs = Vec::new();
                if let Some(src) = src {
                    attrs.push(("src", src));
                }
                attrs.push(("alt", alt));
                if !title.is_empty() {
                    attrs.push(("title", title));
                }
                vec![DisplayNode::element(ElementKind::Generic("img"), vec![]).with_attrs(attrs)]
            }
        }
    }

    fn raw_html(&mut self, fragment: &str) {
        for token in sanitize::tokenize(fragment) {
            if let Some(stripped) = self.stripping {
                if token == HtmlToken::LeaveStripped(stripped) {
                    self.stripping = None;
                }
                continue;
            }
            // The rest of a skipped element is dropped with it
            if self.skipped > 0 {
                continue;
            }

            match token {
                HtmlToken::Open(tag) => self.open(FrameKind::Raw(tag), vec![]),
                HtmlToken::Close(tag) => self.close_raw(tag),
                HtmlToken::Void(tag) => {
                    self.push_node(DisplayNode::element(ElementKind::Generic(tag), vec![]))
                }
                HtmlToken::Text(text) => self.push_text(&text),
                HtmlToken::EnterStripped(tag) => self.stripping = Some(tag),
                HtmlToken::LeaveStripped(_) => {}
            }
        }
    }

    /// Close a raw tag if it is open above the current markdown element
    fn close_raw(&mut self, tag: &'static str) {
        let depth = self
            .stack
            .iter()
            .rev()
            .take_while(|f| matches!(f.kind, FrameKind::Raw(_)))
            .position(|f| matches!(f.kind, FrameKind::Raw(t) if t == tag));
        if let Some(depth) = depth {
            for _ in 0..=depth {
                self.close_top();
            }
        }
    }

    fn into_nodes(mut self) -> Vec<DisplayNode> {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.root
    }
}

/// Parse markdown content into display nodes
pub fn parse_blocks(content: &str) -> Vec<DisplayNode> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = Builder::default();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(_) => builder.end(),
            Event::Text(text) => builder.push_text(&text),
            Event::Code(code) => builder.push_node(DisplayNode::element(
                ElementKind::InlineCode,
                vec![DisplayNode::text(code.to_string())],
            )),
            Event::Html(html) | Event::InlineHtml(html) => builder.raw_html(&html),
            Event::SoftBreak => builder.push_text("\n"),
            Event::HardBreak => {
                builder.push_node(DisplayNode::element(ElementKind::Generic("br"), vec![]))
            }
            Event::Rule => {
                builder.push_node(DisplayNode::element(ElementKind::Generic("hr"), vec![]))
            }
            Event::TaskListMarker(checked) => {
                builder.push_text(if checked { "[x] " } else { "[ ] " })
            }
            Event::FootnoteReference(name) => builder.push_text(&format!("[{}]", name)),
            _ => {}
        }
    }

    builder.into_nodes()
}
