//! Article body rendering
//!
//! Markdown is turned into [`DisplayNode`]s through a fixed transform table
//! ([`transform`]); raw HTML only survives through the allow-list in
//! [`sanitize`].

pub mod blocks;
pub mod html;
pub mod sanitize;
pub mod transform;

pub use blocks::DisplayNode;
pub use transform::{ElementKind, Transform};

/// Render a raw article body to display nodes
pub fn render(raw: &str) -> Vec<DisplayNode> {
    blocks::parse_blocks(raw)
}

/// Render a raw article body to sanitized HTML
pub fn render_html(raw: &str) -> String {
    html::to_html(&render(raw))
}
