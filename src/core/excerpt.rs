//! Preview text derivation for article listings

/// Heading whose first prose line becomes the excerpt
pub const INTRODUCTION_HEADING: &str = "## Introduction";
/// Maximum excerpt length in characters, ellipsis included
pub const MAX_EXCERPT_CHARS: usize = 200;
/// Fallback lines must be strictly longer than this
pub const MIN_FALLBACK_CHARS: usize = 50;

/// Used when neither the document nor the configured fallback yields text
pub const DEFAULT_EXCERPT: &str =
    "Découvrez cet article complet sur WordPress et le développement web.";

const ELLIPSIS: &str = "...";

/// Derive the excerpt of a raw document
///
/// Prefers the first prose line after `## Introduction`, then the first
/// long prose line anywhere, then `fallback`.
pub fn extract_excerpt(content: &str, fallback: &str) -> String {
    let candidate = introduction_line(content).or_else(|| first_long_line(content));

    match candidate {
        Some(line) => truncate(line),
        None if fallback.trim().is_empty() => DEFAULT_EXCERPT.to_string(),
        None => truncate(fallback.trim()),
    }
}

fn introduction_line(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .skip_while(|line| *line != INTRODUCTION_HEADING)
        .skip(1)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

fn first_long_line(content: &str) -> Option<&str> {
    content.lines().map(str::trim).find(|line| {
        !line.is_empty()
            && !line.starts_with('#')
            && !line.starts_with("**")
            && line.chars().count() > MIN_FALLBACK_CHARS
    })
}

/// Cut a line to [`MAX_EXCERPT_CHARS`], marking the cut with an ellipsis
pub fn truncate(line: &str) -> String {
    if line.chars().count() <= MAX_EXCERPT_CHARS {
        return line.to_string();
    }
    let keep = MAX_EXCERPT_CHARS - ELLIPSIS.len();
    let mut out: String = line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
