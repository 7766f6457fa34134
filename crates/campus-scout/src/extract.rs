//! Rendered markup → bounded clean text.

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::OnceLock;

/// Subtrees that never carry page content.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "iframe", "form",
];

const TRUNCATION_MARKER: &str = "...";

/// Text extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// Set when the text was cut at the cap.
    pub truncated: bool,
}

impl ExtractedText {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

fn blank_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank-run regex is valid"))
}

fn collect_text(el: ElementRef<'_>, out: &mut Vec<String>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    out.push(t.to_string());
                }
            }
            Node::Element(e) => {
                if STRIPPED_TAGS.contains(&e.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Extract readable text from `html`, at most `cap` characters long
/// including the truncation marker.
///
/// Text nodes outside the stripped subtrees are joined by newlines, every
/// line is trimmed, lines of three characters or fewer are dropped and
/// blank runs collapse to one empty line.
pub fn extract_text(html: &str, cap: usize) -> ExtractedText {
    let doc = Html::parse_document(html);
    let mut pieces = Vec::new();
    collect_text(doc.root_element(), &mut pieces);

    let joined = pieces.join("\n");
    let lines: Vec<&str> = joined
        .lines()
        .map(str::trim)
        .filter(|l| l.chars().count() > 3)
        .collect();
    let text = blank_runs().replace_all(&lines.join("\n"), "\n\n").into_owned();

    truncate(text, cap)
}

fn truncate(text: String, cap: usize) -> ExtractedText {
    if text.chars().count() <= cap {
        return ExtractedText {
            text,
            truncated: false,
        };
    }
    let keep = cap.saturating_sub(TRUNCATION_MARKER.len());
    let mut cut: String = text.chars().take(keep).collect();
    if cap >= TRUNCATION_MARKER.len() {
        cut.push_str(TRUNCATION_MARKER);
    }
    ExtractedText {
        text: cut,
        truncated: true,
    }
}
