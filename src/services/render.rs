// src/services/render.rs
//! Text-content rendering of transcript entries. User and server text is
//! untrusted and is always escaped, never interpolated as markup.

use crate::config::{Labels, Styles};
use crate::services::transcript::Entry;

/// HTML fragment for one entry, e.g.
/// `<div class="p-2 bg-gray-200 rounded my-1"><b>You:</b> hi</div>`.
pub fn render_html(entry: &Entry, styles: &Styles, labels: &Labels) -> String {
    let class = escape_html(styles.for_origin(entry.origin));
    let text = escape_html(&entry.text);
    match labels.for_origin(entry.origin) {
        Some(label) => format!(
            "<div class=\"{}\"><b>{}</b> {}</div>",
            class,
            escape_html(label),
            text
        ),
        None => format!("<div class=\"{}\">{}</div>", class, text),
    }
}

/// Single terminal line for one entry, with control characters dropped.
pub fn render_terminal(entry: &Entry, labels: &Labels) -> String {
    let text = strip_control(&entry.text);
    match labels.for_origin(entry.origin) {
        Some(label) => format!("{} {}", label, text),
        None => text,
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Keeps escape sequences in replies from driving the terminal.
fn strip_control(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
