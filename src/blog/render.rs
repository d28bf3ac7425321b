//! Markdown rendering and table of contents extraction
//!
//! Deliberately small: posts are authored in a restricted line-based
//! markdown dialect, or arrive as editor HTML.

use crate::errors::AppResult;
use crate::validation::patterns;

use super::post::TocEntry;

/// Anchor id for a heading: lower-case, runs of other characters become `-`
pub fn heading_anchor(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
            in_gap = false;
        } else if !in_gap {
            id.push('-');
            in_gap = true;
        }
    }
    id
}

/// Render post markdown to HTML, one line at a time
pub fn render_markdown(content: &str) -> String {
    content
        .split('\n')
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &str) -> String {
    if let Some(text) = line.strip_prefix("# ") {
        return format!("<h2 id=\"{}\">{}</h2>", heading_anchor(text), text);
    }
    if let Some(text) = line.strip_prefix("## ") {
        return format!("<h3 id=\"{}\">{}</h3>", heading_anchor(text), text);
    }
    if let Some(text) = line.strip_prefix("### ") {
        return format!("<h4>{}</h4>", text);
    }
    if let Some(text) = line.strip_prefix("- ") {
        return format!("<li>{}</li>", text);
    }
    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        return format!("<p><strong>{}</strong></p>", &line[2..line.len() - 2]);
    }
    if line.trim().is_empty() {
        return String::new();
    }
    format!("<p>{}</p>", line)
}

/// Collect `<h2>` entries, then `<h3>` entries, from rendered HTML
pub fn extract_table_of_contents(html: &str) -> AppResult<Vec<TocEntry>> {
    let tags = patterns::html_tag()?;
    let mut toc = Vec::new();

    for (regex, level) in [(patterns::h2_heading()?, 2), (patterns::h3_heading()?, 3)] {
        for captures in regex.captures_iter(html) {
            let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let text = tags.replace_all(inner, "").into_owned();
            toc.push(TocEntry::new(heading_anchor(&text), text, level));
        }
    }

    Ok(toc)
}
