//! Small helpers over raw page markup.
//!
//! These locate structured page regions for callers that need them; the
//! primitive extractors work on free text and only share [`parse_int`].

use crate::patterns::{PatternName, get_or_compile};

/// Parses an integer as the game prints it, ignoring thousands separators.
///
/// Returns `None` when nothing numeric remains after stripping.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Parses a fractional figure as the game prints it, ignoring thousands
/// separators.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
}

/// Removes every markup tag, leaving the text content.
#[must_use]
pub fn strip_tags(markup: &str) -> String {
    get_or_compile(PatternName::MarkupTag)
        .replace_all(markup, "")
        .into_owned()
}

/// Content of the panel titled `title` (e.g. `"Results:"`).
///
/// A panel is a bold title in one table row followed by a row whose cell
/// holds the content. Tables and cells nested inside that cell are kept
/// whole; the panel ends at the first unbalanced `</td>`.
#[must_use]
pub fn results_panel<'a>(html: &'a str, title: &str) -> Option<&'a str> {
    let header = get_or_compile(PatternName::PanelHeader);
    let start = header
        .captures_iter(html)
        .find(|caps| caps[1].trim() == title)?
        .get(0)?
        .end();

    let body = &html[start..];
    let mut depth = 0_usize;
    for tag in get_or_compile(PatternName::PanelTag).captures_iter(body) {
        let whole = tag.get(0)?;
        let closing = whole.as_str().starts_with("</");
        let is_cell = tag[1].eq_ignore_ascii_case("td");

        if !closing {
            depth += 1;
        } else if depth == 0 && is_cell {
            return Some(&body[..whole.start()]);
        } else {
            depth = depth.saturating_sub(1);
        }
    }

    None
}

/// Text of the cell to the right of the right-aligned `label:` cell.
#[must_use]
pub fn labeled_value(html: &str, label: &str) -> Option<String> {
    let wanted = format!("{label}:");
    get_or_compile(PatternName::LabeledValue)
        .captures_iter(html)
        .find(|caps| caps[1].trim() == wanted)
        .map(|caps| strip_tags(&caps[2]).trim().to_string())
}
