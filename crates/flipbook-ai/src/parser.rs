//! Tolerant extraction of labeled fields and image layouts from model text.
//!
//! Pure string transforms. Missing labels yield `None` or the identity layout,
//! never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{identity_layout, ImageDescription, ImageLayoutEntry};

// `Position <slot>: <image number> - <reasoning>`, anywhere on a line.
static LAYOUT_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Position\s+(\d+)\s*:\s*(\d+)\s*-\s*(.+)").unwrap());

/// Value following `label:` (case-insensitive), trimmed.
///
/// The value ends at the first line break, at `next_label:` if given, or at
/// the end of the text. Returns `None` when the label is absent or its value
/// is blank.
pub fn extract_labeled_field(text: &str, label: &str, next_label: Option<&str>) -> Option<String> {
    let terminator = match next_label {
        Some(next) => format!(r"\n|{}:|$", regex::escape(next)),
        None => r"\n|$".to_string(),
    };
    let pattern = format!(r"(?i){}:\s*(.+?)(?:{})", regex::escape(label), terminator);
    let re = Regex::new(&pattern).ok()?;

    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        return None;
    }
    // An empty field directly followed by the next label on a new line
    // would otherwise swallow that label.
    if let Some(next) = next_label {
        if value.to_lowercase().starts_with(&format!("{}:", next.to_lowercase())) {
            return None;
        }
    }
    Some(value.to_string())
}

/// Apply `Position p: n - reasoning` lines to the identity layout.
///
/// Entries are keyed by image number, so a later line for the same image
/// overwrites an earlier one, reasoning included (even when blank). Lines
/// naming an image outside `1..=N`, or slot 0, are ignored.
pub fn parse_layout(text: &str, descriptions: &[ImageDescription]) -> Vec<ImageLayoutEntry> {
    let mut layout = identity_layout(descriptions);

    for line in text.lines() {
        let Some(caps) = LAYOUT_LINE_RE.captures(line) else {
            continue;
        };
        let (Ok(position), Ok(image_number)) = (caps[1].parse::<usize>(), caps[2].parse::<usize>())
        else {
            continue;
        };
        if position == 0 || image_number == 0 || image_number > layout.len() {
            debug!(
                "Ignoring layout line for image {} at position {} (N={})",
                image_number,
                position,
                layout.len()
            );
            continue;
        }

        let entry = &mut layout[image_number - 1];
        entry.suggested_position = position;
        entry.reasoning = caps[3].trim().to_string();
    }

    layout
}
