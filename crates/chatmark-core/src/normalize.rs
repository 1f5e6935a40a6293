use once_cell::sync::Lazy;
use regex::Regex;

use crate::settings::Settings;

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\..+").expect("ordered list item pattern"));
static ORDERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.").expect("ordered list prefix pattern"));
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+.+").expect("bullet list item pattern"));
static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+").expect("bullet list prefix pattern"));
static INDENTED_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s\s+").expect("indented continuation pattern"));
static HR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3,}$").expect("hr line pattern"));

/// Applies the enabled line-level fixups. Pure text to text, idempotent.
pub fn apply(text: &str, settings: &Settings) -> String {
    let mut out = text.to_string();
    if settings.fix_lists {
        out = fix_list_continuation(&out);
    }
    if settings.fix_hr {
        out = fix_hr_spacing(&out);
    }
    out
}

/// Chat messages use simple linebreaks instead of proper markdown linebreaks,
/// so list items swallow the following paragraph. A blank line after any list
/// item not followed by another item keeps the paragraph out of the list.
fn fix_list_continuation(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        out.push(line);
        let Some(next) = lines.get(idx + 1) else {
            continue;
        };
        if next.is_empty() {
            continue;
        }
        let breaks_ordered = ORDERED_ITEM.is_match(line) && !ORDERED_PREFIX.is_match(next);
        let breaks_bullet = BULLET_ITEM.is_match(line)
            && !BULLET_PREFIX.is_match(next)
            && !INDENTED_CONTINUATION.is_match(next);
        if breaks_ordered || breaks_bullet {
            out.push("");
        }
    }
    out.join("\n")
}

/// A rule line glued to the preceding paragraph turns that paragraph into a
/// setext heading. A blank line in between keeps it a rule.
fn fix_hr_spacing(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if HR_LINE.is_match(line) && idx > 0 && !lines[idx - 1].is_empty() {
            out.push("");
        }
        out.push(line);
    }
    out.join("\n")
}
