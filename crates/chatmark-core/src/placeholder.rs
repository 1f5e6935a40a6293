use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::dom::escape_html;
use crate::scan::{TagOccurrence, TagRegion};

/// Shape of a literal tag: optional `/`, name, optional attribute text.
static TAG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(/?)([^\s>]+)(\s+[^>]+)?>$").expect("tag shape pattern"));

/// Per-call maps from literal tag text to placeholder id. Two independent
/// maps, because tags found inside fenced code restore differently from tags
/// found in prose. Never reused across calls.
#[derive(Debug, Default)]
pub struct PlaceholderMaps {
    pub prose: HashMap<String, String>,
    pub code: HashMap<String, String>,
}

/// Replaces every custom tag occurrence with an opaque placeholder token so
/// the conversion backend never sees markup it could mis-parse.
///
/// Occurrences are processed back to front so earlier offsets stay valid.
/// The same literal tag text gets the same id within one call, which is what
/// makes exact restoration possible.
pub fn substitute(text: &str, occurrences: &[TagOccurrence]) -> (String, PlaceholderMaps) {
    let mut maps = PlaceholderMaps::default();
    let mut custom: Vec<&TagOccurrence> = occurrences
        .iter()
        .filter(|occurrence| occurrence.is_custom)
        .collect();
    custom.sort_by_key(|occurrence| occurrence.start);

    let mut out = text.to_string();
    for occurrence in custom.iter().rev() {
        let map = match occurrence.region {
            TagRegion::Prose => &mut maps.prose,
            TagRegion::FencedCode => &mut maps.code,
        };
        let id = map
            .entry(occurrence.text.clone())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        // The leading newline forces the placeholder into its own block.
        out.replace_range(
            occurrence.start..occurrence.start + occurrence.len,
            &format!("\n§§§{}§§§", id),
        );
    }
    (out, maps)
}

/// Restores placeholders that came from fenced code as HTML-escaped literal
/// tag text, so the tag displays instead of executing inside the code block.
pub fn restore_code(html: &str, maps: &PlaceholderMaps) -> String {
    let mut out = html.to_string();
    for (tag, id) in &maps.code {
        let token = format!("\n§§§{}§§§", id);
        out = out.replace(&token, &escape_html(tag));
    }
    out
}

/// Restores prose placeholders as structural wrappers carrying the original
/// tag name and attribute text, preserving nesting visually.
pub fn restore_prose(html: &str, maps: &PlaceholderMaps) -> String {
    let mut out = html.to_string();
    for (tag, id) in &maps.prose {
        let token = format!("§§§{}§§§", id);
        out = out.replace(&token, &wrap_custom_tag(tag));
    }
    out
}

fn wrap_custom_tag(tag: &str) -> String {
    let Some(caps) = TAG_SHAPE.captures(tag) else {
        return tag.to_string();
    };
    let name = &caps[2];
    if !caps[1].is_empty() {
        format!("<div class=\"Chatmark-tag-close\" data-tag=\"{name}\"></div></div>")
    } else {
        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        format!(
            "<div class=\"Chatmark-custom\" data-tag=\"{name}\"{attrs}><div class=\"Chatmark-tag\" data-tag=\"{name}\"></div>"
        )
    }
}
