use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use once_cell::sync::Lazy;

/// Element names the runtime recognizes as native HTML. Anything else that
/// shows up in model output is treated as a custom element and hidden from
/// the markdown converter.
static NATIVE_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
        "big", "blockquote", "body", "br", "button", "canvas", "caption", "center", "cite",
        "code", "col", "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog",
        "dir", "div", "dl", "dt", "em", "embed", "fieldset", "figcaption", "figure", "font",
        "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head",
        "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label",
        "legend", "li", "link", "main", "map", "mark", "marquee", "menu", "meta", "meter", "nav",
        "nobr", "noframes", "noscript", "object", "ol", "optgroup", "option", "output", "p",
        "param", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script",
        "search", "section", "select", "slot", "small", "source", "span", "strike", "strong",
        "style", "sub", "summary", "sup", "table", "tbody", "td", "template", "textarea",
        "tfoot", "th", "thead", "time", "title", "tr", "track", "tt", "u", "ul", "var", "video",
        "wbr",
    ]
    .iter()
    .copied()
    .collect()
});

type CustomTagCache = Mutex<HashMap<String, bool>>;

static CUSTOM_TAG_CACHE: Lazy<CustomTagCache> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Classifies a tag name as custom (application-unknown) or native.
///
/// Hyphenated names are custom by convention. The verdict is memoized for the
/// process lifetime; classification of a given name never changes once made.
pub fn is_custom_tag(name: &str) -> bool {
    let key = name.to_ascii_lowercase();
    if let Some(&known) = CUSTOM_TAG_CACHE.lock().unwrap().get(&key) {
        return known;
    }
    let custom = key.contains('-') || !NATIVE_ELEMENTS.contains(key.as_str());
    CUSTOM_TAG_CACHE.lock().unwrap().insert(key, custom);
    custom
}
