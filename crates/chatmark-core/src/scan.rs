use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::is_custom_tag;
use crate::settings::Settings;

/// Combined token pattern for the single forward pass. Priority order:
/// fence delimiter, inline-code delimiter, newline, closing tag, opening tag.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<fence>```)|(?P<inline>`)|(?P<newline>\n)|</(?P<closer>[^/>\s]+)>|<(?P<tag>[a-z][^/>\s]*)(?P<attrs>\s[^/>]+)?>",
    )
    .expect("scan token pattern")
});

/// Where a tag occurrence was found. Tags inside fenced code are recorded for
/// placeholder substitution but never take part in balancing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagRegion {
    Prose,
    FencedCode,
}

/// One opening or closing tag instance found in the current working text.
/// Created by the scan, consumed by placeholder substitution, then discarded.
#[derive(Clone, Debug)]
pub struct TagOccurrence {
    /// The literal tag text, e.g. `<my-widget foo="1">` or `</my-widget>`.
    pub text: String,
    /// Byte offset into [`ScanOutcome::text`].
    pub start: usize,
    pub len: usize,
    pub name: String,
    /// Raw attribute text of an opening tag, leading whitespace included.
    pub attrs: Option<String>,
    pub is_custom: bool,
    /// For opening tags: whether a closing tag exists in the output text.
    pub is_closed: bool,
    /// For opening tags: preceded by a blank line, or at the very start.
    pub block_positioned: bool,
    pub region: TagRegion,
}

/// Result of one scan-and-balance pass over a message.
pub struct ScanOutcome {
    /// Working text with synthesized blank lines and closing tags applied.
    pub text: String,
    pub occurrences: Vec<TagOccurrence>,
    /// Opening tags still unmatched after the pass. Zero when auto-close ran.
    pub unmatched_opens: usize,
}

/// Single left-to-right scan that classifies tags, pairs opening with closing
/// tags, forces block separation around block-positioned or custom pairs, and
/// appends synthetic closers for anything left open.
///
/// Pairing follows stack discipline: a closing tag always pairs with the most
/// recently opened occurrence of the same name. Closing tags with no pending
/// opener pass through untouched. Content inside fenced code is never
/// reinterpreted as markup; inline code ends at its delimiter or a newline.
pub fn scan_and_balance(input: &str, settings: &Settings) -> ScanOutcome {
    let mut text = input.to_string();
    let mut occurrences: Vec<TagOccurrence> = Vec::new();
    // Indices into `occurrences` of prose openers still awaiting a closer.
    let mut open_stack: Vec<usize> = Vec::new();
    let mut in_fenced = false;
    let mut in_inline = false;
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = TOKEN.captures(&text[pos..]) else {
            break;
        };
        let Some(matched) = caps.get(0) else {
            break;
        };
        let start = pos + matched.start();
        let end = pos + matched.end();
        let token_text = matched.as_str().to_string();
        pos = end;

        if in_fenced {
            if caps.name("fence").is_some() {
                in_fenced = false;
            } else if let Some(tag) = caps.name("tag") {
                let name = tag.as_str().to_string();
                let is_custom = settings.custom_tags && is_custom_tag(&name);
                occurrences.push(TagOccurrence {
                    text: token_text,
                    start,
                    len: end - start,
                    name,
                    attrs: caps.name("attrs").map(|m| m.as_str().to_string()),
                    is_custom,
                    is_closed: false,
                    block_positioned: false,
                    region: TagRegion::FencedCode,
                });
            } else if let Some(closer) = caps.name("closer") {
                let name = closer.as_str().to_string();
                let is_custom = settings.custom_tags && is_custom_tag(&name);
                occurrences.push(TagOccurrence {
                    text: token_text,
                    start,
                    len: end - start,
                    name,
                    attrs: None,
                    is_custom,
                    is_closed: true,
                    block_positioned: false,
                    region: TagRegion::FencedCode,
                });
            }
        } else if in_inline {
            if caps.name("inline").is_some() || caps.name("newline").is_some() {
                in_inline = false;
            }
        } else if caps.name("fence").is_some() {
            in_fenced = true;
        } else if caps.name("inline").is_some() {
            in_inline = true;
        } else if let Some(tag) = caps.name("tag") {
            let name = tag.as_str().to_string();
            let is_custom = settings.custom_tags && is_custom_tag(&name);
            let block_positioned = start == 0 || text[..start].ends_with("\n\n");
            occurrences.push(TagOccurrence {
                text: token_text,
                start,
                len: end - start,
                name,
                attrs: caps.name("attrs").map(|m| m.as_str().to_string()),
                is_custom,
                is_closed: false,
                block_positioned,
                region: TagRegion::Prose,
            });
            open_stack.push(occurrences.len() - 1);
        } else if let Some(closer) = caps.name("closer") {
            let name = closer.as_str();
            let Some(stack_slot) = open_stack
                .iter()
                .rposition(|&idx| occurrences[idx].name.eq_ignore_ascii_case(name))
            else {
                continue;
            };
            let opener = open_stack.remove(stack_slot);
            occurrences[opener].is_closed = true;
            let is_custom = occurrences[opener].is_custom;
            let forces_block = occurrences[opener].block_positioned || is_custom;
            occurrences.push(TagOccurrence {
                text: token_text,
                start,
                len: end - start,
                name: occurrences[opener].name.clone(),
                attrs: None,
                is_custom,
                is_closed: true,
                block_positioned: false,
                region: TagRegion::Prose,
            });
            // A block-positioned opener needs its closer followed by a blank
            // line, otherwise the surrounding prose merges into one block.
            if forces_block && !text[end..].starts_with("\n\n") {
                text.insert_str(end, "\n\n");
            }
        }
    }

    let unmatched_opens = if settings.close_tags {
        // Append pending closers innermost-first so nesting stays intact.
        for &opener in open_stack.iter().rev() {
            let closer_text = format!("</{}>", occurrences[opener].name);
            occurrences[opener].is_closed = true;
            occurrences.push(TagOccurrence {
                text: closer_text.clone(),
                start: text.len(),
                len: closer_text.len(),
                name: occurrences[opener].name.clone(),
                attrs: None,
                is_custom: occurrences[opener].is_custom,
                is_closed: true,
                block_positioned: false,
                region: TagRegion::Prose,
            });
            text.push_str(&closer_text);
        }
        0
    } else {
        open_stack.len()
    };

    ScanOutcome {
        text,
        occurrences,
        unmatched_opens,
    }
}
