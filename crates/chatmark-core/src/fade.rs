use crate::dom::{self, Element, Node};

/// Block-level elements eligible for the final-block marker.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "ul", "ol", "li", "table", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "div",
];

/// Marker-role elements never carry the final-block class. The exclusion list
/// is deliberate and fixed; `Chatmark-tag` also covers `Chatmark-tag-close`.
const MARKER_CLASSES: &[&str] = &["Chatmark-tag", "Chatmark-placeholder", "Chatmark-line"];

pub const LAST_BLOCK_CLASS: &str = "Chatmark-last-block";

/// Post-processes converted HTML for per-paragraph entry styling: splits
/// paragraphs at line breaks, marks the last qualifying block element with
/// [`LAST_BLOCK_CLASS`], and drops paragraphs the split left empty.
pub fn apply(html: &str) -> String {
    let mut nodes = dom::parse_fragment(html);
    split_paragraph_breaks(&mut nodes);
    mark_last_block(&mut nodes);
    strip_empty_paragraphs(&mut nodes);
    dom::serialize(&nodes)
}

fn is_br(node: &Node) -> bool {
    matches!(node, Node::Element(element) if element.name == "br")
}

/// Splits every paragraph containing a top-level `<br>` into sibling
/// paragraphs, one per line, so each can fade in on its own. The first part
/// keeps the original attributes.
fn split_paragraph_breaks(nodes: &mut Vec<Node>) {
    let mut idx = 0;
    while idx < nodes.len() {
        let splittable = matches!(
            &nodes[idx],
            Node::Element(element) if element.name == "p" && element.children.iter().any(is_br)
        );
        if !splittable {
            if let Node::Element(element) = &mut nodes[idx] {
                if element.name != "p" {
                    split_paragraph_breaks(&mut element.children);
                }
            }
            idx += 1;
            continue;
        }
        let Node::Element(paragraph) = nodes.remove(idx) else {
            continue;
        };
        let mut parts: Vec<Node> = Vec::new();
        let mut current: Vec<Node> = Vec::new();
        for child in paragraph.children {
            if is_br(&child) {
                parts.push(make_paragraph(
                    parts.is_empty().then(|| paragraph.attrs.clone()),
                    std::mem::take(&mut current),
                ));
            } else {
                current.push(child);
            }
        }
        parts.push(make_paragraph(
            parts.is_empty().then(|| paragraph.attrs.clone()),
            current,
        ));
        let count = parts.len();
        for (offset, part) in parts.into_iter().enumerate() {
            nodes.insert(idx + offset, part);
        }
        idx += count;
    }
}

fn make_paragraph(attrs: Option<Vec<(String, String)>>, children: Vec<Node>) -> Node {
    Node::Element(Element {
        name: "p".to_string(),
        attrs: attrs.unwrap_or_default(),
        children,
    })
}

fn qualifies(element: &Element) -> bool {
    BLOCK_ELEMENTS.contains(&element.name.as_str())
        && !MARKER_CLASSES
            .iter()
            .any(|class| element.class_contains(class))
}

/// Marks the last qualifying block element in document order. Styling uses
/// the class to distinguish the actively-growing tail during streaming.
fn mark_last_block(nodes: &mut Vec<Node>) {
    let mut path: Vec<usize> = Vec::new();
    let mut found: Option<Vec<usize>> = None;
    find_last_block(nodes, &mut path, &mut found);
    let Some(found) = found else {
        return;
    };
    let Some((&last, ancestors)) = found.split_last() else {
        return;
    };
    let mut cursor: &mut Vec<Node> = nodes;
    for &idx in ancestors {
        match cursor.get_mut(idx) {
            Some(Node::Element(element)) => cursor = &mut element.children,
            _ => return,
        }
    }
    if let Some(Node::Element(element)) = cursor.get_mut(last) {
        element.add_class(LAST_BLOCK_CLASS);
    }
}

fn find_last_block(nodes: &[Node], path: &mut Vec<usize>, found: &mut Option<Vec<usize>>) {
    for (idx, node) in nodes.iter().enumerate() {
        if let Node::Element(element) = node {
            path.push(idx);
            if qualifies(element) {
                *found = Some(path.clone());
            }
            find_last_block(&element.children, path, found);
            path.pop();
        }
    }
}

/// Drops paragraphs with no attributes and no visible content.
fn strip_empty_paragraphs(nodes: &mut Vec<Node>) {
    nodes.retain_mut(|node| {
        let Node::Element(element) = node else {
            return true;
        };
        strip_empty_paragraphs(&mut element.children);
        let empty = element.name == "p"
            && element.attrs.is_empty()
            && element.children.iter().all(|child| {
                matches!(child, Node::Text(text) if text.trim().is_empty())
            });
        !empty
    });
}
