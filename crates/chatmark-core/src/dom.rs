//! A small forgiving HTML fragment tree.
//!
//! The paragraph fade post-processor and the streaming patcher both need to
//! walk and rewrite converter output. Converter output is a well-formed
//! fragment, so a lenient stack parser is enough: unmatched closers are
//! dropped, unterminated elements close at end of input, and text is kept
//! byte-for-byte so a parse/serialize round trip does not disturb entities.

/// One node of a parsed HTML fragment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub name: String,
    /// Attribute name/value pairs in source order, values stored raw.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(attr, _)| attr == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn class_contains(&self, needle: &str) -> bool {
        self.attr("class").is_some_and(|class| class.contains(needle))
    }

    pub fn add_class(&mut self, class: &str) {
        match self.attr("class") {
            Some(existing) if !existing.is_empty() => {
                let joined = format!("{} {}", existing, class);
                self.set_attr("class", &joined);
            }
            _ => self.set_attr("class", class),
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Parses an HTML fragment into a node list, leniently.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];
        if !rest.starts_with('<') {
            let next = rest.find('<').map(|idx| pos + idx).unwrap_or(html.len());
            append(&mut root, &mut stack, Node::Text(html[pos..next].to_string()));
            pos = next;
            continue;
        }
        if rest.starts_with("<!--") {
            pos = rest
                .find("-->")
                .map(|idx| pos + idx + 3)
                .unwrap_or(html.len());
            continue;
        }
        let Some(close_rel) = rest.find('>') else {
            append(&mut root, &mut stack, Node::Text(rest.to_string()));
            break;
        };
        let inner = &html[pos + 1..pos + close_rel];
        if let Some(name) = inner.strip_prefix('/') {
            close_element(&mut root, &mut stack, &name.trim().to_ascii_lowercase());
        } else if inner
            .as_bytes()
            .first()
            .is_some_and(|byte| byte.is_ascii_alphabetic())
        {
            let (name, attrs, self_closing) = parse_tag_body(inner);
            let element = Element {
                name: name.clone(),
                attrs,
                children: Vec::new(),
            };
            if self_closing || is_void(&name) {
                append(&mut root, &mut stack, Node::Element(element));
            } else {
                stack.push(element);
            }
        } else {
            // Not a tag shape; keep the raw text.
            append(
                &mut root,
                &mut stack,
                Node::Text(html[pos..pos + close_rel + 1].to_string()),
            );
        }
        pos += close_rel + 1;
    }

    // Unterminated elements close at end of input.
    while let Some(element) = stack.pop() {
        append(&mut root, &mut stack, Node::Element(element));
    }
    root
}

fn append(root: &mut Vec<Node>, stack: &mut [Element], node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn close_element(root: &mut Vec<Node>, stack: &mut Vec<Element>, name: &str) {
    // Unmatched closers are dropped.
    let Some(depth) = stack.iter().rposition(|element| element.name == name) else {
        return;
    };
    while stack.len() > depth {
        let Some(element) = stack.pop() else {
            return;
        };
        append(root, stack, Node::Element(element));
    }
}

fn parse_tag_body(body: &str) -> (String, Vec<(String, String)>, bool) {
    let (body, self_closing) = match body.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (body, false),
    };
    let body = body.trim();
    let (name, rest) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], &body[idx..]),
        None => (body, ""),
    };
    (name.to_ascii_lowercase(), parse_attrs(rest), self_closing)
}

fn parse_attrs(mut rest: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let name_end = rest
            .find(|ch: char| ch == '=' || ch.is_whitespace())
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_string();
        let after_name = rest[name_end..].trim_start();
        if let Some(after_eq) = after_name.strip_prefix('=') {
            let value_part = after_eq.trim_start();
            let (value, remainder) = parse_attr_value(value_part);
            if !name.is_empty() {
                attrs.push((name, value));
            }
            rest = remainder;
        } else {
            if !name.is_empty() {
                attrs.push((name, String::new()));
            }
            rest = after_name;
        }
    }
    attrs
}

fn parse_attr_value(value_part: &str) -> (String, &str) {
    for quote in ['"', '\''] {
        if let Some(stripped) = value_part.strip_prefix(quote) {
            return match stripped.find(quote) {
                Some(end) => (stripped[..end].to_string(), &stripped[end + 1..]),
                None => (stripped.to_string(), ""),
            };
        }
    }
    let end = value_part
        .find(char::is_whitespace)
        .unwrap_or(value_part.len());
    (value_part[..end].to_string(), &value_part[end..])
}

/// Serializes a node list back to HTML text.
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&value.replace('"', "&quot;"));
                out.push('"');
            }
            if is_void(&element.name) {
                out.push_str(" />");
            } else {
                out.push('>');
                for child in &element.children {
                    write_node(out, child);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attr(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
