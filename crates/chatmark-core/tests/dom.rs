use chatmark_core::dom::{Node, parse_fragment, serialize};

#[test]
fn round_trip_preserves_structure_and_text() {
    let html = "<p>a<br />b</p><p>c</p>";
    assert_eq!(serialize(&parse_fragment(html)), html);
}

#[test]
fn entities_survive_a_round_trip() {
    let html = "<p>a &amp; b &lt;c&gt;</p>";
    assert_eq!(serialize(&parse_fragment(html)), html);
}

#[test]
fn attribute_values_are_kept_raw() {
    let html = "<a href=\"x?a=1&amp;b=2\" title=\"t\">link</a>";
    assert_eq!(serialize(&parse_fragment(html)), html);
}

#[test]
fn void_elements_normalize_to_self_closing() {
    assert_eq!(serialize(&parse_fragment("a<br>b")), "a<br />b");
    assert_eq!(serialize(&parse_fragment("<hr>")), "<hr />");
}

#[test]
fn unmatched_closers_are_dropped() {
    assert_eq!(serialize(&parse_fragment("a</div>b")), "ab");
}

#[test]
fn unterminated_elements_close_at_end_of_input() {
    assert_eq!(serialize(&parse_fragment("<div>a")), "<div>a</div>");
}

#[test]
fn closing_an_outer_element_closes_inner_ones_first() {
    assert_eq!(
        serialize(&parse_fragment("<div><span>x</div>")),
        "<div><span>x</span></div>"
    );
}

#[test]
fn comments_are_discarded() {
    assert_eq!(serialize(&parse_fragment("a<!-- note -->b")), "ab");
}

#[test]
fn non_tag_angle_brackets_are_kept_as_text() {
    assert_eq!(serialize(&parse_fragment("1 <2>")), "1 <2>");
}

#[test]
fn parsed_elements_expose_attributes() {
    let nodes = parse_fragment("<div class=\"a b\" data-tag=\"x\">t</div>");
    let Some(Node::Element(element)) = nodes.first() else {
        panic!("expected element");
    };
    assert_eq!(element.name, "div");
    assert_eq!(element.attr("class"), Some("a b"));
    assert_eq!(element.attr("data-tag"), Some("x"));
    assert!(element.class_contains("b"));
    assert_eq!(element.children, vec![Node::Text("t".to_string())]);
}

#[test]
fn add_class_appends_to_an_existing_list() {
    let mut nodes = parse_fragment("<p class=\"x\">t</p>");
    if let Some(Node::Element(element)) = nodes.first_mut() {
        element.add_class("y");
    }
    assert_eq!(serialize(&nodes), "<p class=\"x y\">t</p>");
}

#[test]
fn single_quoted_and_bare_attribute_values_parse() {
    let nodes = parse_fragment("<div id='a' hidden data-n=5>t</div>");
    let Some(Node::Element(element)) = nodes.first() else {
        panic!("expected element");
    };
    assert_eq!(element.attr("id"), Some("a"));
    assert_eq!(element.attr("hidden"), Some(""));
    assert_eq!(element.attr("data-n"), Some("5"));
}
