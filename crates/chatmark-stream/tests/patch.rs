use chatmark_core::dom::{Node, parse_fragment};
use chatmark_stream::{PatchMode, RenderTarget, patch_children};

#[test]
fn first_fill_adds_every_top_level_node() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    let stats = target.set_html("<p>a</p><p>b</p>");
    assert_eq!(stats.added, 2);
    assert_eq!(stats.removed, 0);
    assert_eq!(target.html(), "<p>a</p><p>b</p>");
}

#[test]
fn unchanged_nodes_are_kept_and_text_updates_in_place() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    target.set_html("<p>a</p><p>b</p>");
    let stats = target.set_html("<p>a</p><p>bc</p>");
    // Both elements and the first text node kept; only one text changed.
    assert_eq!(stats.kept, 3);
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.replaced, 0);
    assert_eq!(stats.added, 0);
    assert_eq!(stats.removed, 0);
    assert_eq!(target.html(), "<p>a</p><p>bc</p>");
}

#[test]
fn attribute_changes_update_in_place() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    target.set_html("<p>tail</p>");
    let stats = target.set_html("<p class=\"Chatmark-last-block\">tail</p>");
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.kept, 1);
    assert_eq!(target.html(), "<p class=\"Chatmark-last-block\">tail</p>");
}

#[test]
fn surplus_old_nodes_are_removed() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    target.set_html("<p>a</p><p>b</p><p>c</p>");
    let stats = target.set_html("<p>a</p>");
    assert_eq!(stats.removed, 2);
    assert_eq!(target.html(), "<p>a</p>");
}

#[test]
fn shape_changes_replace_the_node() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    target.set_html("<p>a</p>");
    let stats = target.set_html("<div>a</div>");
    assert_eq!(stats.replaced, 1);
    assert_eq!(target.html(), "<div>a</div>");
}

#[test]
fn text_to_element_is_a_replacement() {
    let mut old = parse_fragment("plain");
    let stats = patch_children(&mut old, parse_fragment("<p>plain</p>"));
    assert_eq!(stats.replaced, 1);
    assert!(matches!(old.first(), Some(Node::Element(_))));
}

#[test]
fn replace_mode_swaps_the_whole_subtree() {
    let mut target = RenderTarget::new(PatchMode::Replace);
    target.set_html("<p>a</p><p>b</p>");
    let stats = target.set_html("<p>a</p>");
    assert_eq!(stats.added, 1);
    assert_eq!(stats.removed, 2);
    assert_eq!(stats.kept, 0);
    assert_eq!(target.html(), "<p>a</p>");
}

#[test]
fn nested_children_are_reconciled_recursively() {
    let mut target = RenderTarget::new(PatchMode::ChildrenOnly);
    target.set_html("<blockquote><p>a</p></blockquote>");
    let stats = target.set_html("<blockquote><p>a</p><p>b</p></blockquote>");
    assert_eq!(stats.added, 1);
    assert_eq!(stats.replaced, 0);
    assert_eq!(
        target.html(),
        "<blockquote><p>a</p><p>b</p></blockquote>"
    );
}

#[test]
fn classes_track_independently_of_content() {
    let mut target = RenderTarget::default();
    target.add_class("Chatmark-streaming");
    target.add_class("Chatmark-streaming");
    assert!(target.has_class("Chatmark-streaming"));
    target.remove_class("Chatmark-streaming");
    assert!(!target.has_class("Chatmark-streaming"));
}
