use chatmark_core::placeholder::{restore_code, restore_prose, substitute};
use chatmark_core::{Settings, scan_and_balance};

fn settings() -> Settings {
    Settings::default()
}

#[test]
fn custom_tags_become_block_positioned_tokens() {
    let outcome = scan_and_balance("<my-widget foo=\"1\">hi</my-widget>", &settings());
    let (text, maps) = substitute(&outcome.text, &outcome.occurrences);
    assert!(!text.contains("<my-widget"));
    assert!(!text.contains("</my-widget>"));
    // One token per occurrence, each forced onto its own line.
    assert_eq!(text.matches("\n§§§").count(), 2);
    assert_eq!(maps.prose.len(), 2);
    assert!(maps.code.is_empty());
}

#[test]
fn native_tags_are_left_alone() {
    let outcome = scan_and_balance("x<div>a</div>", &settings());
    let (text, maps) = substitute(&outcome.text, &outcome.occurrences);
    assert_eq!(text, "x<div>a</div>");
    assert!(maps.prose.is_empty());
}

#[test]
fn identical_tag_text_shares_one_token() {
    let outcome = scan_and_balance("x<x-a>1</x-a><x-a>2</x-a>", &settings());
    let (_, maps) = substitute(&outcome.text, &outcome.occurrences);
    // Four occurrences, but only two distinct literal tags.
    assert_eq!(outcome.occurrences.len(), 4);
    assert_eq!(maps.prose.len(), 2);
}

#[test]
fn prose_restore_wraps_tag_pairs() {
    let outcome = scan_and_balance("<my-widget foo=\"1\">hi</my-widget>", &settings());
    let (text, maps) = substitute(&outcome.text, &outcome.occurrences);
    let html = restore_prose(&text, &maps);
    assert!(html.contains(
        "<div class=\"Chatmark-custom\" data-tag=\"my-widget\" foo=\"1\"><div class=\"Chatmark-tag\" data-tag=\"my-widget\"></div>"
    ));
    assert!(html.contains("<div class=\"Chatmark-tag-close\" data-tag=\"my-widget\"></div></div>"));
    assert!(!html.contains("§§§"));
}

#[test]
fn code_restore_escapes_the_literal_tag() {
    let outcome = scan_and_balance("```\n<my-widget>\n```", &settings());
    let (text, maps) = substitute(&outcome.text, &outcome.occurrences);
    assert_eq!(maps.code.len(), 1);
    let html = restore_code(&text, &maps);
    assert!(html.contains("&lt;my-widget&gt;"));
    assert!(!html.contains("<my-widget>"));
    assert!(!html.contains("§§§"));
}

#[test]
fn prose_and_code_maps_are_independent() {
    let outcome = scan_and_balance("<my-widget>a</my-widget>\n```\n<my-widget>\n```", &settings());
    let (_, maps) = substitute(&outcome.text, &outcome.occurrences);
    assert_eq!(maps.prose.len(), 2);
    assert_eq!(maps.code.len(), 1);
}
