use chatmark_core::dom::{Node, parse_fragment};
use chatmark_stream::{skeleton_block, skeleton_block_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn line_classes(html: &str) -> Vec<String> {
    let nodes = parse_fragment(html);
    let Some(Node::Element(wrapper)) = nodes.first() else {
        panic!("expected wrapper element");
    };
    assert_eq!(wrapper.name, "div");
    assert_eq!(wrapper.attr("class"), Some("Chatmark-placeholder"));
    wrapper
        .children
        .iter()
        .map(|child| {
            let Node::Element(line) = child else {
                panic!("expected line element");
            };
            line.attr("class").expect("line class").to_string()
        })
        .collect()
}

#[test]
fn skeleton_has_first_two_middles_and_last() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let classes = line_classes(&skeleton_block_with(&mut rng));
        assert_eq!(classes.len(), 4);
        assert!(classes[0].starts_with("Chatmark-line Chatmark-firstline-"));
        assert!(classes[1].starts_with("Chatmark-line Chatmark-line-"));
        assert!(classes[2].starts_with("Chatmark-line Chatmark-line-"));
        assert!(classes[3].starts_with("Chatmark-line Chatmark-lastline-"));
        // The two middle lines always have different widths.
        assert_ne!(classes[1], classes[2]);
    }
}

#[test]
fn widths_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        for class in line_classes(&skeleton_block_with(&mut rng)) {
            let width: u32 = class
                .rsplit('-')
                .next()
                .and_then(|digit| digit.parse().ok())
                .expect("width suffix");
            assert!((1..=3).contains(&width), "width out of range in {class}");
        }
    }
}

#[test]
fn default_rng_produces_a_well_formed_block() {
    let classes = line_classes(&skeleton_block());
    assert_eq!(classes.len(), 4);
}
