use chatmark_core::dom::Node;

/// What a patch pass did to a target's subtree. Tests use this to assert
/// that unchanged nodes really are left alone.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PatchStats {
    /// Nodes left untouched.
    pub kept: usize,
    /// Nodes updated in place (text content or attributes).
    pub updated: usize,
    /// Nodes swapped out wholesale because their shape changed.
    pub replaced: usize,
    pub added: usize,
    pub removed: usize,
}

impl PatchStats {
    fn absorb(&mut self, other: PatchStats) {
        self.kept += other.kept;
        self.updated += other.updated;
        self.replaced += other.replaced;
        self.added += other.added;
        self.removed += other.removed;
    }
}

/// Reconciles a node list with new content in place, children-only: same tag
/// recurses, text updates in place, anything else is replaced. Surplus old
/// nodes are removed, surplus new nodes appended.
pub fn patch_children(old: &mut Vec<Node>, mut new: Vec<Node>) -> PatchStats {
    let mut stats = PatchStats::default();
    if new.len() < old.len() {
        stats.removed += old.len() - new.len();
        old.truncate(new.len());
    }
    let extra: Vec<Node> = if new.len() > old.len() {
        new.split_off(old.len())
    } else {
        Vec::new()
    };
    for (slot, incoming) in old.iter_mut().zip(new.into_iter()) {
        patch_node(slot, incoming, &mut stats);
    }
    stats.added += extra.len();
    old.extend(extra);
    stats
}

fn patch_node(slot: &mut Node, incoming: Node, stats: &mut PatchStats) {
    match (&mut *slot, incoming) {
        (Node::Text(old_text), Node::Text(new_text)) => {
            if *old_text == new_text {
                stats.kept += 1;
            } else {
                *old_text = new_text;
                stats.updated += 1;
            }
        }
        (Node::Element(old_element), Node::Element(new_element))
            if old_element.name == new_element.name =>
        {
            if old_element.attrs == new_element.attrs {
                stats.kept += 1;
            } else {
                old_element.attrs = new_element.attrs;
                stats.updated += 1;
            }
            let child_stats = patch_children(&mut old_element.children, new_element.children);
            stats.absorb(child_stats);
        }
        (slot_ref, incoming) => {
            *slot_ref = incoming;
            stats.replaced += 1;
        }
    }
}
