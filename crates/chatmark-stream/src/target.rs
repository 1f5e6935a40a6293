use chatmark_core::dom::{self, Node};

use crate::patch::{PatchStats, patch_children};

/// How [`RenderTarget::set_html`] applies new content.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PatchMode {
    /// Replace the whole subtree.
    Replace,
    /// Reconcile children in place so unrelated nodes keep their state
    /// (selection, animation, scroll position) across streamed updates.
    #[default]
    ChildrenOnly,
}

/// Wrapper around the rendered subtree for one message.
///
/// The host hands whole-fragment HTML to [`set_html`](RenderTarget::set_html);
/// the target decides full replacement versus children-only patching, which
/// is the explicit stand-in for intercepting subtree assignment on a live
/// DOM node.
#[derive(Clone, Debug, Default)]
pub struct RenderTarget {
    children: Vec<Node>,
    classes: Vec<String>,
    mode: PatchMode,
}

impl RenderTarget {
    pub fn new(mode: PatchMode) -> Self {
        Self {
            children: Vec::new(),
            classes: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> PatchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PatchMode) {
        self.mode = mode;
    }

    /// Applies a new rendered fragment according to the current mode.
    pub fn set_html(&mut self, html: &str) -> PatchStats {
        let new_children = dom::parse_fragment(html);
        match self.mode {
            PatchMode::Replace => {
                let stats = PatchStats {
                    added: new_children.len(),
                    removed: self.children.len(),
                    ..PatchStats::default()
                };
                self.children = new_children;
                stats
            }
            PatchMode::ChildrenOnly => patch_children(&mut self.children, new_children),
        }
    }

    pub fn html(&self) -> String {
        dom::serialize(&self.children)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}
