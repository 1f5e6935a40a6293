use serde::{Deserialize, Serialize};

/// Markdown conversion backend the pipeline hands its prepared text to.
///
/// The pipeline treats the backend as a black box: valid markdown in,
/// HTML fragment out. Everything chat-specific happens before and after.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// comrak with hard line breaks, matching the "simple linebreaks" chat
    /// messages are written with.
    #[default]
    Comrak,
    /// pulldown-cmark with tables and strikethrough enabled.
    Pulldown,
    /// markdown-it with the cmark, extra, and raw-html plugin sets.
    MarkdownIt,
    /// No backend selected. Every conversion fails with
    /// [`RenderError::NoConverter`](crate::RenderError::NoConverter).
    None,
}

/// Configuration surface for one pipeline instance.
///
/// Every switch is independently toggleable. Hosts persist this struct as-is;
/// missing fields fall back to the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub converter: Backend,
    /// Skip all custom processing and run the raw text straight through the
    /// conversion backend.
    pub only_convert: bool,
    /// Re-segment blockquotes line by line and wrap them in a copy-enabled
    /// container instead of relying on the backend's blockquote handling.
    pub blockquotes: bool,
    /// Hide application-unknown tags from the backend behind placeholder
    /// tokens and restore them as annotated wrappers afterwards.
    pub custom_tags: bool,
    /// Append synthetic closing tags for opening tags the text never closes.
    pub close_tags: bool,
    /// Insert a blank line after a list item that is not followed by another
    /// list item, so the next paragraph does not get swallowed by the list.
    pub fix_lists: bool,
    /// Insert a blank line before a horizontal rule glued to the previous
    /// paragraph.
    pub fix_hr: bool,
    /// Split multi-line paragraphs in the converted HTML and mark the final
    /// block element for per-paragraph entry styling.
    pub fade_paragraphs: bool,
    /// Append a synthesized skeleton block while a message is streaming.
    pub fade_placeholder: bool,
    /// Patch only changed children of the render target instead of replacing
    /// the whole subtree on every streamed update.
    pub patch_children: bool,
    /// Make the sanitize capability a pass-through identity.
    pub bypass_sanitizer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            converter: Backend::default(),
            only_convert: false,
            blockquotes: true,
            custom_tags: true,
            close_tags: true,
            fix_lists: true,
            fix_hr: true,
            fade_paragraphs: true,
            fade_placeholder: true,
            patch_children: true,
            bypass_sanitizer: false,
        }
    }
}
