pub mod blockquote;
mod classify;
mod convert;
pub mod dom;
mod error;
pub mod fade;
pub mod normalize;
pub mod placeholder;
mod pipeline;
mod sanitize;
pub mod scan;
mod settings;

pub use classify::is_custom_tag;
pub use convert::{
    ComrakConverter, Converter, MarkdownItConverter, PulldownConverter, converter_for,
};
pub use error::RenderError;
pub use fade::LAST_BLOCK_CLASS;
pub use pipeline::Pipeline;
pub use placeholder::PlaceholderMaps;
pub use sanitize::sanitize;
pub use scan::{ScanOutcome, TagOccurrence, TagRegion, scan_and_balance};
pub use settings::{Backend, Settings};
