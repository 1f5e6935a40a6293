use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::blockquote;
use crate::convert::{self, Converter};
use crate::error::RenderError;
use crate::fade;
use crate::normalize;
use crate::placeholder::{self, PlaceholderMaps};
use crate::sanitize;
use crate::scan;
use crate::settings::Settings;

/// One message-formatting pipeline: normalize, scan and balance tags, swap
/// custom tags for placeholders, convert, restore, post-process.
///
/// A pipeline owns nothing per message; each [`render`](Pipeline::render)
/// call works on its own copy of the text and leaves no state behind apart
/// from the process-wide custom-tag cache.
pub struct Pipeline {
    settings: Settings,
    missing_converter_reported: AtomicBool,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            missing_converter_reported: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Hosts mutate settings in place on configuration change; the next
    /// render picks them up.
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.missing_converter_reported = AtomicBool::new(false);
        &mut self.settings
    }

    /// Runs the full pipeline over one message and returns the HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let converter = match convert::converter_for(self.settings.converter) {
            Ok(converter) => converter,
            Err(err) => {
                // De-duplicated: report once per configuration, not per message.
                if !self.missing_converter_reported.swap(true, Ordering::Relaxed) {
                    warn!("no valid markdown converter selected");
                }
                return Err(err);
            }
        };
        Ok(self.render_with(markdown, converter.as_ref()))
    }

    /// The externally supplied sanitize step, or the identity when bypassed.
    pub fn sanitize(&self, html: &str) -> String {
        if self.settings.bypass_sanitizer {
            html.to_string()
        } else {
            sanitize::sanitize(html)
        }
    }

    /// Renders with a caller-supplied backend instead of the configured one.
    pub fn render_with(&self, markdown: &str, converter: &dyn Converter) -> String {
        if self.settings.only_convert {
            return converter.convert(markdown);
        }
        let text = normalize::apply(markdown, &self.settings);
        let outcome = scan::scan_and_balance(&text, &self.settings);
        let (text, maps) = if self.settings.custom_tags {
            placeholder::substitute(&outcome.text, &outcome.occurrences)
        } else {
            (outcome.text, PlaceholderMaps::default())
        };
        let html = if self.settings.blockquotes {
            blockquote::render(&text, converter)
        } else {
            converter.convert(&text)
        };
        let html = placeholder::restore_code(&html, &maps);
        let html = placeholder::restore_prose(&html, &maps);
        if self.settings.fade_paragraphs {
            fade::apply(&html)
        } else {
            html
        }
    }
}
