use crate::error::RenderError;
use crate::settings::Backend;

/// Strategy interface for the pluggable markdown-to-HTML backend.
/// Valid markdown in, HTML fragment out; everything else is not its problem.
pub trait Converter {
    fn convert(&self, markdown: &str) -> String;
}

/// comrak, configured for chat text: hard line breaks, tables,
/// strikethrough, and raw HTML passed through. Sanitization is a separate
/// downstream step, so `unsafe_` is deliberate here.
pub struct ComrakConverter;

impl Converter for ComrakConverter {
    fn convert(&self, markdown: &str) -> String {
        let mut options = comrak::Options::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.render.hardbreaks = true;
        options.render.unsafe_ = true;
        comrak::markdown_to_html(markdown, &options)
    }
}

/// pulldown-cmark with tables and strikethrough. Follows strict CommonMark
/// linebreak rules, so single newlines become soft breaks.
pub struct PulldownConverter;

impl Converter for PulldownConverter {
    fn convert(&self, markdown: &str) -> String {
        let mut options = pulldown_cmark::Options::empty();
        options.insert(pulldown_cmark::Options::ENABLE_TABLES);
        options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
        let parser = pulldown_cmark::Parser::new_ext(markdown, options);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

/// markdown-it with the cmark, extra, and raw-html plugin sets.
pub struct MarkdownItConverter;

impl Converter for MarkdownItConverter {
    fn convert(&self, markdown: &str) -> String {
        let mut parser = markdown_it::MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut parser);
        markdown_it::plugins::extra::add(&mut parser);
        markdown_it::plugins::html::add(&mut parser);
        parser.parse(markdown).render()
    }
}

pub fn converter_for(backend: Backend) -> Result<Box<dyn Converter>, RenderError> {
    match backend {
        Backend::Comrak => Ok(Box::new(ComrakConverter)),
        Backend::Pulldown => Ok(Box::new(PulldownConverter)),
        Backend::MarkdownIt => Ok(Box::new(MarkdownItConverter)),
        Backend::None => Err(RenderError::NoConverter),
    }
}
