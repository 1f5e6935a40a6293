use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::Converter;
use crate::dom::escape_attr;

static QUOTE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s*").expect("quote prefix"));

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunKind {
    Blockquote,
    Markdown,
}

/// A maximal run of adjacent lines of the same kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Run {
    pub kind: RunKind,
    pub lines: Vec<String>,
}

/// Splits text into alternating blockquote/markdown runs by line. A line
/// starting with `>` extends or starts a blockquote run with the quote prefix
/// stripped; any other line extends or starts a markdown run.
pub fn split_runs(text: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for line in text.split('\n') {
        let (kind, content) = if line.starts_with('>') {
            (RunKind::Blockquote, QUOTE_PREFIX.replace(line, "").into_owned())
        } else {
            (RunKind::Markdown, line.to_string())
        };
        match runs.last_mut() {
            Some(run) if run.kind == kind => run.lines.push(content),
            _ => runs.push(Run {
                kind,
                lines: vec![content],
            }),
        }
    }
    runs
}

/// Converts each run independently, bypassing the backend's own blockquote
/// handling, which tends to continue a quote across lines that no longer
/// start with `>`. Quote runs get a copy trigger carrying the unconverted
/// text as its payload.
pub fn render(text: &str, converter: &dyn Converter) -> String {
    split_runs(text)
        .iter()
        .map(|run| {
            let joined = run.lines.join("\n");
            match run.kind {
                RunKind::Blockquote => format!(
                    "<blockquote class=\"Chatmark-blockquote\">{}<div class=\"Chatmark-copy\" title=\"Copy quote to clipboard\" data-text=\"{}\"></div></blockquote>",
                    converter.convert(&joined),
                    escape_attr(&joined)
                ),
                RunKind::Markdown => converter.convert(&joined),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
