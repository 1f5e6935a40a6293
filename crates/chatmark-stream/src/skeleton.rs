use rand::Rng;
use rand::seq::SliceRandom;

/// Synthesizes the loading skeleton shown below stabilized content while a
/// message is still streaming: a first line, two of the three middle-line
/// widths in random order, and a last line, widths randomized.
pub fn skeleton_block() -> String {
    skeleton_block_with(&mut rand::rng())
}

pub fn skeleton_block_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = rng.random_range(1..=3);
    let mut middles = [1, 2, 3];
    middles.shuffle(rng);
    let last = rng.random_range(1..=3);

    let mut lines = String::new();
    lines.push_str(&line("firstline", first));
    for width in &middles[..2] {
        lines.push_str(&line("line", *width));
    }
    lines.push_str(&line("lastline", last));
    format!("<div class=\"Chatmark-placeholder\">{}</div>", lines)
}

fn line(kind: &str, width: u32) -> String {
    format!("<div class=\"Chatmark-line Chatmark-{kind}-{width}\"></div>")
}
