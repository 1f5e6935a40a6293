use std::panic;

use chatmark_core::{Pipeline, Settings, scan_and_balance};

const CASES: usize = 200;
const MAX_LEN: usize = 512;
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 \n<>/`-*#.\"=";

#[test]
fn pipeline_never_panics_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x3c6e_f372_fe94_f82b);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let result = panic::catch_unwind(|| {
            let pipeline = Pipeline::new(Settings::default());
            pipeline.render(&source).map(|html| html.len()).unwrap_or(0)
        });
        if result.is_err() {
            return Err(format!("render panicked for case {}: {:?}", case, source).into());
        }
    }
    Ok(())
}

#[test]
fn balanced_output_rescans_with_no_unmatched_opens() -> Result<(), Box<dyn std::error::Error>> {
    // Backtick-free soup: a message ending inside an open code region keeps
    // its pending tags hidden on purpose, so the invariant holds for prose.
    const PIECES: &[&str] = &[
        "<a>", "</a>", "<b>", "</b>", "<x-a>", "</x-a>", "<x-b>", "</x-b>", "text ", "\n",
        "\n\n", "word",
    ];
    let mut rng = Lcg::new(0x9e37_79b9_7f4a_7c15);
    for case in 0..CASES {
        let count = rng.gen_range(0, 40);
        let mut source = String::new();
        for _ in 0..count {
            source.push_str(PIECES[rng.gen_range(0, PIECES.len())]);
        }
        let balanced = scan_and_balance(&source, &Settings::default());
        let mut recheck = Settings::default();
        recheck.close_tags = false;
        let rescan = scan_and_balance(&balanced.text, &recheck);
        if rescan.unmatched_opens != 0 {
            return Err(format!(
                "case {} still has {} unmatched opens\nSource:\n---\n{}\n---\nBalanced:\n---\n{}\n---",
                case, rescan.unmatched_opens, source, balanced.text
            )
            .into());
        }
    }
    Ok(())
}

#[test]
fn fade_never_panics_on_random_fragments() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x1234_5678_9abc_def1);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let result = panic::catch_unwind(|| chatmark_core::fade::apply(&source).len());
        if result.is_err() {
            return Err(format!("fade panicked for case {}: {:?}", case, source).into());
        }
    }
    Ok(())
}

fn random_string(rng: &mut Lcg, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0, CHARSET.len());
        let byte = CHARSET.get(idx).copied().unwrap_or(b' ');
        out.push(byte as char);
    }
    out
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min;
        let value = (self.next() >> 1) as usize;
        min + (value % span)
    }
}
