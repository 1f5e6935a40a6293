use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use chatmark_core::{Backend, Pipeline, Settings};

fn main() {
    tracing_subscriber::fmt::init();

    let mut input: Option<String> = None;
    let mut settings = Settings::default();
    let mut sanitized = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--converter" => {
                settings.converter = match args.next().as_deref() {
                    Some("comrak") => Backend::Comrak,
                    Some("pulldown") => Backend::Pulldown,
                    Some("markdown-it") => Backend::MarkdownIt,
                    Some("none") => Backend::None,
                    _ => {
                        eprintln!("--converter expects: comrak | pulldown | markdown-it | none");
                        print_usage();
                        process::exit(2);
                    }
                };
            }
            "--only-convert" => settings.only_convert = true,
            "--no-blockquotes" => settings.blockquotes = false,
            "--no-custom-tags" => settings.custom_tags = false,
            "--no-close-tags" => settings.close_tags = false,
            "--no-fix-lists" => settings.fix_lists = false,
            "--no-fix-hr" => settings.fix_hr = false,
            "--no-fade" => settings.fade_paragraphs = false,
            "--sanitized" => sanitized = true,
            _ => {
                if input.is_none() {
                    input = Some(arg);
                } else {
                    eprintln!("unexpected argument: {}", arg);
                    print_usage();
                    process::exit(2);
                }
            }
        }
    }

    let source = match input {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|err| {
            eprintln!("failed to read {}: {}", path, err);
            process::exit(1);
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .unwrap_or_else(|err| {
                    eprintln!("failed to read stdin: {}", err);
                    process::exit(1);
                });
            buffer
        }
    };

    let pipeline = Pipeline::new(settings);
    let html = match pipeline.render(&source) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    if sanitized {
        print!("{}", pipeline.sanitize(&html));
    } else {
        print!("{}", html);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: chatmark-cli [--converter comrak|pulldown|markdown-it|none] [--only-convert] \
         [--no-blockquotes] [--no-custom-tags] [--no-close-tags] [--no-fix-lists] [--no-fix-hr] \
         [--no-fade] [--sanitized] [input]"
    );
}
