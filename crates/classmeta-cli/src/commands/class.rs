use std::path::PathBuf;

use classmeta_lib::printer::render_class_file;
use classmeta_lib::{ClassFile, Metadata};

use super::error_chain;
use super::loader::load_envelopes;

pub struct ClassArgs {
    pub file: PathBuf,
}

pub fn run(args: ClassArgs) {
    let envelopes = match load_envelopes(&args.file) {
        Ok(envelopes) => envelopes,
        Err(e) => {
            eprintln!("error: {}", error_chain(&e));
            std::process::exit(1);
        }
    };

    let (output, failures) = render_envelopes(envelopes);
    print!("{output}");
    for failure in &failures {
        eprintln!("error: {failure}");
    }
    if !failures.is_empty() {
        std::process::exit(1);
    }
}

/// Render every envelope, collecting the ones that fail to decode.
///
/// Renderings are separated by a blank line.
pub fn render_envelopes(envelopes: Vec<Metadata>) -> (String, Vec<String>) {
    let count = envelopes.len();
    let mut output = String::new();
    let mut failures = Vec::new();

    for (index, metadata) in envelopes.into_iter().enumerate() {
        let kind = metadata.kind;
        match ClassFile::read(metadata) {
            Ok(file) => {
                if !output.is_empty() {
                    output.push('\n');
                }
                output.push_str(&render_class_file(file.as_ref()));
            }
            Err(e) => {
                tracing::debug!(index, kind, "inconsistent metadata");
                let failure = error_chain(&e);
                failures.push(if count == 1 {
                    failure
                } else {
                    format!("envelope #{index}: {failure}")
                });
            }
        }
    }

    (output, failures)
}
