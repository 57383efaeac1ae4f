use std::path::PathBuf;

use classmeta_lib::printer::{ModuleFilePrinter, Printer};
use classmeta_lib::{DeserializationConfig, ModuleFile, ModuleMappingError};

use super::error_chain;
use super::loader::load_bytes;

pub struct ModuleArgs {
    pub file: PathBuf,
    pub config: DeserializationConfig,
}

pub fn run(args: ModuleArgs) {
    let bytes = match load_bytes(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: {}", error_chain(&e));
            std::process::exit(1);
        }
    };

    let debug_name = args.file.display().to_string();
    match render_module(&bytes, &debug_name, &args.config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {}", error_chain(&e));
            std::process::exit(1);
        }
    }
}

pub fn render_module(
    bytes: &[u8],
    debug_name: &str,
    config: &DeserializationConfig,
) -> Result<String, ModuleMappingError> {
    match ModuleFile::read_with(bytes, debug_name, config)? {
        Some(file) => Ok(ModuleFilePrinter.print(&file)),
        None => {
            tracing::warn!(debug_name, "module file has an unsupported metadata version");
            Ok("unsupported file\n".to_string())
        }
    }
}
