//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use classmeta_lib::DeserializationConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::class::ClassArgs;
use crate::commands::module::ModuleArgs;

pub struct ClassParams {
    pub file: PathBuf,
}

impl ClassParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: input_file(m),
        }
    }
}

impl From<ClassParams> for ClassArgs {
    fn from(p: ClassParams) -> Self {
        Self { file: p.file }
    }
}

pub struct ModuleParams {
    pub file: PathBuf,
    pub skip_version_check: bool,
    pub no_jvm_package_name: bool,
}

impl ModuleParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: input_file(m),
            skip_version_check: m.get_flag("skip_version_check"),
            no_jvm_package_name: m.get_flag("no_jvm_package_name"),
        }
    }
}

impl From<ModuleParams> for ModuleArgs {
    fn from(p: ModuleParams) -> Self {
        Self {
            file: p.file,
            config: DeserializationConfig::new()
                .skip_metadata_version_check(p.skip_version_check)
                .jvm_package_name_supported(!p.no_jvm_package_name),
        }
    }
}

/// Log filter for `-v` given `count` times.
pub fn verbosity_filter(count: u8) -> EnvFilter {
    EnvFilter::new(verbosity_level(count))
}

pub fn verbosity_level(count: u8) -> &'static str {
    match count {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn input_file(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("file")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}
