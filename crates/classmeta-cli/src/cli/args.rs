//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input file (positional, "-" for stdin).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Input file (use \"-\" for stdin)")
}

/// Read files whose metadata version is not supported (--skip-version-check).
pub fn skip_version_check_arg() -> Arg {
    Arg::new("skip_version_check")
        .long("skip-version-check")
        .action(ArgAction::SetTrue)
        .help("Read module files even if their metadata version is not supported")
}

/// Ignore parts compiled into another JVM package (--no-jvm-package-name).
pub fn no_jvm_package_name_arg() -> Arg {
    Arg::new("no_jvm_package_name")
        .long("no-jvm-package-name")
        .action(ArgAction::SetTrue)
        .help("Ignore parts compiled into a JVM package other than their own")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log more details to stderr (-v info, -vv debug, -vvv trace)")
}
