//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("classmeta")
        .about("Inspect compiler metadata attached to class files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(class_command())
        .subcommand(module_command())
}

/// Print decoded metadata envelopes.
pub fn class_command() -> Command {
    Command::new("class")
        .about("Print metadata envelopes stored as JSON")
        .override_usage(
            "\
  classmeta class <FILE>
  classmeta class -",
        )
        .after_help(
            r#"EXAMPLES:
  classmeta class Foo.json            # one envelope
  classmeta class all.json            # JSON array of envelopes
  cat Foo.json | classmeta class -    # from stdin"#,
        )
        .arg(file_arg())
}

/// Print a module file.
pub fn module_command() -> Command {
    Command::new("module")
        .about("Print the package parts listed by a module file")
        .override_usage("  classmeta module <FILE> [--skip-version-check] [--no-jvm-package-name]")
        .after_help(
            r#"EXAMPLES:
  classmeta module META-INF/main.kotlin_module
  classmeta module old.kotlin_module --skip-version-check"#,
        )
        .arg(file_arg())
        .arg(skip_version_check_arg())
        .arg(no_jvm_package_name_arg())
}
