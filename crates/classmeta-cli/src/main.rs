mod cli;
mod commands;

use cli::{ClassParams, ModuleParams, build_cli, verbosity_filter};

fn main() {
    let matches = build_cli().get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(verbosity_filter(matches.get_count("verbose")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("class", m)) => {
            let params = ClassParams::from_matches(m);
            commands::class::run(params.into());
        }
        Some(("module", m)) => {
            let params = ModuleParams::from_matches(m);
            commands::module::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
