#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! demo: a small command tree with nested subcommands, deprecations, help
//! generation and line-prefixed output streams.

use std::io::{self, Write};

use cmdtree_demo::commands;
use cmdtree_demo::config::Settings;
use cmdtree_demo::output::LinePrefixWriter;

fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };
    settings.init_tracing();

    // Both streams land on the real stdout; only the prefix tells them apart.
    let mut out = LinePrefixWriter::new(io::stdout(), &settings.stdout_prefix());
    let mut err = LinePrefixWriter::new(io::stdout(), &settings.stderr_prefix());

    let result = commands::new_demo_command().execute(std::env::args_os().skip(1), &mut out, &mut err);
    let _ = out.flush();
    let _ = err.flush();

    if let Err(err) = result {
        eprintln!("Execute() error ({}): {err}", err.kind());
        std::process::exit(1);
    }
}
