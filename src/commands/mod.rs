/// The `demo` command tree.
pub mod hello;
pub mod hullo;

use crate::command::Command;

/// Build a fresh `demo` root with its subcommands.
#[must_use]
pub fn new_demo_command() -> Command {
    Command::new("demo")
        .short("SHORT TEXT")
        .long("LONG TEXT")
        .subcommand(hello::command())
        .subcommand(hullo::command())
}
