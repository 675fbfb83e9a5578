/// `demo hello`: the regular subcommand.
use tracing::debug;

use crate::command::{ArgPolicy, Command, CommandError, FlagSpec, Invocation};

/// Build the `hello` node.
#[must_use]
pub fn command() -> Command {
    Command::new("hello")
        .short("SHORT TEXT")
        .long("LONG TEXT")
        .args(ArgPolicy::NoArgs)
        .flag(FlagSpec::int("num", 0, "number"))
        .flag(FlagSpec::bool("flag", false, "description").deprecated("please don't use it"))
        .action(run)
}

/// Run `demo hello`.
///
/// # Errors
///
/// Only fails if the output stream cannot be written.
pub fn run(inv: &mut Invocation<'_>) -> Result<(), CommandError> {
    let flags = inv.flags();
    debug!(
        num = ?flags.get_one::<i64>("num"),
        flag = ?flags.get_one::<bool>("flag"),
        "hello"
    );
    inv.println("hello world")?;
    Ok(())
}
