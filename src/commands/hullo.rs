/// `demo hullo`: deprecated spelling of `hello`.
use crate::command::{Command, CommandError, Invocation};

#[must_use]
pub fn command() -> Command {
    Command::new("hullo").deprecated("use hello instead").action(run)
}

/// Run `demo hullo`.
///
/// # Errors
///
/// Only fails if the output stream cannot be written.
pub fn run(inv: &mut Invocation<'_>) -> Result<(), CommandError> {
    inv.println("hullo wurld")?;
    Ok(())
}
