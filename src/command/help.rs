/// Help and usage text.
///
/// Layout:
///
/// ```text
/// <long or short description>
///
/// Usage:
///   <use line>            (runnable commands)
///   <path> [command]      (commands with visible children)
///
/// Available Commands:
///   <name padded> <short>
///
/// Flags:
///   <aligned flag usages>
///
/// Use "<path> [command] --help" for more information about a command.
/// ```
use super::{Command, command_path};

/// Full help for the last node of `path`.
#[must_use]
pub fn help(path: &[&Command]) -> String {
    let Some(cmd) = path.last() else {
        return String::new();
    };

    let mut text = String::new();
    let header = if cmd.long_text().is_empty() {
        cmd.short_text()
    } else {
        cmd.long_text()
    };
    let header = header.trim_end();
    if !header.is_empty() {
        text.push_str(header);
        text.push_str("\n\n");
    }
    if cmd.is_runnable() || !cmd.children().is_empty() {
        text.push_str(&usage(path));
    }
    text
}

/// The `Usage:` section and everything after it, newline-terminated.
#[must_use]
pub fn usage(path: &[&Command]) -> String {
    let Some(cmd) = path.last() else {
        return String::new();
    };
    let cmd_path = command_path(path);
    let branching = cmd.has_available_children();
    let flags = cmd.local_flags();

    let mut text = String::from("Usage:");
    if cmd.is_runnable() {
        text.push_str("\n  ");
        text.push_str(&use_line(path));
    }
    if branching {
        text.push_str(&format!("\n  {cmd_path} [command]"));

        text.push_str("\n\nAvailable Commands:");
        let pad = cmd.name_padding();
        let mut listed: Vec<&Command> = cmd
            .children()
            .iter()
            .filter(|c| c.is_available() || c.name() == "help")
            .collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()));
        for child in listed {
            text.push_str(&format!(
                "\n  {:<pad$} {}",
                child.name(),
                child.short_text()
            ));
        }
    }
    if flags.has_visible() {
        text.push_str("\n\nFlags:\n");
        text.push_str(flags.usages().trim_end());
    }
    if branching {
        text.push_str(&format!(
            "\n\nUse \"{cmd_path} [command] --help\" for more information about a command."
        ));
    }
    text.push('\n');
    text
}

/// `<parent path> <usage> [flags]`.
#[must_use]
pub fn use_line(path: &[&Command]) -> String {
    let Some((cmd, parents)) = path.split_last() else {
        return String::new();
    };
    let mut line = if parents.is_empty() {
        cmd.usage().to_owned()
    } else {
        format!("{} {}", command_path(parents), cmd.usage())
    };
    if cmd.local_flags().has_visible() && !line.contains("[flags]") {
        line.push_str(" [flags]");
    }
    line
}
