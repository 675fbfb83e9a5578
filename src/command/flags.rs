/// Typed flag declarations, their clap arguments and their usage lines.
use clap::{Arg, ArgAction};

use super::Deprecation;
use super::errors::FlagValueError;

/// A flag's default value, which also fixes its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    Int(i64),
    Bool(bool),
}

impl FlagValue {
    fn is_zero(self) -> bool {
        matches!(self, Self::Int(0) | Self::Bool(false))
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One flag declared on a command.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    name: String,
    shorthand: Option<char>,
    default: FlagValue,
    description: String,
    deprecation: Deprecation,
}

impl FlagSpec {
    /// Integer flag, rendered as `--name int`.
    #[must_use]
    pub fn int(name: &str, default: i64, description: &str) -> Self {
        Self::new(name, FlagValue::Int(default), description)
    }

    /// Boolean flag; `--name` alone sets it to `true`.
    #[must_use]
    pub fn bool(name: &str, default: bool, description: &str) -> Self {
        Self::new(name, FlagValue::Bool(default), description)
    }

    fn new(name: &str, default: FlagValue, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            shorthand: None,
            default,
            description: description.to_owned(),
            deprecation: Deprecation::Active,
        }
    }

    /// The implicit `-h, --help` flag every command carries.
    #[must_use]
    pub(crate) fn help_for(command_name: &str) -> Self {
        Self::bool(HELP, false, &format!("help for {command_name}")).shorthand('h')
    }

    #[must_use]
    pub fn shorthand(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }

    /// Mark the flag deprecated. It keeps working but is hidden from help,
    /// and setting it prints a warning.
    #[must_use]
    pub fn deprecated(mut self, message: &str) -> Self {
        self.deprecation = Deprecation::Deprecated(message.to_owned());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn default_value(&self) -> FlagValue {
        self.default
    }

    #[must_use]
    pub fn deprecation(&self) -> &Deprecation {
        &self.deprecation
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.deprecation.is_deprecated()
    }

    /// The clap argument that parses this flag.
    ///
    /// Integers take the next token even when it starts with `-`. Booleans
    /// take a value only as `--name=value`; bare `--name` means `true`.
    /// Repeats are allowed and the last one wins.
    pub(crate) fn to_arg(&self, descriptions: bool) -> Arg {
        let display = self.display_name();
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .hide(self.is_hidden())
            .action(ArgAction::Set)
            .default_value(self.default.to_string());
        if let Some(c) = self.shorthand {
            arg = arg.short(c);
        }
        if descriptions {
            arg = arg.help(self.description.clone());
        }
        match self.default {
            FlagValue::Int(_) => arg
                .value_name("int")
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(move |raw: &str| {
                    parse_int(raw).map_err(|detail| invalid_value(raw, &display, detail))
                }),
            FlagValue::Bool(_) => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(move |raw: &str| {
                    parse_bool(raw).map_err(|detail| invalid_value(raw, &display, detail))
                }),
        }
    }

    /// Name as quoted in value errors: `--num`, or `-h, --help`.
    fn display_name(&self) -> String {
        match self.shorthand {
            Some(c) => format!("-{c}, --{}", self.name),
            None => format!("--{}", self.name),
        }
    }

    fn type_name(&self) -> &'static str {
        match self.default {
            FlagValue::Int(_) => "int",
            FlagValue::Bool(_) => "",
        }
    }

    /// Split a `` `name` `` placeholder out of the description, falling
    /// back to the type name.
    fn unquote_usage(&self) -> (String, String) {
        let desc = &self.description;
        if let Some(start) = desc.find('`')
            && let Some(len) = desc[start + 1..].find('`')
        {
            let name = &desc[start + 1..start + 1 + len];
            let usage = format!("{}{}{}", &desc[..start], name, &desc[start + 2 + len..]);
            return (name.to_owned(), usage);
        }
        (self.type_name().to_owned(), desc.clone())
    }
}

/// Id of the implicit help flag.
pub(crate) const HELP: &str = "help";

fn invalid_value(raw: &str, flag: &str, detail: String) -> FlagValueError {
    FlagValueError {
        value: raw.to_owned(),
        flag: flag.to_owned(),
        detail,
    }
}

/// Parse an integer the way flag values are written on the command line:
/// optional sign, then decimal, `0x`, `0o`, `0b` or a leading-zero octal,
/// with `_` allowed between digits.
fn parse_int(raw: &str) -> Result<i64, String> {
    let syntax = || format!("strconv.ParseInt: parsing {raw:?}: invalid syntax");
    let range = || format!("strconv.ParseInt: parsing {raw:?}: value out of range");

    let (negative, body) = if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = raw.strip_prefix('+') {
        (false, rest)
    } else {
        (false, raw)
    };
    if body.contains('_') && !underscores_ok(body) {
        return Err(syntax());
    }

    let lower = body.to_ascii_lowercase();
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(syntax());
    }

    let magnitude = u64::from_str_radix(&digits, radix).map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow => range(),
        _ => syntax(),
    })?;

    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| range())
}

/// `_` may only follow a digit or a base prefix, and must be followed by a
/// digit.
fn underscores_ok(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    let (rest, hex, mut after_digit) = match lower.as_bytes() {
        [b'0', b'x', ..] => (&lower[2..], true, true),
        [b'0', b'o' | b'b', ..] => (&lower[2..], false, true),
        _ => (lower.as_str(), false, false),
    };
    let mut after_underscore = false;
    for c in rest.chars() {
        if c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()) {
            after_digit = true;
            after_underscore = false;
        } else if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
            after_underscore = true;
        } else if after_underscore {
            return false;
        } else {
            after_digit = false;
        }
    }
    !after_underscore
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("strconv.ParseBool: parsing {raw:?}: invalid syntax")),
    }
}

/// The flags one command accepts, as listed in its help.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    specs: Vec<FlagSpec>,
}

impl FlagSet {
    #[must_use]
    pub fn new(specs: Vec<FlagSpec>) -> Self {
        Self { specs }
    }

    #[must_use]
    pub fn has_visible(&self) -> bool {
        self.specs.iter().any(|f| !f.is_hidden())
    }

    /// Render the aligned `Flags:` block body, one line per visible flag,
    /// sorted by name.
    #[must_use]
    pub fn usages(&self) -> String {
        let mut visible: Vec<&FlagSpec> = self.specs.iter().filter(|f| !f.is_hidden()).collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));

        let mut rows = Vec::with_capacity(visible.len());
        let mut widest = 0;
        for spec in visible {
            let mut head = match spec.shorthand {
                Some(c) => format!("  -{c}, --{}", spec.name),
                None => format!("      --{}", spec.name),
            };
            let (varname, mut usage) = spec.unquote_usage();
            if !varname.is_empty() {
                head.push(' ');
                head.push_str(&varname);
            }
            if !spec.default.is_zero() {
                usage.push_str(&format!(" (default {})", spec.default));
            }
            widest = widest.max(head.len());
            rows.push((head, usage));
        }

        let mut out = String::new();
        for (head, usage) in rows {
            let pad = widest - head.len() + 3;
            out.push_str(&head);
            out.push_str(&" ".repeat(pad));
            out.push_str(&usage);
            out.push('\n');
        }
        out
    }
}
