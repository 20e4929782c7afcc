use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened, why, and how to fix it.
/// Parse failures quote the offending signature verbatim so the broken
/// documentation line can be found by searching for it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::MalformedSignature { signature } => render_malformed_signature(signature),
        Error::MissingClassScope { selector } => render_missing_class_scope(selector),
        _ => render_generic(e),
    };
}

fn render_generic(e: &Error) -> String {
    return match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check the syntax of `.objcdoc.toml`.
"),
        Error::WatchFailed { reason } => format!("\
# Error: Watch Failed

{reason}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    };
}

fn render_malformed_signature(signature: &str) -> String {
    format!(
        "\
# Error: Malformed Signature

This declaration does not match the method signature grammar:

    {signature}

## Expected shape

An optional `+` or `-` marker, an optional parenthesized return type, an
optional `[ClassName ...]` scope, and one or more selector fragments:

    - (void)setName:(NSString *)aName
    + [MyClass alloc]
    - [Foo doThing:withArg:]

A `[ClassName ` scope must be closed by a trailing `]`.
"
    )
}

fn render_missing_class_scope(selector: &str) -> String {
    format!(
        "\
# Error: Missing Class Scope

`{selector}` was declared without a `[ClassName ...]` scope, so it has no
class-scoped canonical name.

## Fix

Declare the method inside its class:

    - [MyClass {selector}]

Or use the short name, which does not require a class scope.
"
    )
}
