//! Core CLI commands for objcdoc: list, check, show.

use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;

use crate::config;
use crate::error;
use crate::registry::{ObjectIndex, ObjectKind};
use crate::scanner::{self, ScannedDocs};
use crate::signature::Signature;

/// Scan the documentation tree, register every well-formed declaration, and
/// print the indexed objects sorted by canonical name. Malformed
/// declarations are reported to stderr and skipped.
///
/// # Errors
///
/// Returns errors from config loading or scanning.
pub fn list(json: bool) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let docs = scanner::scan(&root, &config)?;

    let mut index = ObjectIndex::new();
    let malformed = index_declarations(&docs, &mut index);

    let mut rows: Vec<ObjectJson> = index
        .objects()
        .map(|row| {
            return ObjectJson {
                kind: row.kind,
                location: row.location.display().to_string(),
                name: row.canonical_name.to_string(),
            };
        })
        .collect();
    rows.sort_by(|a, b| return a.name.cmp(&b.name));

    if json {
        // serde_json::to_string_pretty won't fail on this structure.
        let out = serde_json::to_string_pretty(&rows).unwrap_or_default();
        println!("{out}");
    } else {
        for row in &rows {
            println!("{}  {}  ({})", row.name, row.kind.as_str(), row.location);
        }
        let total = rows.len();
        println!("{total} objects indexed");
    }

    if malformed > 0 {
        eprintln!("{malformed} malformed declarations skipped");
        return Ok(ExitCode::FAILURE);
    }
    return Ok(ExitCode::SUCCESS);
}

/// Scan and parse everything, reporting malformed declarations and
/// unresolved cross-references. Resolution is unimplemented, so every
/// reference found is reported as unresolved and degrades to plain text.
///
/// # Errors
///
/// Returns errors from config loading or scanning.
pub fn check() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let docs = scanner::scan(&root, &config)?;

    let mut index = ObjectIndex::new();
    let mut malformed_count = 0_u32;

    for decl in &docs.declarations {
        match Signature::parse(&decl.signature) {
            Ok(sig) => {
                index.register(sig.registration_key(), decl.source.clone(), ObjectKind::Method);
            },
            Err(e) => {
                malformed_count = malformed_count.saturating_add(1);
                println!("MALFORMED   {}:{} ({e})", decl.source.display(), decl.line);
            },
        }
    }

    let mut unresolved_count = 0_u32;
    for reference in &docs.references {
        if index.resolve_reference(&reference.target).is_none() {
            unresolved_count = unresolved_count.saturating_add(1);
            println!(
                "UNRESOLVED  {}:{} `{}` (rendered as plain text)",
                reference.source.display(),
                reference.line,
                reference.target,
            );
        }
    }

    // Exit code priority: malformed (2) > unresolved (1) > clean (0).
    if malformed_count > 0 {
        println!();
        println!("{malformed_count} malformed, {unresolved_count} unresolved");
        return Ok(ExitCode::from(2));
    } else if unresolved_count > 0 {
        println!();
        println!("{unresolved_count} unresolved");
        return Ok(ExitCode::from(1));
    } else {
        let total = docs.declarations.len();
        println!("All {total} declarations well-formed");
        return Ok(ExitCode::SUCCESS);
    }
}

/// Parse one signature given on the command line and print its canonical
/// forms and renderable fragments.
///
/// # Errors
///
/// Returns `Error::MalformedSignature` when the argument does not parse.
pub fn show(raw: &str, json: bool) -> Result<ExitCode, error::Error> {
    let sig = Signature::parse(raw)?;

    if json {
        let out = ShowJson {
            arguments: sig.rendered_arguments(),
            class_name: sig.class_name().map(str::to_string),
            full_name: sig.full_name().ok(),
            receiver: sig.receiver().marker().to_string(),
            ref_name: sig.ref_name().ok(),
            registration_key: sig.registration_key(),
            return_type: sig.return_type().map(str::to_string),
            selector: sig.selector(),
            short_name: sig.short_name(),
        };
        // serde_json::to_string_pretty won't fail on this structure.
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        return Ok(ExitCode::SUCCESS);
    }

    println!("selector    {}", sig.selector());
    println!("receiver    {}", sig.receiver().marker());
    println!("return      {}", or_none(&sig.return_type_fragment()));
    println!("arguments   {}", sig.rendered_arguments());
    println!("short name  {}", sig.short_name());
    if sig.class_name().is_some() {
        // Both require the class scope, which we just checked.
        println!("full name   {}", sig.full_name().unwrap_or_default());
        println!("ref name    {}", sig.ref_name().unwrap_or_default());
    }
    println!("key         {}", sig.registration_key());

    return Ok(ExitCode::SUCCESS);
}

/// Parse every scanned declaration into the index. Returns the number of
/// malformed declarations, each reported to stderr with its location.
fn index_declarations(docs: &ScannedDocs, index: &mut ObjectIndex) -> u32 {
    let mut malformed = 0_u32;
    for decl in &docs.declarations {
        match Signature::parse(&decl.signature) {
            Ok(sig) => {
                index.register(sig.registration_key(), decl.source.clone(), ObjectKind::Method);
            },
            Err(e) => {
                malformed = malformed.saturating_add(1);
                eprintln!("skipping {}:{}: {e}", decl.source.display(), decl.line);
            },
        }
    }
    return malformed;
}

/// Replace an empty fragment with `(none)` for aligned plain output.
fn or_none(fragment: &str) -> &str {
    if fragment.is_empty() {
        return "(none)";
    }
    return fragment;
}

/// One indexed object as printed by `list --json`.
#[derive(Serialize)]
struct ObjectJson {
    /// Object kind tag.
    kind: ObjectKind,
    /// Declaring documentation file.
    location: String,
    /// Canonical name the object is registered under.
    name: String,
}

/// Everything `show --json` prints for one signature.
#[derive(Serialize)]
struct ShowJson {
    /// Rendered argument sequence.
    arguments: String,
    /// Enclosing class name, if class-scoped.
    class_name: Option<String>,
    /// Canonical class-scoped heading, if class-scoped.
    full_name: Option<String>,
    /// Receiver marker, `+` or `-`.
    receiver: String,
    /// Canonical cross-reference key, if class-scoped.
    ref_name: Option<String>,
    /// Key the declaration would be registered under.
    registration_key: String,
    /// Declared return type, if any.
    return_type: Option<String>,
    /// Bare selector.
    selector: String,
    /// Canonical unscoped heading.
    short_name: String,
}
