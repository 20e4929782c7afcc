use std::path::PathBuf;

use serde::Serialize;

use crate::config;
use crate::registry::{ObjectIndex, ObjectKind};
use crate::scanner;
use crate::signature::Signature;

/// Output the comprehensive objcdoc reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    config_found: bool,
    cross_references: Option<usize>,
    indexed_objects: Option<usize>,
}

fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(".objcdoc.toml").exists();

    let scanned = config::Config::load(root)
        .ok()
        .and_then(|c| return scanner::scan(root, &c).ok());

    let cross_references = scanned.as_ref().map(|docs| return docs.references.len());
    let indexed_objects = scanned.map(|docs| {
        let mut index = ObjectIndex::new();
        for decl in &docs.declarations {
            if let Ok(sig) = Signature::parse(&decl.signature) {
                index.register(sig.registration_key(), decl.source.clone(), ObjectKind::Method);
            }
        }
        return index.len();
    });

    return CurrentState { config_found, cross_references, indexed_objects };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# objcdoc {version}

Index Objective-C method declarations in documentation sources — parse
signatures into canonical names and track where each method is documented.

## Declaration Syntax

    .. objc:method:: - (void)setName:(NSString *)aName
    .. objc:method:: + [MyClass alloc]

Inline cross-references use the role form:

    :objc:method:`+[MyClass alloc]`

Cross-reference resolution is not implemented: every reference is reported
as unresolved and its target renders as plain text.

## Workflow

    objcdoc list                      Scan docs and list indexed objects
    objcdoc check                     Report malformed declarations and unresolved refs
    objcdoc show <signature>          Print canonical forms for one signature
    objcdoc watch                     Re-run check when documentation changes
    objcdoc info                      This document

## Configuration (.objcdoc.toml)

    include = [\"docs/\"]                 # only scan these paths
    exclude = [\"docs/archive/\"]         # skip these paths
    extensions = [\"md\", \"rst\"]          # file types to scan (default)

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:   .objcdoc.toml (found)");
    } else {
        println!("Config:   .objcdoc.toml (not found)");
    }

    match state.indexed_objects {
        Some(n) => println!("Objects:  {n} indexed"),
        None => println!("Objects:  (scan failed)"),
    }

    match state.cross_references {
        Some(n) => println!("Refs:     {n} cross-references (all unresolved)"),
        None => println!("Refs:     (scan failed)"),
    }
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success / all declarations well-formed |
| 1    | Unresolved cross-references found |
| 2    | Malformed declarations found |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    version: String,
    directive: String,
    role: String,
    exit_codes: Vec<ExitCodeInfo>,
    current_state: StateJson,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    config_found: bool,
    cross_references: Option<usize>,
    indexed_objects: Option<usize>,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        directive: ".. objc:method:: <signature>".to_string(),
        role: ":objc:method:`<target>`".to_string(),
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success / all declarations well-formed".to_string() },
            ExitCodeInfo { code: 1, meaning: "Unresolved cross-references found".to_string() },
            ExitCodeInfo { code: 2, meaning: "Malformed declarations found".to_string() },
            ExitCodeInfo { code: 3, meaning: "Runtime error".to_string() },
        ],
        current_state: StateJson {
            config_found: state.config_found,
            cross_references: state.cross_references,
            indexed_objects: state.indexed_objects,
        },
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
