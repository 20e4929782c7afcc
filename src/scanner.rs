use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::types::{CrossRef, Declaration};

/// Everything the scanner found in one pass over the documentation tree.
#[derive(Debug, Default)]
pub struct ScannedDocs {
    /// Method declaration directives, in file-then-line order.
    pub declarations: Vec<Declaration>,
    /// Inline cross-reference roles, in file-then-line order.
    pub references: Vec<CrossRef>,
}

/// Scan all documentation files under `root` and extract method declaration
/// directives and cross-reference roles. Applies the config's include/exclude
/// filters and extension list to control which files are scanned.
///
/// # Errors
///
/// Returns `Error::Io` if any documentation file cannot be read.
///
/// # Panics
///
/// Panics if a hardcoded directive regex is invalid (compile-time invariant).
pub fn scan(root: &Path, config: &Config) -> Result<ScannedDocs, Error> {
    let directive = Regex::new(r"^\s*\.\. objc:method::(.*)$").expect("valid regex");
    let role = Regex::new(r":objc:method:`([^`]+)`").expect("valid regex");
    let mut docs = ScannedDocs::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file())
    {
        let doc_path = entry.path();
        let relative_source = doc_path.strip_prefix(root).unwrap_or(doc_path).to_path_buf();

        if !config.should_scan(&relative_source) {
            continue;
        }

        let content = std::fs::read_to_string(doc_path)?;
        extract_from_document(&content, &relative_source, &directive, &role, &mut docs);
    }

    return Ok(docs);
}

/// Extract all directives and roles from one document's content.
fn extract_from_document(
    content: &str,
    source: &Path,
    directive: &Regex,
    role: &Regex,
    docs: &mut ScannedDocs,
) {
    for (idx, line) in content.lines().enumerate() {
        let line_number = u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1);
        extract_from_line(line, source, line_number, directive, role, docs);
    }
}

/// Extract directives and roles from a single line.
/// A directive claims the whole line; roles can appear several to a line.
fn extract_from_line(
    line: &str,
    source: &Path,
    line_number: u32,
    directive: &Regex,
    role: &Regex,
    docs: &mut ScannedDocs,
) {
    if let Some(cap) = directive.captures(line) {
        let Some(declaration) = parse_directive_capture(&cap, source, line_number) else {
            return;
        };
        docs.declarations.push(declaration);
        return;
    }

    for cap in role.captures_iter(line) {
        let Some(target) = cap.get(1) else {
            continue;
        };
        docs.references.push(CrossRef {
            line: line_number,
            source: source.to_path_buf(),
            target: target.as_str().to_string(),
        });
    }
}

/// Turn a directive capture into a declaration. Returns `None` when the
/// directive carries no signature text at all; surrounding whitespace belongs
/// to the directive syntax, not the signature.
fn parse_directive_capture(
    cap: &regex::Captures<'_>,
    source: &Path,
    line_number: u32,
) -> Option<Declaration> {
    let signature = cap.get(1)?.as_str().trim();
    if signature.is_empty() {
        return None;
    }

    return Some(Declaration {
        line: line_number,
        signature: signature.to_string(),
        source: source.to_path_buf(),
    });
}
