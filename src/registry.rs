//! The in-memory object index: canonical name -> (location, kind).
//!
//! The index lives for one command invocation and is rebuilt from scratch
//! each run; there is no persistence format. The driving command owns the
//! instance and passes it by reference — there is no process-wide state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The kind tag stored with each indexed object. The declaration grammar
/// only describes methods, so there is exactly one kind today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// An Objective-C method declaration.
    Method,
}

impl ObjectKind {
    /// The kind tag as printed in listings.
    pub fn as_str(self) -> &'static str {
        return match self {
            ObjectKind::Method => "method",
        };
    }
}

/// What the index stores per canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ObjectEntry {
    /// Object kind tag.
    kind: ObjectKind,
    /// Documentation file the object was declared in.
    location: PathBuf,
}

/// A snapshot row produced by [`ObjectIndex::objects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRow<'a> {
    /// Canonical name the object is registered under.
    pub canonical_name: &'a str,
    /// Human-facing name. Currently always equal to the canonical name.
    pub display_name: &'a str,
    /// Object kind tag.
    pub kind: ObjectKind,
    /// Documentation file the object was declared in.
    pub location: &'a Path,
}

/// Maps canonical names to their declaring document and kind.
#[derive(Debug, Default)]
pub struct ObjectIndex {
    /// Live entries. At most one per canonical name.
    objects: HashMap<String, ObjectEntry>,
}

impl ObjectIndex {
    /// An empty index.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Insert or overwrite the entry for `canonical_name`. Overwriting is
    /// not an error: during a documentation rebuild the last writer wins.
    pub fn register(&mut self, canonical_name: String, location: PathBuf, kind: ObjectKind) {
        self.objects.insert(canonical_name, ObjectEntry { kind, location });
    }

    /// Remove every entry declared by `location`. Does nothing when no
    /// entries match.
    pub fn clear_document(&mut self, location: &Path) {
        self.objects.retain(|_, entry| return entry.location != location);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        return self.objects.len();
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        return self.objects.is_empty();
    }

    /// Iterate over a snapshot of the indexed objects. Order is unspecified
    /// (the underlying map has no defined iteration order); each call yields
    /// a fresh traversal of the current state.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRow<'_>> {
        return self.objects.iter().map(|(name, entry)| {
            return ObjectRow {
                canonical_name: name,
                display_name: name,
                kind: entry.kind,
                location: &entry.location,
            };
        });
    }

    /// Resolve a cross-reference target against the index.
    ///
    /// Always returns `None`: resolution is unimplemented (a known
    /// limitation carried over from the system this replaces), so callers
    /// must treat every cross-reference as unresolved and degrade its target
    /// to plain text.
    pub fn resolve_reference(&self, _target: &str) -> Option<ObjectRow<'_>> {
        return None;
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn register_overwrites_and_clear_removes() {
        let mut index = ObjectIndex::new();
        let key = "+[MyClass alloc]".to_string();

        index.register(key.clone(), PathBuf::from("docs/a.md"), ObjectKind::Method);
        index.register(key.clone(), PathBuf::from("docs/b.md"), ObjectKind::Method);
        assert_eq!(index.len(), 1);

        // The second registration won, so clearing its document empties the key.
        index.clear_document(Path::new("docs/b.md"));
        assert!(index.is_empty());
    }

    #[test]
    fn clear_document_without_matches_is_a_noop() {
        let mut index = ObjectIndex::new();
        index.register(
            "-[Foo run]".to_string(),
            PathBuf::from("docs/a.md"),
            ObjectKind::Method,
        );
        index.clear_document(Path::new("docs/other.md"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn objects_yields_fresh_snapshots() {
        let mut index = ObjectIndex::new();
        index.register(
            "-[Foo run]".to_string(),
            PathBuf::from("docs/a.md"),
            ObjectKind::Method,
        );
        index.register(
            "+[Foo make]".to_string(),
            PathBuf::from("docs/a.md"),
            ObjectKind::Method,
        );

        assert_eq!(index.objects().count(), 2);
        // Restartable: a second traversal sees the same state.
        assert_eq!(index.objects().count(), 2);

        let row = index
            .objects()
            .find(|r| return r.canonical_name == "-[Foo run]")
            .unwrap();
        assert_eq!(row.display_name, "-[Foo run]");
        assert_eq!(row.kind, ObjectKind::Method);
        assert_eq!(row.location, Path::new("docs/a.md"));
    }

    #[test]
    fn resolution_is_always_unresolved() {
        let mut index = ObjectIndex::new();
        index.register(
            "+[MyClass alloc]".to_string(),
            PathBuf::from("docs/a.md"),
            ObjectKind::Method,
        );
        assert!(index.resolve_reference("+[MyClass alloc]").is_none());
    }
}
