//! Objective-C method signature parsing and canonical name derivation.
//!
//! A declaration looks like `- (void)setName:(NSString *)aName` or
//! `+ [MyClass alloc]`: an optional `+`/`-` receiver marker, an optional
//! parenthesized return type, an optional `[ClassName ` scope that must be
//! closed by a trailing `]`, and one or more selector fragments each
//! optionally carrying a typed parameter. Parsing either yields an immutable
//! [`Signature`] or fails with `Error::MalformedSignature` carrying the raw
//! input verbatim.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Overall shape of a declaration. The closing bracket is captured
/// separately because the regex engine has no conditional groups; the pairing
/// with the class scope is enforced in [`Signature::parse`].
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
static OUTER: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(
        r"^(?P<marker>[+-])? ?(?:\((?P<ret>[\w *]+)\))? ?(?:\[(?P<class>\w+) )?(?P<inner>(?:\w+(?::(?:\([\w *]+\))?\w*)? ?)+)(?P<close>\])?$",
    )
    .expect("valid regex");
});

/// One selector fragment (`^\w+`) at the cursor of the inner signature.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\w+").expect("valid regex");
});

/// A parenthesized parameter type (`(NSString *)`) at the cursor.
///
/// # Panics
///
/// Panics if the hardcoded pattern is invalid (compile-time invariant).
static PARAM_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\(([\w *]+)\)").expect("valid regex");
});

/// One selector fragment plus its optional typed parameter.
///
/// Built once per matched fragment during splitting and never mutated.
/// `param_type`/`param_name` are only meaningful when `has_argument` is true;
/// either or both may be absent even then (a colon with nothing after it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Whether this fragment is followed by `:` introducing a parameter.
    pub has_argument: bool,
    /// Parameter name, absent when the parameter is unnamed.
    pub param_name: Option<String>,
    /// Parameter type text, absent when the parameter is untyped.
    pub param_type: Option<String>,
    /// Bare identifier naming this fragment. Never empty.
    pub selector_part: String,
}

impl Argument {
    /// Render this fragment for headings: `selectorPart` alone without an
    /// argument, otherwise `selectorPart:(type)name` with each of `(type)`
    /// and `name` omitted when absent.
    pub fn render(&self) -> String {
        if !self.has_argument {
            return self.selector_part.clone();
        }
        let type_str = self
            .param_type
            .as_ref()
            .map(|t| return format!("({t})"))
            .unwrap_or_default();
        let name_str = self.param_name.as_deref().unwrap_or("");
        return format!("{}:{type_str}{name_str}", self.selector_part);
    }

    /// The fragment's contribution to the selector: the bare part, suffixed
    /// with `:` when it takes an argument.
    pub fn selector_fragment(&self) -> String {
        if self.has_argument {
            return format!("{}:", self.selector_part);
        }
        return self.selector_part.clone();
    }
}

/// Whether a method belongs to the class itself or to its instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `+` methods.
    Class,
    /// `-` methods. The default when the declaration has no marker.
    Instance,
}

impl Receiver {
    /// The single-character marker used in every canonical rendering.
    pub fn marker(self) -> &'static str {
        return match self {
            Receiver::Class => "+",
            Receiver::Instance => "-",
        };
    }
}

/// A parsed method declaration. Constructed only by [`Signature::parse`],
/// so every value of this type came from a well-formed declaration.
/// All renderings are pure functions of the fields and byte-stable across
/// calls, which makes them usable as index keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    arguments: Vec<Argument>,
    class_name: Option<String>,
    receiver: Receiver,
    return_type: Option<String>,
}

impl Signature {
    /// Parse a raw declaration string.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedSignature` (carrying `raw` verbatim) when the
    /// string does not match the declaration grammar: empty input, a class
    /// scope without its closing bracket (or a stray closing bracket), an
    /// empty inner signature, or characters no fragment can consume.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let Some(groups) = OUTER.captures(raw) else {
            return Err(malformed(raw));
        };

        // The class scope and the closing bracket are one atomic construct:
        // either side without the other is a parse failure, not a model with
        // a missing field.
        let class_name = groups.name("class").map(|m| return m.as_str().to_string());
        if class_name.is_some() != groups.name("close").is_some() {
            return Err(malformed(raw));
        }

        let receiver = match groups.name("marker").map(|m| return m.as_str()) {
            Some("+") => Receiver::Class,
            _ => Receiver::Instance,
        };
        let return_type = groups.name("ret").map(|m| return m.as_str().to_string());

        let inner = groups.name("inner").map_or("", |m| return m.as_str());
        let arguments = split_arguments(inner, raw)?;

        return Ok(Self { arguments, class_name, receiver, return_type });
    }

    /// The ordered selector fragments, in textual order. Never empty.
    pub fn arguments(&self) -> &[Argument] {
        return &self.arguments;
    }

    /// The enclosing class name, present only for `[Class ...]` declarations.
    pub fn class_name(&self) -> Option<&str> {
        return self.class_name.as_deref();
    }

    /// Class or instance method.
    pub fn receiver(&self) -> Receiver {
        return self.receiver;
    }

    /// The declared return type text, if any.
    pub fn return_type(&self) -> Option<&str> {
        return self.return_type.as_deref();
    }

    /// The bare selector: each fragment concatenated with its colon, no
    /// separators (`doThing:withArg:`). Identifies the method independent of
    /// parameter types and names.
    pub fn selector(&self) -> String {
        return self
            .arguments
            .iter()
            .map(Argument::selector_fragment)
            .collect::<Vec<_>>()
            .concat();
    }

    /// The argument sequence rendered for headings, fragments joined by
    /// single spaces (`setName:(NSString *)aName`).
    pub fn rendered_arguments(&self) -> String {
        return self
            .arguments
            .iter()
            .map(Argument::render)
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// The return type as a renderable fragment: `(void)`, or empty when the
    /// declaration carried no return type.
    pub fn return_type_fragment(&self) -> String {
        return self
            .return_type
            .as_ref()
            .map(|t| return format!("({t})"))
            .unwrap_or_default();
    }

    /// Canonical heading for a declaration without a class scope:
    /// `- (void)setName:(NSString *)aName`.
    pub fn short_name(&self) -> String {
        return format!(
            "{} {}{}",
            self.receiver.marker(),
            self.return_type_fragment(),
            self.rendered_arguments(),
        );
    }

    /// Canonical heading for a class-scoped declaration:
    /// `+ (id)[MyClass alloc]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingClassScope` when the signature has no class
    /// scope. This is an error, not a silently degraded string.
    pub fn full_name(&self) -> Result<String, Error> {
        let class_name = self.require_class_scope()?;
        return Ok(format!(
            "{} {}[{class_name} {}]",
            self.receiver.marker(),
            self.return_type_fragment(),
            self.rendered_arguments(),
        ));
    }

    /// The canonical cross-reference key: `+[MyClass alloc]`. Types and
    /// parameter names are dropped so the key is stable under renames.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingClassScope` when the signature has no class
    /// scope.
    pub fn ref_name(&self) -> Result<String, Error> {
        let class_name = self.require_class_scope()?;
        return Ok(format!(
            "{}[{class_name} {}]",
            self.receiver.marker(),
            self.selector(),
        ));
    }

    /// The key a declaration is registered under: `ref_name` for
    /// class-scoped signatures, otherwise the short name.
    pub fn registration_key(&self) -> String {
        return match self.ref_name() {
            Ok(name) => name,
            Err(_) => self.short_name(),
        };
    }

    /// The class name, or `MissingClassScope` naming the selector.
    fn require_class_scope(&self) -> Result<&str, Error> {
        return self.class_name.as_deref().ok_or_else(|| {
            return Error::MissingClassScope { selector: self.selector() };
        });
    }
}

/// Split the inner signature into its ordered selector/argument units.
///
/// The cursor walks left to right: a fragment word, an optional `:` with an
/// optional `(type)` and an optional bare name, then a single space as
/// separator. A bare word immediately followed by `:` is the next unit's
/// selector part, never the previous unit's parameter name — that keeps
/// `doThing:withArg:` two units instead of one.
///
/// # Errors
///
/// Returns `Error::MalformedSignature` (carrying `raw`) when no unit can be
/// matched or when characters remain that no unit can consume.
fn split_arguments(inner: &str, raw: &str) -> Result<Vec<Argument>, Error> {
    let mut arguments = Vec::new();
    let mut rest = inner;

    while !rest.is_empty() {
        let Some(word) = WORD.find(rest) else {
            return Err(malformed(raw));
        };
        let selector_part = word.as_str().to_string();
        rest = &rest[word.end()..];

        let mut has_argument = false;
        let mut param_type = None;
        let mut param_name = None;

        if let Some(after_colon) = rest.strip_prefix(':') {
            has_argument = true;
            rest = after_colon;

            if let Some(ty) = PARAM_TYPE.captures(rest) {
                param_type = ty.get(1).map(|m| return m.as_str().to_string());
                rest = &rest[ty.get(0).map_or(0, |m| return m.end())..];
            }

            if let Some(name) = WORD.find(rest)
                && !rest[name.end()..].starts_with(':')
            {
                param_name = Some(name.as_str().to_string());
                rest = &rest[name.end()..];
            }
        }

        arguments.push(Argument { has_argument, param_name, param_type, selector_part });

        // A single trailing space is a separator, never part of a token.
        if let Some(after_space) = rest.strip_prefix(' ') {
            rest = after_space;
        } else if !rest.is_empty() {
            return Err(malformed(raw));
        }
    }

    if arguments.is_empty() {
        return Err(malformed(raw));
    }
    return Ok(arguments);
}

/// Build the parse-failure error carrying the input verbatim.
fn malformed(raw: &str) -> Error {
    return Error::MalformedSignature { signature: raw.to_string() };
}
