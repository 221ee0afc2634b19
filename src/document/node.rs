//! Uniform document tree consumed by the validator.
//!
//! Per SCHEMA.md, the engine never parses text itself: it operates on an
//! already-parsed tree of scalar / sequence / mapping nodes. The YAML
//! adapter in `document::yaml` produces this tree; the validator only
//! reads it.

/// Node kind as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Scalar,
    Sequence,
    Mapping,
}

/// Resolved scalar category.
///
/// Plain scalars arrive pre-resolved by the document parser (booleans,
/// integers, floats); quoted scalars and unresolvable plains arrive as
/// strings. YAML 1.1 boolean words (`y`, `yes`, `on`, ...) arrive as
/// strings and are handled by the probes below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

/// A scalar value: its category plus a canonical text.
///
/// The text is what `Node::render` emits and what literal comparison uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub kind: ScalarKind,
    pub text: String,
}

impl Scalar {
    pub fn bool(value: bool) -> Self {
        Self {
            kind: ScalarKind::Bool,
            text: if value { "true".into() } else { "false".into() },
        }
    }

    pub fn int(text: impl Into<String>) -> Self {
        Self {
            kind: ScalarKind::Int,
            text: text.into(),
        }
    }

    pub fn float(value: f64) -> Self {
        Self {
            kind: ScalarKind::Float,
            text: float_text(value),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self {
            kind: ScalarKind::Str,
            text: text.into(),
        }
    }

    /// Re-resolves a bare key segment the way the document parser would
    /// resolve a plain scalar. Used after attribute stripping so that a
    /// stripped key keeps its scalar category.
    pub fn resolve_plain(text: &str) -> Self {
        if text.parse::<i64>().is_ok() || text.parse::<u64>().is_ok() {
            return Self::int(text);
        }
        if matches!(text, "true" | "True" | "TRUE") {
            return Self::bool(true);
        }
        if matches!(text, "false" | "False" | "FALSE") {
            return Self::bool(false);
        }
        if looks_like_float(text) {
            return Self {
                kind: ScalarKind::Float,
                text: text.to_string(),
            };
        }
        Self::string(text)
    }
}

/// Canonical text for a parsed float. Integral values keep a trailing
/// `.0` so that `42.0` does not render as `42`.
pub(crate) fn float_text(value: f64) -> String {
    if value.is_nan() {
        return ".nan".into();
    }
    if value == f64::INFINITY {
        return ".inf".into();
    }
    if value == f64::NEG_INFINITY {
        return "-.inf".into();
    }
    let mut text = format!("{}", value);
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

fn looks_like_float(text: &str) -> bool {
    if text.parse::<f64>().is_err() {
        return false;
    }
    // f64::from_str accepts "nan"/"inf"; plain-scalar resolution does not.
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && text.chars().any(|c| c.is_ascii_digit())
}

// YAML 1.1 boolean words that the document parser leaves as strings.
// `true`/`false` never appear here: the parser resolves them, so a
// string carrying that text was quoted and stays a string.
const BOOL_WORDS: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off",
    "OFF",
];

/// A document node: an optional tag plus a null/scalar/sequence/mapping
/// body. Mapping entries keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: Option<String>,
    body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    pub fn null() -> Self {
        Self {
            tag: None,
            body: Body::Null,
        }
    }

    pub fn scalar(scalar: Scalar) -> Self {
        Self {
            tag: None,
            body: Body::Scalar(scalar),
        }
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self {
            tag: None,
            body: Body::Sequence(items),
        }
    }

    pub fn mapping(entries: Vec<(Node, Node)>) -> Self {
        Self {
            tag: None,
            body: Body::Mapping(entries),
        }
    }

    /// Attaches a tag, stored without the leading `!`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = Some(tag.trim_start_matches('!').to_string());
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            Body::Null => NodeKind::Null,
            Body::Scalar(_) => NodeKind::Scalar,
            Body::Sequence(_) => NodeKind::Sequence,
            Body::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Tag without the leading `!`, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The same node with its tag removed. Cheap when there is no tag.
    pub fn untagged(&self) -> Node {
        Node {
            tag: None,
            body: self.body.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.body, Body::Null)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.body {
            Body::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.body {
            Body::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(Node, Node)]> {
        match &self.body {
            Body::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Scalar type probes. The string probe excludes anything the boolean
    /// probe accepts: a plain `yes` is a boolean, not a string, while a
    /// quoted `'42'` is a string because the parser never resolved it.
    pub fn is_integer(&self) -> bool {
        matches!(self.as_scalar(), Some(s) if s.kind == ScalarKind::Int)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.as_scalar(),
            Some(s) if matches!(s.kind, ScalarKind::Int | ScalarKind::Float)
        )
    }

    pub fn is_boolean(&self) -> bool {
        match self.as_scalar() {
            Some(s) => {
                s.kind == ScalarKind::Bool
                    || (s.kind == ScalarKind::Str && BOOL_WORDS.contains(&s.text.as_str()))
            }
            None => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self.as_scalar(),
            Some(s) if s.kind == ScalarKind::Str && !BOOL_WORDS.contains(&s.text.as_str())
        )
    }
}
