//! Accessors and RFC 6901 pointers.
//!
//! A [`Pointer`] is a sequence of [`Accessor`]s, not a string. Its text form is
//! derived: every token is escaped (`~` → `~0`, then `/` → `~1`), prefixed with
//! `/`, and concatenated. The root pointer is written as `/`.
//!
//! # Numeric tokens
//!
//! Parsing never guesses whether a token is an array index: every token
//! becomes an [`Accessor::Key`]. When a key is resolved against an array and
//! the token is a canonical array index (`0`, or digits without a leading
//! zero), it addresses that element. This keeps `/0` working against both
//! `["zero"]` and `{"0": "zero"}`.
//!
//! As a consequence `Pointer::parse(&p.to_string()) == p` holds for pointers
//! made of non-numeric keys. Pointers containing [`Accessor::Index`] come back
//! as equivalent numeric keys, and the single-empty-key pointer `[""]` prints
//! as `/`, which parses back to the root. Both ambiguities are inherent to the
//! text format.

use crate::error::PointerError;
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::trace;

/// A single navigation step that can appear in a [`Pointer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    Key(String),
    Index(usize),
}

impl Accessor {
    pub fn kind(&self) -> AccessorKind {
        match self {
            Accessor::Key(_) => AccessorKind::Key,
            Accessor::Index(_) => AccessorKind::Index,
        }
    }

    /// The unescaped token text.
    pub fn token(&self) -> Cow<'_, str> {
        match self {
            Accessor::Key(key) => Cow::Borrowed(key),
            Accessor::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl From<&str> for Accessor {
    fn from(key: &str) -> Self {
        Accessor::Key(key.to_owned())
    }
}

impl From<String> for Accessor {
    fn from(key: String) -> Self {
        Accessor::Key(key)
    }
}

impl From<usize> for Accessor {
    fn from(index: usize) -> Self {
        Accessor::Index(index)
    }
}

/// Half-open `[start, end)` range over an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: usize,
    pub end: usize,
}

impl Slice {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Slice {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Which kind of accessor failed, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Key,
    Index,
    Slice,
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessorKind::Key => "key",
            AccessorKind::Index => "index",
            AccessorKind::Slice => "slice",
        })
    }
}

/// Path from a root value to one of its descendants. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    accessors: Vec<Accessor>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse RFC 6901 text. See the module docs for how tokens are classified.
    ///
    /// # Errors
    ///
    /// - [`PointerError::MissingLeadingSlash`] if `text` does not start with `/`
    /// - [`PointerError::InvalidEscape`] if a `~` is not followed by `0` or `1`
    ///
    /// # Example
    ///
    /// ```
    /// use jtree_core::{Accessor, Pointer};
    ///
    /// let pointer = Pointer::parse("/a~1b~0c~01").unwrap();
    /// assert_eq!(pointer.as_slice(), &[Accessor::Key("a/b~c~1".to_string())]);
    /// assert_eq!(pointer.to_string(), "/a~1b~0c~01");
    /// assert!(Pointer::parse("/").unwrap().is_root());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        let Some(rest) = text.strip_prefix('/') else {
            trace!(pointer = text, "rejected pointer without leading slash");
            return Err(PointerError::MissingLeadingSlash(text.to_string()));
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }
        rest.split('/')
            .map(|token| unescape_token(token).map(|token| Accessor::Key(token.into_owned())))
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.accessors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    pub fn push(&mut self, accessor: impl Into<Accessor>) {
        self.accessors.push(accessor.into());
    }

    pub fn pop(&mut self) -> Option<Accessor> {
        self.accessors.pop()
    }

    /// A new pointer one step below this one.
    pub fn join(&self, accessor: impl Into<Accessor>) -> Self {
        let mut accessors = Vec::with_capacity(self.accessors.len() + 1);
        accessors.extend_from_slice(&self.accessors);
        accessors.push(accessor.into());
        Self { accessors }
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.accessors.split_last()?;
        Some(Self {
            accessors: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Accessor> {
        self.accessors.last()
    }

    /// `true` if `other` lies strictly below this pointer.
    pub fn is_ancestor_of(&self, other: &Pointer) -> bool {
        self.len() < other.len() && other.accessors.starts_with(&self.accessors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Accessor> {
        self.accessors.iter()
    }

    pub fn as_slice(&self) -> &[Accessor] {
        &self.accessors
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for accessor in &self.accessors {
            f.write_str("/")?;
            f.write_str(&escape_token(&accessor.token()))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(text: &str) -> Result<Self, PointerError> {
        Self::parse(text)
    }
}

impl From<Vec<Accessor>> for Pointer {
    fn from(accessors: Vec<Accessor>) -> Self {
        Self { accessors }
    }
}

impl<const N: usize> From<[Accessor; N]> for Pointer {
    fn from(accessors: [Accessor; N]) -> Self {
        Self {
            accessors: accessors.into(),
        }
    }
}

impl FromIterator<Accessor> for Pointer {
    fn from_iter<I: IntoIterator<Item = Accessor>>(iter: I) -> Self {
        Self {
            accessors: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pointer {
    type Item = &'a Accessor;
    type IntoIter = std::slice::Iter<'a, Accessor>;

    fn into_iter(self) -> Self::IntoIter {
        self.accessors.iter()
    }
}

impl AsRef<[Accessor]> for Pointer {
    fn as_ref(&self) -> &[Accessor] {
        &self.accessors
    }
}

/// Escape one token for pointer text.
///
/// ```
/// use jtree_core::pointer::escape_token;
///
/// assert_eq!(escape_token("a/b~c"), "a~1b~0c");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> Cow<'_, str> {
    if !token.contains(['~', '/']) {
        return Cow::Borrowed(token);
    }
    // `~` first, otherwise the `~` introduced for `/` would be escaped again.
    Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
}

/// Unescape one token of pointer text.
///
/// # Errors
///
/// Returns [`PointerError::InvalidEscape`] if a `~` is not followed by `0` or `1`.
pub fn unescape_token(token: &str) -> Result<Cow<'_, str>, PointerError> {
    if !token.contains('~') {
        return Ok(Cow::Borrowed(token));
    }
    let mut bytes = token.bytes();
    while let Some(byte) = bytes.next() {
        if byte == b'~' && !matches!(bytes.next(), Some(b'0' | b'1')) {
            trace!(token, "rejected pointer token with invalid escape");
            return Err(PointerError::InvalidEscape {
                token: token.to_string(),
            });
        }
    }
    // `~1` first, otherwise `~01` would decode to `/` instead of `~1`.
    Ok(Cow::Owned(token.replace("~1", "/").replace("~0", "~")))
}

/// Canonical array index: `0`, or ASCII digits without a leading zero.
pub(crate) fn parse_array_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.parse().ok()
}
