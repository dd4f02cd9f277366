//! Provide the path grammar: segments, parsed paths and the syntax that
//! turns one into the other.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::{self, Write};
use core::str::FromStr;

use fastvec::FastVec;

use crate::error::ParseError;

// -----------------------------------------------------------------------------
// Segment

/// One parsed unit of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// A named member of the current object.
    ///
    /// Example: the `label` of `items.Array.data[1].label`
    Field(Cow<'static, str>),
    /// An element of the current object, which must be a fixed-size container.
    ///
    /// Example: the `1` of `items.Array.data[1].label`
    Index(usize),
}

impl Segment {
    /// Creates a [`Segment::Field`].
    #[inline]
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field(name.into())
    }

    #[inline]
    pub const fn index(position: usize) -> Self {
        Self::Index(position)
    }

    /// Returns the member name if this is a [`Segment::Field`].
    #[inline]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Returns the position if this is a [`Segment::Index`].
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Field(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PathSyntax::DEFAULT.write_segment(self, f)
    }
}

// -----------------------------------------------------------------------------
// Syntax

/// The grammar used to parse and render [`PropertyPath`]s.
///
/// A raw path is split on the delimiter. Two consecutive tokens
/// `<marker>` and `<element>[<n>]` collapse into a single [`Segment::Index`];
/// every other token becomes a [`Segment::Field`].
///
/// # Default Syntax
///
/// - delimiter: `.`
/// - collection marker: `Array`
/// - element prefix: `data`
///
/// so `items.Array.data[1].label` is `[Field(items), Index(1), Field(label)]`.
///
/// # Examples
///
/// ```
/// use propath_access::{PathSyntax, Segment};
///
/// let syntax = PathSyntax::new().with_marker("List").with_element_prefix("at");
/// let path = syntax.parse("slots.List.at[2]").unwrap();
///
/// assert_eq!(path.segments(), &[Segment::field("slots"), Segment::index(2)]);
/// assert_eq!(syntax.render(&path), "slots.List.at[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSyntax {
    delimiter: char,
    marker: Cow<'static, str>,
    element: Cow<'static, str>,
}

impl Default for PathSyntax {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PathSyntax {
    /// The reserved grammar, see [`PathSyntax`].
    pub const DEFAULT: Self = Self::new();

    /// Creates the default syntax.
    #[inline]
    pub const fn new() -> Self {
        Self {
            delimiter: '.',
            marker: Cow::Borrowed("Array"),
            element: Cow::Borrowed("data"),
        }
    }

    #[inline]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the reserved word announcing an element access.
    #[inline]
    pub fn with_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Replaces the word in front of `[<n>]` in an element token.
    #[inline]
    pub fn with_element_prefix(mut self, element: impl Into<Cow<'static, str>>) -> Self {
        self.element = element.into();
        self
    }

    #[inline]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    #[inline]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    #[inline]
    pub fn element_prefix(&self) -> &str {
        &self.element
    }

    /// Parses `raw` into a [`PropertyPath`].
    ///
    /// Empty tokens are skipped. An element token whose index is not a
    /// non-negative base-10 integer is a [`ParseError`], as is a path without
    /// any segment.
    pub fn parse(&self, raw: &str) -> Result<PropertyPath, ParseError> {
        let step = self.delimiter.len_utf8();
        let mut tokens = raw
            .split(self.delimiter)
            .scan(0, |offset, token| {
                let start = *offset;
                *offset += token.len() + step;
                Some((start, token))
            })
            .filter(|(_, token)| !token.is_empty())
            .peekable();

        let mut vec: FastVec<Segment, 8> = FastVec::new();
        let data = vec.data();

        while let Some((offset, token)) = tokens.next() {
            if token == self.marker
                && let Some(&(next_offset, next)) = tokens.peek()
                && let Some(index) = self.element_index(next)
            {
                let index = index.map_err(|error| ParseError::new(next_offset, raw, error))?;
                tokens.next();
                data.push(Segment::Index(index));
                continue;
            }

            log::trace!("path `{raw}`: field token `{token}` at offset {offset}");
            data.push(Segment::Field(Cow::Owned(token.into())));
        }

        let segments = vec.into_boxed_slice();
        if segments.is_empty() {
            return Err(ParseError::new(0, raw, "path has no segments"));
        }
        Ok(PropertyPath(segments))
    }

    /// Renders `path` back into its textual form.
    ///
    /// Parsing the result with the same syntax yields `path` again, as long as
    /// no field name contains the delimiter.
    pub fn render(&self, path: &PropertyPath) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_path(path, &mut out);
        out
    }

    fn write_path(&self, path: &PropertyPath, out: &mut impl Write) -> fmt::Result {
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                out.write_char(self.delimiter)?;
            }
            self.write_segment(segment, out)?;
        }
        Ok(())
    }

    fn write_segment(&self, segment: &Segment, out: &mut impl Write) -> fmt::Result {
        match segment {
            Segment::Field(name) => out.write_str(name),
            Segment::Index(index) => write!(
                out,
                "{}{}{}[{index}]",
                self.marker, self.delimiter, self.element
            ),
        }
    }

    /// Returns `None` if `token` is not an element token at all.
    fn element_index(&self, token: &str) -> Option<Result<usize, &'static str>> {
        let rest = token.strip_prefix(&*self.element)?.strip_prefix('[')?;
        let Some(digits) = rest.strip_suffix(']') else {
            return Some(Err("unterminated element index"));
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Err("element index must be a non-negative base-10 integer"));
        }
        Some(digits.parse().map_err(|_| "element index is too large"))
    }
}

// -----------------------------------------------------------------------------
// Property path

/// A parsed, reusable path, a thin wrapper over `Box<[Segment]>`.
///
/// A `PropertyPath` carries no root-specific state: parse it once and replay
/// it against as many roots as needed. It is never empty.
///
/// # Examples
///
/// ```
/// use propath_access::{PropertyPath, Segment};
///
/// let path: PropertyPath = "items.Array.data[1].label".parse().unwrap();
///
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.segments()[1], Segment::index(1));
/// assert_eq!(path.to_string(), "items.Array.data[1].label");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyPath(Box<[Segment]>);

impl PropertyPath {
    /// Parses `raw` with [`PathSyntax::DEFAULT`].
    #[inline]
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        PathSyntax::DEFAULT.parse(raw)
    }

    /// Builds a path from already-typed segments.
    ///
    /// Fails if `segments` is empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Result<Self, ParseError> {
        let segments: Box<[Segment]> = segments.into_iter().collect();
        if segments.is_empty() {
            return Err(ParseError::new(0, "", "path has no segments"));
        }
        Ok(Self(segments))
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Returns the segment applied to the root.
    #[inline]
    pub fn first(&self) -> &Segment {
        // Non-empty by construction.
        &self.0[0]
    }

    /// Returns the segment addressing the leaf.
    #[inline]
    pub fn last(&self) -> &Segment {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    /// Returns the path to the container of the leaf, or `None` for a
    /// single-segment path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use propath_access::PropertyPath;
    /// let path = PropertyPath::parse("items.Array.data[1].label").unwrap();
    /// let parent = path.parent().unwrap();
    /// assert_eq!(parent.to_string(), "items.Array.data[1]");
    /// assert!(PropertyPath::parse("items").unwrap().parent().is_none());
    /// ```
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            1 => None,
            len => Some(Self(self.0[..len - 1].into())),
        }
    }

    /// Concat two `PropertyPath`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use propath_access::PropertyPath;
    /// let a = PropertyPath::parse("items.Array.data[0]").unwrap();
    /// let b = PropertyPath::parse("label").unwrap();
    /// assert_eq!(a.concat(b).to_string(), "items.Array.data[0].label");
    /// ```
    pub fn concat(self, other: PropertyPath) -> Self {
        let mut vec: FastVec<Segment, 12> = FastVec::new();
        let data = vec.data();
        data.extend(self.0);
        data.extend(other.0);
        Self(vec.into_boxed_slice())
    }
}

impl fmt::Display for PropertyPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PathSyntax::DEFAULT.write_path(self, f)
    }
}

impl FromStr for PropertyPath {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a PropertyPath {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests
