//! Failure reporting shared by the grammar, the providers and both walkers.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::path::Segment;

// -----------------------------------------------------------------------------
// Failure taxonomy

/// The flat failure taxonomy, one entry per way a walk can fail.
///
/// Every error in this crate maps onto exactly one [`FailureReason`] through a
/// `reason()` method, so callers can branch on the outcome without matching
/// nested payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    MalformedPath,
    NoSuchMember,
    NotIndexable,
    IndexOutOfRange,
    TypeMismatch,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPath => f.pad("MalformedPath"),
            Self::NoSuchMember => f.pad("NoSuchMember"),
            Self::NotIndexable => f.pad("NotIndexable"),
            Self::IndexOutOfRange => f.pad("IndexOutOfRange"),
            Self::TypeMismatch => f.pad("TypeMismatch"),
        }
    }
}

// -----------------------------------------------------------------------------
// Parse error

/// A path string that could not be parsed into segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Encountered an error at offset {offset} while parsing `{path}`: {error}")]
pub struct ParseError {
    /// Byte offset of the offending token in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: Box<str>,
    /// The underlying error.
    pub error: Cow<'static, str>,
}

impl ParseError {
    #[inline]
    pub(crate) fn new(offset: usize, path: &str, error: impl Into<Cow<'static, str>>) -> Self {
        Self {
            offset,
            path: path.into(),
            error: error.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// Access error

/// The reason a single member or element access failed.
///
/// This is what a [`MemberProvider`](crate::MemberProvider) reports; the walkers
/// wrap it into an [`AccessError`] that also records where the failure happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AccessErrorKind {
    #[error("`{type_name}` has no member with this name")]
    NoSuchMember { type_name: String },

    #[error("`{type_name}` is not an indexable container")]
    NotIndexable { type_name: String },

    #[error("index {index} is out of range for a container of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("expected a value of type `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
}

impl AccessErrorKind {
    /// Returns the taxonomy entry of this failure.
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::NoSuchMember { .. } => FailureReason::NoSuchMember,
            Self::NotIndexable { .. } => FailureReason::NotIndexable,
            Self::IndexOutOfRange { .. } => FailureReason::IndexOutOfRange,
            Self::TypeMismatch { .. } => FailureReason::TypeMismatch,
        }
    }
}

/// The walk phase a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Forward traversal from the root to the leaf. Nothing has been written.
    Unfold,
    /// Backward traversal writing the new leaf up the chain.
    Fold,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unfold => f.pad("unfold"),
            Self::Fold => f.pad("fold"),
        }
    }
}

/// An error originating from one segment of a walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error accessing `{segment}` (segment {depth}) during {phase}: {kind}")]
pub struct AccessError {
    kind: AccessErrorKind,
    segment: Segment,
    depth: usize,
    phase: Phase,
}

impl AccessError {
    #[inline]
    pub(crate) fn new(kind: AccessErrorKind, segment: &Segment, depth: usize, phase: Phase) -> Self {
        Self {
            kind,
            segment: segment.clone(),
            depth,
            phase,
        }
    }

    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the segment that could not be applied.
    #[inline]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the position of the failing segment within its path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn reason(&self) -> FailureReason {
        self.kind.reason()
    }
}

// -----------------------------------------------------------------------------
// Path error

/// An error returned from a failed parse, resolve or edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A path string that could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Traversal or write-back failed after parsing.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl PathError {
    /// Returns the taxonomy entry of this failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use propath_access::{FailureReason, PropertyPath};
    ///
    /// let err = PropertyPath::parse("items.Array.data[x]").unwrap_err();
    /// assert_eq!(propath_access::PathError::from(err).reason(), FailureReason::MalformedPath);
    /// ```
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Parse(_) => FailureReason::MalformedPath,
            Self::Access(err) => err.reason(),
        }
    }

    /// Returns the access error, if the failure happened during a walk.
    #[inline]
    pub fn as_access(&self) -> Option<&AccessError> {
        match self {
            Self::Access(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}

/// An error returned from [`PropertyPath::try_edit`](crate::PropertyPath::try_edit).
#[derive(Debug, Error)]
pub enum TryEditError<E> {
    #[error(transparent)]
    Path(#[from] PathError),
    /// The edit callback refused the leaf. Nothing was written.
    #[error("edit callback failed: {0}")]
    Callback(E),
}

impl<E> From<AccessError> for TryEditError<E> {
    #[inline]
    fn from(value: AccessError) -> Self {
        Self::Path(PathError::Access(value))
    }
}
