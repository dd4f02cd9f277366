//! Resolve and rewrite values deep inside an object graph by path.
//!
//! A [`PropertyPath`] addresses a value inside a root object through a chain
//! of member names and element positions. The walkers in this crate never
//! look inside a value themselves: every step goes through a
//! [`MemberProvider`], the capability an object model implements to expose
//! member lookup, member writes and fixed-size containers.
//!
//! There are two complementary APIs:
//!
//! - [`PropertyPath`]: a parsed, reusable path. Parse it once, then
//!   [`resolve`], [`unfold`] or [`edit`] against as many roots as needed.
//! - [`PathAccess`]: an extension trait implemented for every provider that
//!   parses the path on each call, for one-off lookups.
//!
//! # Syntax
//!
//! Paths are split on `.`. Two kinds of segment exist:
//!
//! - Field: a member name, e.g. `label`.
//! - Index: the two tokens `Array.data[<n>]`, addressing element `n` of a
//!   fixed-size container.
//!
//! So `items.Array.data[1].label` reads member `items`, element `1` of it,
//! then member `label` of that element. The reserved words can be changed
//! through [`PathSyntax`].
//!
//! # Writes
//!
//! [`PropertyPath::edit`] unfolds to the leaf, replaces it, and folds the new
//! value back up: each parent receives its updated child and is itself handed
//! to its own parent. Fixed-size containers are treated as values, so an
//! index segment rebuilds its container instead of writing into it. When the
//! first segment indexes into the root, the rebuilt root comes back as
//! [`Edited::Rebuilt`].
//!
//! The fold is not transactional; see [`PropertyPath::edit`].
//!
//! # Examples
//!
//! ```
//! use propath_access::{PropertyPath, Segment};
//!
//! let path = PropertyPath::parse("items.Array.data[1].label").unwrap();
//! assert_eq!(
//!     path.segments(),
//!     &[Segment::field("items"), Segment::index(1), Segment::field("label")],
//! );
//! ```
//!
//! [`resolve`]: PropertyPath::resolve
//! [`unfold`]: PropertyPath::unfold
//! [`edit`]: PropertyPath::edit
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod edit;
mod error;
mod path;
mod path_access;
mod provider;
mod walk;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Exports

pub use edit::Edited;
pub use error::{AccessError, AccessErrorKind, FailureReason, Phase};
pub use error::{ParseError, PathError, TryEditError};
pub use path::{PathSyntax, PropertyPath, Segment};
pub use path_access::PathAccess;
pub use provider::{BoxedView, MemberProvider};
pub use walk::ResolutionChain;
