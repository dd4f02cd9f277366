#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use propath_access as access;
pub use propath_object as object;

pub use propath_access::{Edited, PathAccess, PathError, PropertyPath, Segment};
pub use propath_object::{ArrayRef, ObjectProvider, ObjectRef, TypeDesc, TypeRef, Value};
