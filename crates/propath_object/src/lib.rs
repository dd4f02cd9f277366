//! A dynamically typed object model for [`propath_access`].
//!
//! Types are described at run time with [`TypeDesc`]: named members with a
//! declared [`TypeRef`], single inheritance and private members. Instances
//! are [`ObjectRef`] handles, shared and mutable. Arrays are [`ArrayRef`]
//! values: fixed-size and never written after construction.
//!
//! [`ObjectProvider`] implements [`MemberProvider`] over [`Value`], so any
//! [`PropertyPath`] can resolve and edit these graphs.
//!
//! # Examples
//!
//! ```
//! use propath_access::{PathAccess, PropertyPath};
//! use propath_object::{ArrayRef, ObjectProvider, ObjectRef, TypeDesc, TypeRef, Value};
//!
//! let item = TypeDesc::builder("Item").field("label", TypeRef::Str).build();
//! let inventory = TypeDesc::builder("Inventory")
//!     .field("items", TypeRef::array_of(TypeRef::object(&item)))
//!     .build();
//!
//! let items = ArrayRef::new(
//!     TypeRef::object(&item),
//!     ["a", "b"].map(|label| Value::from(ObjectRef::new(&item).with("label", label).unwrap())),
//! )
//! .unwrap();
//! let mut root: Value = ObjectRef::new(&inventory).with("items", items).unwrap().into();
//!
//! let label = PropertyPath::parse("items.Array.data[1].label").unwrap();
//! assert_eq!(label.resolve(&ObjectProvider, &root), Ok(Value::from("b")));
//!
//! let _ = ObjectProvider.assign_path(&mut root, "items.Array.data[1].label", "B".into());
//! assert_eq!(label.resolve(&ObjectProvider, &root), Ok(Value::from("B")));
//! ```
//!
//! [`MemberProvider`]: propath_access::MemberProvider
//! [`PropertyPath`]: propath_access::PropertyPath
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod atomic;
mod object;
mod provider;
mod type_desc;
mod value;


// -----------------------------------------------------------------------------
// Exports

pub use array::ArrayRef;
pub use atomic::edit_atomically;
pub use object::ObjectRef;
pub use provider::ObjectProvider;
pub use type_desc::{FieldDesc, Kind, TypeDesc, TypeDescBuilder, TypeRef, Visibility};
pub use value::Value;
