use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

use crate::array::ArrayRef;
use crate::object::{CloneMap, ObjectRef};
use crate::type_desc::{Kind, TypeRef};

/// A run-time value of the object model.
///
/// Objects are shared, mutable handles: cloning a `Value::Object` clones the
/// handle, and writes through one handle are visible through all of them.
/// Arrays are shared but never mutated; see [`ArrayRef`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Str(_) => Kind::Str,
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
        }
    }

    /// Returns the run-time type of the value. `Null` has none and reports
    /// [`TypeRef::Any`].
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Self::Null => TypeRef::Any,
            Self::Bool(_) => TypeRef::Bool,
            Self::Int(_) => TypeRef::Int,
            Self::Float(_) => TypeRef::Float,
            Self::Str(_) => TypeRef::Str,
            Self::Object(obj) => TypeRef::Object(Some(obj.type_desc())),
            Self::Array(arr) => TypeRef::array_of(arr.element_type().clone()),
        }
    }

    /// Names the run-time type, e.g. `int`, `Item` or `Item[]`.
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            _ => self.type_ref().to_string(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Copies the whole graph reachable from this value.
    ///
    /// Every object is copied once: two handles to the same object in the
    /// source become two handles to the same copy, and cycles are preserved.
    pub fn deep_clone(&self) -> Value {
        self.deep_clone_in(&mut CloneMap::default())
    }

    pub(crate) fn deep_clone_in(&self, seen: &mut CloneMap) -> Value {
        match self {
            Self::Object(obj) => Self::Object(obj.deep_clone_in(seen)),
            Self::Array(arr) => Self::Array(arr.deep_clone_in(seen)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    /// Scalars print their value; objects and arrays print their type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Display::fmt(b, f),
            Self::Int(n) => fmt::Display::fmt(n, f),
            Self::Float(n) => fmt::Display::fmt(n, f),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Object(obj) => f.write_str(obj.type_desc().name()),
            Self::Array(arr) => write!(f, "{}[{}]", arr.element_type(), arr.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<ArrayRef> for Value {
    #[inline]
    fn from(value: ArrayRef) -> Self {
        Self::Array(value)
    }
}
