//! Provide run-time type descriptions: member layout, inheritance and the
//! declared types member slots accept.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::HashMap;

use crate::array::ArrayRef;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Hasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5D3A_11C7_90B2_E64F);

/// Member-name hashing with a fixed seed, so lookups do not depend on a
/// random source.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Kind

/// The shape of a [`Value`], without any type detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Object,
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("Null"),
            Self::Bool => f.pad("Bool"),
            Self::Int => f.pad("Int"),
            Self::Float => f.pad("Float"),
            Self::Str => f.pad("Str"),
            Self::Object => f.pad("Object"),
            Self::Array => f.pad("Array"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeRef

/// The declared type of a member slot or of array elements.
///
/// Object and array slots are references and also accept [`Value::Null`].
/// Arrays are covariant: an `Item[]` fits an `object[]` slot.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Any,
    Bool,
    Int,
    Float,
    Str,
    /// An object of the given type or a type derived from it; `None` accepts
    /// any object.
    Object(Option<Rc<TypeDesc>>),
    Array(Box<TypeRef>),
}

impl TypeRef {
    #[inline]
    pub fn object(ty: &Rc<TypeDesc>) -> Self {
        Self::Object(Some(ty.clone()))
    }

    #[inline]
    pub fn array_of(elem: TypeRef) -> Self {
        Self::Array(Box::new(elem))
    }

    /// Returns `true` if a slot of this type can hold `value`.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Object(_) | Self::Array(_), Value::Null) => true,
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Str, Value::Str(_)) => true,
            (Self::Object(None), Value::Object(_)) => true,
            (Self::Object(Some(ty)), Value::Object(obj)) => obj.type_desc().is_subtype_of(ty),
            (Self::Array(elem), Value::Array(arr)) => elem.is_assignable_from(arr.element_type()),
            _ => false,
        }
    }

    /// Returns `true` if every value of type `other` fits a slot of this type.
    pub fn is_assignable_from(&self, other: &TypeRef) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Bool, Self::Bool)
            | (Self::Int, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::Str, Self::Str) => true,
            (Self::Object(None), Self::Object(_)) => true,
            (Self::Object(Some(ty)), Self::Object(Some(other))) => other.is_subtype_of(ty),
            (Self::Array(elem), Self::Array(other)) => elem.is_assignable_from(other),
            _ => false,
        }
    }

    /// The value a fresh slot of this type starts with.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Any | Self::Object(_) => Value::Null,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::from(""),
            Self::Array(elem) => Value::Array(ArrayRef::empty((**elem).clone())),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any)
            | (Self::Bool, Self::Bool)
            | (Self::Int, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::Str, Self::Str)
            | (Self::Object(None), Self::Object(None)) => true,
            (Self::Object(Some(a)), Self::Object(Some(b))) => a.is_same_type(b),
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Object(None) => f.write_str("object"),
            Self::Object(Some(ty)) => f.write_str(ty.name()),
            Self::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Fields

/// Member visibility. Path lookup sees both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A member declared directly on a [`TypeDesc`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
    name: Box<str>,
    ty: TypeRef,
    visibility: Visibility,
}

impl FieldDesc {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

// -----------------------------------------------------------------------------
// TypeDesc

/// A named object type: its own members plus those inherited from its base.
///
/// Object slots are laid out base-first, so a member keeps its slot in every
/// derived type. Lookup by name searches the most derived type first, which
/// lets a derived member shadow an inherited one of the same name.
///
/// # Examples
///
/// ```
/// use propath_object::{TypeDesc, TypeRef};
///
/// let base = TypeDesc::builder("Widget")
///     .private_field("id", TypeRef::Int)
///     .build();
/// let button = TypeDesc::builder("Button")
///     .base(&base)
///     .field("caption", TypeRef::Str)
///     .build();
///
/// assert_eq!(button.slot_count(), 2);
/// assert_eq!(button.lookup("id").map(|(slot, _)| slot), Some(0));
/// assert_eq!(button.lookup("caption").map(|(slot, _)| slot), Some(1));
/// assert!(button.is_subtype_of(&base));
/// ```
#[derive(Debug)]
pub struct TypeDesc {
    name: Box<str>,
    base: Option<Rc<TypeDesc>>,
    fields: Box<[FieldDesc]>,
    index: HashMap<Box<str>, usize, FixedHashState>,
    /// Number of slots taken by the base types.
    offset: usize,
}

impl TypeDesc {
    /// Starts describing a type called `name`.
    #[inline]
    pub fn builder(name: impl Into<String>) -> TypeDescBuilder {
        TypeDescBuilder {
            name: name.into(),
            base: None,
            fields: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn base(&self) -> Option<&Rc<TypeDesc>> {
        self.base.as_ref()
    }

    /// Returns the members declared directly on this type.
    #[inline]
    pub fn own_fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    /// Returns the number of slots of an instance, inherited members included.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.offset + self.fields.len()
    }

    /// Iterates over this type and its bases, most derived first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDesc> {
        core::iter::successors(Some(self), |ty| ty.base.as_deref())
    }

    /// Finds member `name`, inherited and private members included.
    ///
    /// Returns the slot of the member in an instance and its description.
    pub fn lookup(&self, name: &str) -> Option<(usize, &FieldDesc)> {
        self.ancestors().find_map(|ty| {
            ty.index
                .get(name)
                .map(|&i| (ty.offset + i, &ty.fields[i]))
        })
    }

    /// Returns `true` if this type is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &TypeDesc) -> bool {
        self.ancestors().any(|ty| ty.is_same_type(other))
    }

    #[inline]
    fn is_same_type(&self, other: &TypeDesc) -> bool {
        core::ptr::eq(self, other) || self.name == other.name
    }

    /// Returns every member in slot order, inherited members first.
    pub fn slot_fields(&self) -> Vec<&FieldDesc> {
        let mut out = Vec::with_capacity(self.slot_count());
        let mut chain: Vec<&TypeDesc> = self.ancestors().collect();
        chain.reverse();
        for ty in chain {
            out.extend(ty.fields.iter());
        }
        out
    }
}

/// Builder for [`TypeDesc`], see [`TypeDesc::builder`].
#[derive(Debug)]
pub struct TypeDescBuilder {
    name: String,
    base: Option<Rc<TypeDesc>>,
    fields: Vec<FieldDesc>,
}

impl TypeDescBuilder {
    /// Derives the type from `base`.
    #[inline]
    pub fn base(mut self, base: &Rc<TypeDesc>) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Declares a public member. Declaring the same name twice replaces the
    /// earlier declaration in place.
    #[inline]
    pub fn field(self, name: impl Into<Box<str>>, ty: TypeRef) -> Self {
        self.declare(name.into(), ty, Visibility::Public)
    }

    #[inline]
    pub fn private_field(self, name: impl Into<Box<str>>, ty: TypeRef) -> Self {
        self.declare(name.into(), ty, Visibility::Private)
    }

    fn declare(mut self, name: Box<str>, ty: TypeRef, visibility: Visibility) -> Self {
        let field = FieldDesc {
            name,
            ty,
            visibility,
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(slot) => *slot = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn build(self) -> Rc<TypeDesc> {
        let mut index = HashMap::with_capacity_and_hasher(self.fields.len(), FixedHashState);
        for (i, field) in self.fields.iter().enumerate() {
            index.insert(field.name.clone(), i);
        }
        let offset = self.base.as_ref().map_or(0, |base| base.slot_count());

        Rc::new(TypeDesc {
            name: self.name.into_boxed_str(),
            base: self.base,
            fields: self.fields.into_boxed_slice(),
            index,
            offset,
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
