//! Provide fixed-size, immutable arrays.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use core::fmt;

use fastvec::FastVec;
use propath_access::AccessErrorKind;

use crate::object::CloneMap;
use crate::type_desc::TypeRef;
use crate::value::Value;

struct ArrayData {
    elem: TypeRef,
    items: Box<[Value]>,
}

/// A shared handle to a fixed-size array with a declared element type.
///
/// Arrays are values: nothing can write into one after it is built. A path
/// edit through an array builds a new one, so other holders of the old array
/// keep seeing the old elements.
///
/// # Examples
///
/// ```
/// use propath_object::{ArrayRef, TypeRef, Value};
///
/// let arr = ArrayRef::new(TypeRef::Int, [Value::Int(1), Value::Int(2)]).unwrap();
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr.get(1), Some(&Value::Int(2)));
/// assert!(ArrayRef::new(TypeRef::Int, [Value::from("two")]).is_err());
/// ```
#[derive(Clone)]
pub struct ArrayRef(Rc<ArrayData>);

impl ArrayRef {
    /// Builds an array of `elem` from `items`.
    ///
    /// Fails with [`AccessErrorKind::TypeMismatch`] on the first item `elem`
    /// does not accept.
    pub fn new(
        elem: TypeRef,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, AccessErrorKind> {
        let mut vec: FastVec<Value, 8> = FastVec::new();
        let data = vec.data();
        for item in items {
            if !elem.accepts(&item) {
                return Err(AccessErrorKind::TypeMismatch {
                    expected: elem.to_string(),
                    found: item.type_name(),
                });
            }
            data.push(item);
        }
        Ok(Self::from_checked(elem, vec.into_boxed_slice()))
    }

    /// Builds an empty array of `elem`.
    #[inline]
    pub fn empty(elem: TypeRef) -> Self {
        Self::from_checked(elem, Box::new([]))
    }

    /// Caller guarantees that `elem` accepts every item.
    #[inline]
    pub(crate) fn from_checked(elem: TypeRef, items: Box<[Value]>) -> Self {
        Self(Rc::new(ArrayData { elem, items }))
    }

    #[inline]
    pub fn element_type(&self) -> &TypeRef {
        &self.0.elem
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.items.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0.items
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.0.items.iter()
    }

    /// Returns `true` if both handles point to the same array.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn deep_clone_in(&self, seen: &mut CloneMap) -> ArrayRef {
        let items = self.iter().map(|v| v.deep_clone_in(seen)).collect();
        Self::from_checked(self.0.elem.clone(), items)
    }
}

impl PartialEq for ArrayRef {
    /// Arrays compare by element type and elements.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.elem == other.0.elem && self.0.items == other.0.items)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[] ", self.0.elem)?;
        f.debug_list().entries(self.0.items.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ArrayRef {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.items.iter()
    }
}
