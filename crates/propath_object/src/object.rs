//! Provide shared, mutable object instances.

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use propath_access::AccessErrorKind;

use crate::type_desc::{FixedHashState, TypeDesc};
use crate::value::Value;

/// Copies made so far by a deep clone, keyed by source object address.
pub(crate) type CloneMap = HashMap<usize, ObjectRef, FixedHashState>;

struct ObjectData {
    ty: Rc<TypeDesc>,
    slots: Vec<Value>,
}

/// A handle to an instance of a [`TypeDesc`].
///
/// Cloning the handle does not copy the instance; equality is identity.
/// Member writes are checked against the declared member type.
///
/// # Examples
///
/// ```
/// use propath_object::{ObjectRef, TypeDesc, TypeRef, Value};
///
/// let item = TypeDesc::builder("Item").field("label", TypeRef::Str).build();
/// let a = ObjectRef::new(&item);
/// let b = a.clone();
///
/// a.set("label", "a").unwrap();
/// assert_eq!(b.get("label"), Some(Value::from("a")));
/// assert!(a.set("label", 1).is_err());
/// ```
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    /// Creates an instance of `ty` with every member at its default value.
    pub fn new(ty: &Rc<TypeDesc>) -> Self {
        let slots = ty
            .slot_fields()
            .into_iter()
            .map(|field| field.ty().default_value())
            .collect();
        Self::from_parts(ty.clone(), slots)
    }

    #[inline]
    fn from_parts(ty: Rc<TypeDesc>, slots: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(ObjectData { ty, slots })))
    }

    /// Sets member `name` and returns the handle, for building instances.
    pub fn with(self, name: &str, value: impl Into<Value>) -> Result<Self, AccessErrorKind> {
        self.set(name, value)?;
        Ok(self)
    }

    #[inline]
    pub fn type_desc(&self) -> Rc<TypeDesc> {
        self.0.borrow().ty.clone()
    }

    /// Returns `true` if the instance has member `name`, inherited and
    /// private members included.
    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.0.borrow().ty.lookup(name).is_some()
    }

    /// Returns the current value of member `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        let (slot, _) = data.ty.lookup(name)?;
        data.slots.get(slot).cloned()
    }

    /// Stores `value` into member `name`.
    ///
    /// Fails with [`AccessErrorKind::NoSuchMember`] if there is no such
    /// member and with [`AccessErrorKind::TypeMismatch`] if its declared type
    /// cannot hold `value`.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), AccessErrorKind> {
        let value = value.into();
        let slot = {
            let data = self.0.borrow();
            let Some((slot, field)) = data.ty.lookup(name) else {
                return Err(AccessErrorKind::NoSuchMember {
                    type_name: data.ty.name().into(),
                });
            };
            if !field.ty().accepts(&value) {
                return Err(AccessErrorKind::TypeMismatch {
                    expected: field.ty().to_string(),
                    found: value.type_name(),
                });
            }
            slot
        };
        self.0.borrow_mut().slots[slot] = value;
        Ok(())
    }

    /// Returns `true` if both handles point to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Overwrites every member of this instance with the members of `saved`.
    ///
    /// Both must be instances of the same type.
    pub fn restore_from(&self, saved: &ObjectRef) {
        if self.ptr_eq(saved) {
            return;
        }
        let slots = saved.0.borrow().slots.clone();
        self.0.borrow_mut().slots = slots;
    }

    #[inline]
    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    pub(crate) fn deep_clone_in(&self, seen: &mut CloneMap) -> ObjectRef {
        if let Some(copy) = seen.get(&self.addr()) {
            return copy.clone();
        }
        let data = self.0.borrow();
        let copy = Self::from_parts(data.ty.clone(), Vec::new());
        seen.insert(self.addr(), copy.clone());

        let slots = data.slots.iter().map(|v| v.deep_clone_in(seen)).collect();
        copy.0.borrow_mut().slots = slots;
        copy
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    /// Prints the type and address only; object graphs may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        write!(f, "ObjectRef({} @ {:p})", data.ty.name(), Rc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use propath_access::AccessErrorKind;

    use crate::{ArrayRef, ObjectRef, TypeDesc, TypeRef, Value};

    fn node_type() -> Rc<TypeDesc> {
        TypeDesc::builder("Node")
            .field("value", TypeRef::Int)
            .field("next", TypeRef::Object(None))
            .build()
    }

    #[test]
    fn defaults_and_checked_writes() {
        let ty = TypeDesc::builder("Bag")
            .field("count", TypeRef::Int)
            .field("name", TypeRef::Str)
            .field("items", TypeRef::array_of(TypeRef::Int))
            .build();
        let bag = ObjectRef::new(&ty);

        assert_eq!(bag.get("count"), Some(Value::Int(0)));
        assert_eq!(bag.get("name"), Some(Value::from("")));
        assert_eq!(bag.get("items"), Some(Value::Array(ArrayRef::empty(TypeRef::Int))));
        assert_eq!(bag.get("missing"), None);

        assert_eq!(
            bag.set("count", "many"),
            Err(AccessErrorKind::TypeMismatch {
                expected: "int".into(),
                found: "str".into(),
            })
        );
        assert_eq!(
            bag.set("missing", 1),
            Err(AccessErrorKind::NoSuchMember {
                type_name: "Bag".into(),
            })
        );
        assert_eq!(bag.get("count"), Some(Value::Int(0)));
    }

    #[test]
    fn deep_clone_keeps_sharing_and_cycles() {
        let ty = node_type();
        let a = ObjectRef::new(&ty).with("value", 1).unwrap();
        let b = ObjectRef::new(&ty).with("value", 2).unwrap();
        a.set("next", b.clone()).unwrap();
        b.set("next", a.clone()).unwrap();

        let copy = Value::Object(a.clone()).deep_clone();
        let copy_a = copy.as_object().unwrap().clone();
        assert!(!copy_a.ptr_eq(&a));

        let copy_b = copy_a.get("next").unwrap().as_object().unwrap().clone();
        assert!(!copy_b.ptr_eq(&b));
        assert_eq!(copy_b.get("value"), Some(Value::Int(2)));
        // The cycle closes on the copy, not on the source.
        assert!(copy_b.get("next").unwrap().as_object().unwrap().ptr_eq(&copy_a));

        copy_a.set("value", 10).unwrap();
        assert_eq!(a.get("value"), Some(Value::Int(1)));
    }

    #[test]
    fn restore_from_snapshot() {
        let ty = node_type();
        let live = ObjectRef::new(&ty).with("value", 1).unwrap();
        let saved = Value::Object(live.clone()).deep_clone();

        live.set("value", 5).unwrap();
        live.restore_from(saved.as_object().unwrap());
        assert_eq!(live.get("value"), Some(Value::Int(1)));
    }
}
