//! Provide the capability seam between the walkers and a concrete object model.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::AccessErrorKind;

// -----------------------------------------------------------------------------
// Member provider

/// Member and element access over the run-time values of an object model.
///
/// The walkers never look inside a value themselves; every step of a walk is
/// one call into a `MemberProvider`. How members are discovered (type
/// metadata, an explicit schema, generated code) is up to the implementation,
/// as long as:
///
/// - member lookup sees every member of the value's *run-time* type,
///   including private and inherited ones;
/// - a missing member is reported as [`AccessErrorKind::NoSuchMember`],
///   never as a panic;
/// - [`with_replaced_at`] never mutates the container the view was taken
///   from.
///
/// `Value` is cloned once per segment boundary during a walk, so it is
/// expected to be a cheap handle or a small value.
///
/// [`with_replaced_at`]: MemberProvider::with_replaced_at
pub trait MemberProvider {
    /// The run-time values this provider can inspect.
    type Value: Clone;

    /// Names the run-time type of `obj` for failure messages.
    fn type_name(&self, obj: &Self::Value) -> String;

    /// Returns `true` if `obj` has a member called `name`.
    fn has_field(&self, obj: &Self::Value, name: &str) -> bool;

    /// Returns the current value of member `name` of `obj`.
    fn get_field(&self, obj: &Self::Value, name: &str) -> Result<Self::Value, AccessErrorKind>;

    /// Stores `value` into member `name` of `obj`.
    ///
    /// Fails with [`AccessErrorKind::TypeMismatch`] if the member's declared
    /// type cannot hold `value`.
    fn set_field(
        &self,
        obj: &mut Self::Value,
        name: &str,
        value: Self::Value,
    ) -> Result<(), AccessErrorKind>;

    /// Returns `true` only for fixed-size, ordered containers.
    ///
    /// Growable collections are not indexable: they are addressed through
    /// members only.
    fn is_indexable(&self, obj: &Self::Value) -> bool;

    /// Returns the elements of `obj` as a [`BoxedView`].
    fn to_boxed_view(&self, obj: &Self::Value) -> Result<BoxedView<Self::Value>, AccessErrorKind>;

    /// Builds a **new** container of the same length and order as `view`,
    /// with element `index` replaced by `value`.
    ///
    /// The element type of the new container follows `value`'s run-time
    /// type rather than being copied from the source, since the walk may have
    /// changed the shape of the element. Elements the provider cannot fit
    /// into the new container are a [`AccessErrorKind::TypeMismatch`].
    fn with_replaced_at(
        &self,
        view: &BoxedView<Self::Value>,
        index: usize,
        value: Self::Value,
    ) -> Result<Self::Value, AccessErrorKind>;
}

// -----------------------------------------------------------------------------
// Boxed view

/// A uniform, element-indexable copy of a fixed-size container.
///
/// The view owns handles to the elements and to the container it was taken
/// from, so a provider can consult the source (for instance its element type)
/// when rebuilding.
///
/// # Examples
///
/// ```
/// use propath_access::{AccessErrorKind, BoxedView};
///
/// // The source is usually the container itself; any value works here.
/// let view = BoxedView::new(0, vec![10, 20, 30]);
/// assert_eq!(view.get_at(1), Ok(&20));
/// assert_eq!(
///     view.get_at(3),
///     Err(AccessErrorKind::IndexOutOfRange { index: 3, len: 3 }),
/// );
/// assert_eq!(view.replaced_at(0, 11).unwrap(), vec![11, 20, 30]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoxedView<V> {
    source: V,
    elements: Vec<V>,
}

impl<V> BoxedView<V> {
    #[inline]
    pub fn new(source: V, elements: Vec<V>) -> Self {
        Self { source, elements }
    }

    /// Returns the container this view was taken from.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.elements
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, V> {
        self.elements.iter()
    }

    /// Returns element `index`, or [`AccessErrorKind::IndexOutOfRange`].
    pub fn get_at(&self, index: usize) -> Result<&V, AccessErrorKind> {
        self.elements
            .get(index)
            .ok_or(AccessErrorKind::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
    }

    /// Consumes the view, returning the source container and its elements.
    #[inline]
    pub fn into_parts(self) -> (V, Vec<V>) {
        (self.source, self.elements)
    }
}

impl<V: Clone> BoxedView<V> {
    /// Copies the elements into a new `Vec`, with element `index` replaced by
    /// `value`.
    ///
    /// This is the element-level half of [`MemberProvider::with_replaced_at`];
    /// providers wrap the result into their own container type.
    pub fn replaced_at(&self, index: usize, value: V) -> Result<Vec<V>, AccessErrorKind> {
        self.get_at(index)?;
        let mut elements = self.elements.clone();
        elements[index] = value;
        Ok(elements)
    }
}

impl<'a, V> IntoIterator for &'a BoxedView<V> {
    type Item = &'a V;
    type IntoIter = core::slice::Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
