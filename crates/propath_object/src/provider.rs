use alloc::string::{String, ToString};

use propath_access::{AccessErrorKind, BoxedView, MemberProvider};

use crate::array::ArrayRef;
use crate::type_desc::TypeRef;
use crate::value::Value;

/// Exposes [`Value`] graphs to the path walkers.
///
/// - Members are looked up on the run-time type of an object, inherited and
///   private members included. Scalars, arrays and `null` have no members.
/// - Only [`Value::Array`] is indexable.
/// - An array rebuilt during an edit takes the run-time type of the new
///   element as its element type. If the other elements do not fit that
///   type, the source array's element type is kept when it accepts the new
///   element. A `null` element keeps the source element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectProvider;

impl MemberProvider for ObjectProvider {
    type Value = Value;

    #[inline]
    fn type_name(&self, obj: &Value) -> String {
        obj.type_name()
    }

    #[inline]
    fn has_field(&self, obj: &Value, name: &str) -> bool {
        obj.as_object().is_some_and(|o| o.has(name))
    }

    fn get_field(&self, obj: &Value, name: &str) -> Result<Value, AccessErrorKind> {
        obj.as_object()
            .and_then(|o| o.get(name))
            .ok_or_else(|| AccessErrorKind::NoSuchMember {
                type_name: obj.type_name(),
            })
    }

    fn set_field(&self, obj: &mut Value, name: &str, value: Value) -> Result<(), AccessErrorKind> {
        match obj {
            Value::Object(o) => o.set(name, value),
            _ => Err(AccessErrorKind::NoSuchMember {
                type_name: obj.type_name(),
            }),
        }
    }

    #[inline]
    fn is_indexable(&self, obj: &Value) -> bool {
        matches!(obj, Value::Array(_))
    }

    fn to_boxed_view(&self, obj: &Value) -> Result<BoxedView<Value>, AccessErrorKind> {
        match obj {
            Value::Array(arr) => Ok(BoxedView::new(obj.clone(), arr.iter().cloned().collect())),
            _ => Err(AccessErrorKind::NotIndexable {
                type_name: obj.type_name(),
            }),
        }
    }

    fn with_replaced_at(
        &self,
        view: &BoxedView<Value>,
        index: usize,
        value: Value,
    ) -> Result<Value, AccessErrorKind> {
        let source_elem = match view.source() {
            Value::Array(arr) => arr.element_type().clone(),
            _ => TypeRef::Any,
        };
        let elem = match &value {
            Value::Null => source_elem.clone(),
            other => other.type_ref(),
        };
        let items = view.replaced_at(index, value)?;

        let elem = if items.iter().all(|item| elem.accepts(item)) {
            elem
        } else if source_elem.accepts(&items[index]) {
            log::trace!("array element `{elem}` widened to `{source_elem}`");
            source_elem
        } else {
            let found = &items[index];
            return Err(AccessErrorKind::TypeMismatch {
                expected: source_elem.to_string(),
                found: found.type_name(),
            });
        };

        Ok(Value::Array(ArrayRef::from_checked(elem, items.into_boxed_slice())))
    }
}
