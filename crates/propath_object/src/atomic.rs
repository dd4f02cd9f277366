use propath_access::{Edited, PathError, Phase, PropertyPath};

use crate::provider::ObjectProvider;
use crate::value::Value;

/// Like [`PropertyPath::edit`], but a failed fold leaves `root` as it was.
///
/// The graph reachable from `root` is snapshotted with
/// [`Value::deep_clone`] before the walk. If the fold fails part way, the
/// root object takes the members of its snapshot back; it keeps its own
/// identity, but objects below it are replaced by their snapshot copies.
/// Failures during the unfold write nothing and need no restore.
///
/// # Examples
///
/// ```
/// use propath_access::{FailureReason, PropertyPath};
/// use propath_object::{ObjectRef, TypeDesc, TypeRef, Value, edit_atomically};
///
/// let counter = TypeDesc::builder("Counter").field("hits", TypeRef::Int).build();
/// let mut root = Value::Object(ObjectRef::new(&counter));
/// let hits = PropertyPath::parse("hits").unwrap();
///
/// let err = edit_atomically(&hits, &mut root, |_| Value::from("many")).unwrap_err();
/// assert_eq!(err.reason(), FailureReason::TypeMismatch);
/// assert_eq!(hits.resolve(&propath_object::ObjectProvider, &root), Ok(Value::Int(0)));
/// ```
pub fn edit_atomically<F>(
    path: &PropertyPath,
    root: &mut Value,
    mutate: F,
) -> Result<Edited<Value>, PathError>
where
    F: FnOnce(Value) -> Value,
{
    let snapshot = root.deep_clone();
    let result = path.edit(&ObjectProvider, root, mutate);

    if let Err(PathError::Access(err)) = &result
        && err.phase() == Phase::Fold
    {
        log::debug!("restoring `{path}` root after a failed fold");
        restore(root, snapshot);
    }
    result
}

fn restore(root: &mut Value, snapshot: Value) {
    match (&*root, &snapshot) {
        (Value::Object(live), Value::Object(saved)) => live.restore_from(saved),
        _ => *root = snapshot,
    }
}

#[cfg(test)]
mod tests {
    use propath_access::{FailureReason, PropertyPath};

    use super::edit_atomically;
    use crate::{ArrayRef, ObjectProvider, ObjectRef, TypeDesc, TypeRef, Value};

    #[test]
    fn failed_rebuild_restores_root() {
        let holder = TypeDesc::builder("Holder")
            .field("cells", TypeRef::array_of(TypeRef::Int))
            .field("hits", TypeRef::Int)
            .build();
        let cells = ArrayRef::new(TypeRef::Int, [Value::Int(1), Value::Int(2)]).unwrap();
        let obj = ObjectRef::new(&holder)
            .with("cells", cells.clone())
            .unwrap()
            .with("hits", 3)
            .unwrap();
        let mut root = Value::Object(obj.clone());

        let path = PropertyPath::parse("cells.Array.data[0]").unwrap();
        let err = edit_atomically(&path, &mut root, |_| Value::from("one")).unwrap_err();
        assert_eq!(err.reason(), FailureReason::TypeMismatch);

        // The root keeps its identity and its members.
        assert!(root.as_object().unwrap().ptr_eq(&obj));
        assert_eq!(obj.get("cells"), Some(Value::Array(cells)));
        assert_eq!(obj.get("hits"), Some(Value::Int(3)));
    }

    #[test]
    fn success_matches_plain_edit() {
        let holder = TypeDesc::builder("Holder").field("hits", TypeRef::Int).build();
        let obj = ObjectRef::new(&holder);
        let mut root = Value::Object(obj.clone());

        let path = PropertyPath::parse("hits").unwrap();
        let edited = edit_atomically(&path, &mut root, |_| Value::Int(9)).unwrap();
        assert!(edited.is_in_place());
        assert_eq!(path.resolve(&ObjectProvider, &root), Ok(Value::Int(9)));
        assert_eq!(obj.get("hits"), Some(Value::Int(9)));
    }
}
