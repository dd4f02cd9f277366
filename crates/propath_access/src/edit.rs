//! Provide the read-modify-write walk: unfold to the leaf, replace it, then
//! fold the new value back up to the root.

use core::convert::Infallible;

use crate::error::{AccessError, AccessErrorKind, PathError, Phase, TryEditError};
use crate::path::{PropertyPath, Segment};
use crate::provider::MemberProvider;

// -----------------------------------------------------------------------------
// Edit outcome

/// The result of a successful edit.
///
/// The walker cannot rebind the caller's root. When the first segment of the
/// path indexes into the root container itself, the root is rebuilt rather
/// than written, and the new container is handed back as [`Edited::Rebuilt`]
/// for the caller to store (see [`Edited::store`]) or discard.
#[must_use = "a rebuilt root container is lost unless stored"]
#[derive(Debug, Clone, PartialEq)]
pub enum Edited<V> {
    /// Every ancestor up to and including the root object was updated.
    InPlace,
    /// The rebuilt root container; the caller's root is unchanged.
    Rebuilt(V),
}

impl<V> Edited<V> {
    #[inline]
    pub fn is_in_place(&self) -> bool {
        matches!(self, Self::InPlace)
    }

    #[inline]
    pub fn rebuilt(&self) -> Option<&V> {
        match self {
            Self::InPlace => None,
            Self::Rebuilt(value) => Some(value),
        }
    }

    #[inline]
    pub fn into_rebuilt(self) -> Option<V> {
        match self {
            Self::InPlace => None,
            Self::Rebuilt(value) => Some(value),
        }
    }

    /// Stores a rebuilt root container into `root`. Does nothing for an
    /// in-place edit.
    #[inline]
    pub fn store(self, root: &mut V) {
        if let Self::Rebuilt(value) = self {
            *root = value;
        }
    }
}

// -----------------------------------------------------------------------------
// Fold

/// Injects `child` into `parent` at `segment`.
///
/// Returns the rebuilt container for an index segment, or `None` once the
/// member of `parent` has been written.
fn inject<P: MemberProvider + ?Sized>(
    provider: &P,
    parent: &mut P::Value,
    segment: &Segment,
    child: P::Value,
) -> Result<Option<P::Value>, AccessErrorKind> {
    match segment {
        Segment::Field(name) => provider.set_field(parent, name, child).map(|()| None),
        Segment::Index(index) => {
            let view = provider.to_boxed_view(parent)?;
            provider.with_replaced_at(&view, *index, child).map(Some)
        }
    }
}

impl PropertyPath {
    /// Replaces the value this path addresses inside `root` with
    /// `mutate(current)`.
    ///
    /// The walk has two phases. The unfold resolves the path exactly like
    /// [`resolve`](Self::resolve) and records every object on the way; a
    /// failure there leaves the graph untouched. The fold then writes the new
    /// leaf into its parent, hands the updated parent to the grandparent, and
    /// so on up to the root. Fixed-size containers are never written: each
    /// index segment rebuilds its container with one element replaced and
    /// passes the new container up instead.
    ///
    /// The fold is **not transactional**. If a step fails, the writes made by
    /// the deeper steps before it stay in place; callers that need atomicity
    /// snapshot the graph themselves.
    pub fn edit<P, F>(
        &self,
        provider: &P,
        root: &mut P::Value,
        mutate: F,
    ) -> Result<Edited<P::Value>, PathError>
    where
        P: MemberProvider + ?Sized,
        F: FnOnce(P::Value) -> P::Value,
    {
        self.try_edit(provider, root, |leaf| Ok::<_, Infallible>(mutate(leaf)))
            .map_err(|err| match err {
                TryEditError::Path(err) => err,
                TryEditError::Callback(never) => match never {},
            })
    }

    /// Replaces the value this path addresses inside `root` with `value`.
    #[inline]
    pub fn assign<P: MemberProvider + ?Sized>(
        &self,
        provider: &P,
        root: &mut P::Value,
        value: P::Value,
    ) -> Result<Edited<P::Value>, PathError> {
        self.edit(provider, root, move |_| value)
    }

    /// Like [`edit`](Self::edit), with a callback that may refuse the leaf.
    ///
    /// A callback error aborts the edit before anything is written.
    pub fn try_edit<P, F, E>(
        &self,
        provider: &P,
        root: &mut P::Value,
        mutate: F,
    ) -> Result<Edited<P::Value>, TryEditError<E>>
    where
        P: MemberProvider + ?Sized,
        F: FnOnce(P::Value) -> Result<P::Value, E>,
    {
        let (parents, leaf) = self.unfold(provider, root)?.into_parts();
        let mut child = mutate(leaf).map_err(TryEditError::Callback)?;
        let mut written = 0_usize;

        // `parents[0]` is a snapshot of `root`; the last step works on `root` itself.
        let inner = self
            .iter()
            .enumerate()
            .skip(1)
            .zip(parents.into_iter().skip(1))
            .rev();

        for ((depth, segment), mut parent) in inner {
            child = match inject(provider, &mut parent, segment, child) {
                Ok(Some(rebuilt)) => rebuilt,
                Ok(None) => {
                    written += 1;
                    parent
                }
                Err(kind) => return Err(self.abort_fold(kind, segment, depth, written).into()),
            };
            log::trace!("fold `{segment}` at segment {depth}");
        }

        let first = self.first();
        match inject(provider, root, first, child) {
            Ok(Some(rebuilt)) => Ok(Edited::Rebuilt(rebuilt)),
            Ok(None) => Ok(Edited::InPlace),
            Err(kind) => Err(self.abort_fold(kind, first, 0, written).into()),
        }
    }

    fn abort_fold(
        &self,
        kind: AccessErrorKind,
        segment: &Segment,
        depth: usize,
        written: usize,
    ) -> AccessError {
        let err = AccessError::new(kind, segment, depth, Phase::Fold);
        if written > 0 {
            log::warn!(
                "editing `{self}` stopped after {written} ancestor write(s), which are not rolled back: {err}"
            );
        } else {
            log::debug!("editing `{self}` failed: {err}");
        }
        err
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::Edited;
    use crate::testing::{Node, Plain, inventory};
    use crate::{FailureReason, Phase, PropertyPath, TryEditError};

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    #[test]
    fn edit_round_trip_through_owned_values() {
        let mut root = inventory();
        let label = path("items.Array.data[1].label");

        let edited = label.edit(&Plain, &mut root, |_| Node::Text("B")).unwrap();
        assert_eq!(edited, Edited::InPlace);

        assert_eq!(label.resolve(&Plain, &root), Ok(Node::Text("B")));
        assert_eq!(
            path("items.Array.data[0].label").resolve(&Plain, &root),
            Ok(Node::Text("a"))
        );
        assert_eq!(path("count").resolve(&Plain, &root), Ok(Node::Int(2)));
    }

    #[test]
    fn mutate_sees_current_leaf() {
        let mut root = inventory();
        let count = path("count");
        count
            .edit(&Plain, &mut root, |leaf| match leaf {
                Node::Int(n) => Node::Int(n * 10),
                other => other,
            })
            .unwrap();
        assert_eq!(count.resolve(&Plain, &root), Ok(Node::Int(20)));
    }

    #[test]
    fn unfold_failure_writes_nothing() {
        let mut root = inventory();
        let before = root.clone();

        for (raw, reason) in [
            ("items.Array.data[5].label", FailureReason::IndexOutOfRange),
            ("items.Array.data[1].missingField", FailureReason::NoSuchMember),
            ("count.Array.data[0]", FailureReason::NotIndexable),
        ] {
            let mut called = false;
            let err = path(raw)
                .edit(&Plain, &mut root, |leaf| {
                    called = true;
                    leaf
                })
                .unwrap_err();
            assert_eq!(err.reason(), reason, "{raw}");
            assert_eq!(err.as_access().unwrap().phase(), Phase::Unfold);
            assert!(!called);
        }
        assert_eq!(root, before);
    }

    #[test]
    fn type_mismatch_on_member_write() {
        let mut root = inventory();
        let before = root.clone();
        let err = path("count").assign(&Plain, &mut root, Node::Text("two")).unwrap_err();
        assert_eq!(err.reason(), FailureReason::TypeMismatch);
        assert_eq!(err.as_access().unwrap().phase(), Phase::Fold);
        assert_eq!(root, before);
    }

    #[test]
    fn type_mismatch_on_rebuild() {
        let mut root = inventory();
        let before = root.clone();
        // The rebuilt tuple would hold an `int` next to an `Item`.
        let err = path("items.Array.data[0]")
            .assign(&Plain, &mut root, Node::Int(0))
            .unwrap_err();
        assert_eq!(err.reason(), FailureReason::TypeMismatch);
        assert_eq!(err.as_access().unwrap().depth(), 1);
        assert_eq!(root, before);
    }

    #[test]
    fn index_on_root_returns_rebuilt_container() {
        let mut root = Node::tuple([Node::Int(1), Node::Int(2), Node::Int(3)]);
        let before = root.clone();

        let edited = path("Array.data[1]").assign(&Plain, &mut root, Node::Int(20)).unwrap();
        assert_eq!(root, before);
        assert_eq!(
            edited.rebuilt(),
            Some(&Node::Tuple(vec![Node::Int(1), Node::Int(20), Node::Int(3)]))
        );

        edited.store(&mut root);
        assert_eq!(path("Array.data[1]").resolve(&Plain, &root), Ok(Node::Int(20)));
    }

    #[test]
    fn nested_containers_are_rebuilt_bottom_up() {
        let mut root = Node::record(
            "Grid",
            [(
                "rows",
                Node::tuple([
                    Node::tuple([Node::Int(0), Node::Int(1)]),
                    Node::tuple([Node::Int(2), Node::Int(3)]),
                ]),
            )],
        );
        let cell = path("rows.Array.data[1].Array.data[0]");
        assert!(cell.assign(&Plain, &mut root, Node::Int(42)).unwrap().is_in_place());
        assert_eq!(cell.resolve(&Plain, &root), Ok(Node::Int(42)));
        assert_eq!(
            path("rows.Array.data[0].Array.data[1]").resolve(&Plain, &root),
            Ok(Node::Int(1))
        );
    }

    #[test]
    fn fold_failure_names_the_rejecting_ancestor() {
        let mut root = Node::record(
            "Frozen",
            [("inner", Node::record("Inner", [("value", Node::Int(1))]))],
        );
        let before = root.clone();
        let err = path("inner.value").assign(&Plain, &mut root, Node::Int(2)).unwrap_err();

        let access = err.as_access().unwrap();
        assert_eq!(access.phase(), Phase::Fold);
        assert_eq!(access.depth(), 0);
        assert_eq!(access.reason(), FailureReason::TypeMismatch);
        // The write into `inner` happened on a copy the root never received.
        assert_eq!(root, before);
    }

    #[test]
    fn callback_error_aborts_before_fold() {
        let mut root = inventory();
        let before = root.clone();
        let err = path("items.Array.data[0].label")
            .try_edit(&Plain, &mut root, |_| Err::<Node, _>("rejected"))
            .unwrap_err();
        assert!(matches!(err, TryEditError::Callback("rejected")));
        assert_eq!(root, before);
    }
}
