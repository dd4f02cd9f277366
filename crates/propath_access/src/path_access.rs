//! Provide parse-per-call path access on every provider.

use crate::edit::Edited;
use crate::error::PathError;
use crate::path::PropertyPath;
use crate::provider::MemberProvider;

/// Single-call path access for any [`MemberProvider`].
///
/// Every method parses `path` with the default syntax on each call. If a path
/// is used more than once, parse it into a [`PropertyPath`] and reuse that.
pub trait PathAccess: MemberProvider {
    /// Returns the value `path` addresses inside `root`.
    ///
    /// See [`PropertyPath::resolve`].
    fn resolve_path(&self, root: &Self::Value, path: &str) -> Result<Self::Value, PathError>;

    /// Replaces the value `path` addresses inside `root` with `mutate(current)`.
    ///
    /// See [`PropertyPath::edit`].
    fn edit_path<F>(
        &self,
        root: &mut Self::Value,
        path: &str,
        mutate: F,
    ) -> Result<Edited<Self::Value>, PathError>
    where
        F: FnOnce(Self::Value) -> Self::Value;

    /// Replaces the value `path` addresses inside `root` with `value`.
    ///
    /// See [`PropertyPath::assign`].
    fn assign_path(
        &self,
        root: &mut Self::Value,
        path: &str,
        value: Self::Value,
    ) -> Result<Edited<Self::Value>, PathError>;
}

impl<P: MemberProvider + ?Sized> PathAccess for P {
    #[inline(never)]
    fn resolve_path(&self, root: &Self::Value, path: &str) -> Result<Self::Value, PathError> {
        PropertyPath::parse(path)?.resolve(self, root)
    }

    fn edit_path<F>(
        &self,
        root: &mut Self::Value,
        path: &str,
        mutate: F,
    ) -> Result<Edited<Self::Value>, PathError>
    where
        F: FnOnce(Self::Value) -> Self::Value,
    {
        PropertyPath::parse(path)?.edit(self, root, mutate)
    }

    #[inline]
    fn assign_path(
        &self,
        root: &mut Self::Value,
        path: &str,
        value: Self::Value,
    ) -> Result<Edited<Self::Value>, PathError> {
        self.edit_path(root, path, move |_| value)
    }
}

#[cfg(test)]
mod tests {
    use super::PathAccess;
    use crate::FailureReason;
    use crate::testing::{Node, Plain, inventory};

    #[test]
    fn parse_per_call() {
        let mut root = inventory();
        assert_eq!(Plain.resolve_path(&root, "items.Array.data[0].label"), Ok(Node::Text("a")));

        let edited = Plain.assign_path(&mut root, "items.Array.data[0].label", Node::Text("A"));
        assert!(edited.unwrap().is_in_place());
        assert_eq!(Plain.resolve_path(&root, "items.Array.data[0].label"), Ok(Node::Text("A")));

        let err = Plain.resolve_path(&root, "items.Array.data[one]").unwrap_err();
        assert_eq!(err.reason(), FailureReason::MalformedPath);
        let err = Plain.edit_path(&mut root, "", |leaf| leaf).unwrap_err();
        assert_eq!(err.reason(), FailureReason::MalformedPath);
    }
}
