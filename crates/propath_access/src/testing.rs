//! An owned-value object model used by the walker tests.
//!
//! Unlike a handle-based model, writing into a copy of a `Node` does not
//! affect the original, so these tests only pass if every fold step hands its
//! updated parent further up the chain.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{AccessErrorKind, BoxedView, MemberProvider};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Int(i64),
    Text(&'static str),
    /// A named record type with ordered members. Records named `Frozen`
    /// can be read but reject every write.
    Record(&'static str, Vec<(&'static str, Node)>),
    /// A fixed-size container.
    Tuple(Vec<Node>),
    /// A growable container; never indexable.
    Bag(Vec<Node>),
}

impl Node {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Record(name, _) => *name,
            Self::Tuple(_) => "tuple",
            Self::Bag(_) => "bag",
        }
    }

    pub(crate) fn record(name: &'static str, fields: impl IntoIterator<Item = (&'static str, Node)>) -> Self {
        Self::Record(name, fields.into_iter().collect())
    }

    pub(crate) fn tuple(items: impl IntoIterator<Item = Node>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }
}

pub(crate) struct Plain;

impl MemberProvider for Plain {
    type Value = Node;

    fn type_name(&self, obj: &Node) -> String {
        obj.kind().to_string()
    }

    fn has_field(&self, obj: &Node, name: &str) -> bool {
        matches!(obj, Node::Record(_, fields) if fields.iter().any(|(n, _)| *n == name))
    }

    fn get_field(&self, obj: &Node, name: &str) -> Result<Node, AccessErrorKind> {
        if let Node::Record(_, fields) = obj
            && let Some((_, value)) = fields.iter().find(|(n, _)| *n == name)
        {
            return Ok(value.clone());
        }
        Err(AccessErrorKind::NoSuchMember {
            type_name: self.type_name(obj),
        })
    }

    fn set_field(&self, obj: &mut Node, name: &str, value: Node) -> Result<(), AccessErrorKind> {
        let type_name = self.type_name(obj);
        if type_name == "Frozen" {
            return Err(AccessErrorKind::TypeMismatch {
                expected: "a writable record".to_string(),
                found: type_name,
            });
        }
        let Node::Record(_, fields) = obj else {
            return Err(AccessErrorKind::NoSuchMember { type_name });
        };
        let Some((_, slot)) = fields.iter_mut().find(|(n, _)| *n == name) else {
            return Err(AccessErrorKind::NoSuchMember { type_name });
        };
        if slot.kind() != value.kind() {
            return Err(AccessErrorKind::TypeMismatch {
                expected: slot.kind().to_string(),
                found: value.kind().to_string(),
            });
        }
        *slot = value;
        Ok(())
    }

    fn is_indexable(&self, obj: &Node) -> bool {
        matches!(obj, Node::Tuple(_))
    }

    fn to_boxed_view(&self, obj: &Node) -> Result<BoxedView<Node>, AccessErrorKind> {
        match obj {
            Node::Tuple(items) => Ok(BoxedView::new(obj.clone(), items.clone())),
            _ => Err(AccessErrorKind::NotIndexable {
                type_name: self.type_name(obj),
            }),
        }
    }

    fn with_replaced_at(
        &self,
        view: &BoxedView<Node>,
        index: usize,
        value: Node,
    ) -> Result<Node, AccessErrorKind> {
        let kind = value.kind();
        let elements = view.replaced_at(index, value)?;
        if let Some(other) = elements.iter().find(|elem| elem.kind() != kind) {
            return Err(AccessErrorKind::TypeMismatch {
                expected: kind.to_string(),
                found: other.kind().to_string(),
            });
        }
        Ok(Node::Tuple(elements))
    }
}

/// `{ items: (Item { label: "a" }, Item { label: "b" }), count: 2 }`
pub(crate) fn inventory() -> Node {
    Node::record(
        "Inventory",
        [
            (
                "items",
                Node::tuple([
                    Node::record("Item", [("label", Node::Text("a"))]),
                    Node::record("Item", [("label", Node::Text("b"))]),
                ]),
            ),
            ("count", Node::Int(2)),
            ("tags", Node::Bag(Vec::new())),
        ],
    )
}
