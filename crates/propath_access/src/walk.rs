//! Provide the forward ("unfold") traversal shared by reads and edits.

use alloc::vec::Vec;

use crate::error::{AccessError, PathError, Phase};
use crate::path::{PropertyPath, Segment};
use crate::provider::MemberProvider;

// -----------------------------------------------------------------------------
// Resolution chain

/// The objects visited by one walk, one per segment boundary.
///
/// Element `k` is the object that was current before segment `k` was applied;
/// the last element is the leaf. The length is always `path.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionChain<V> {
    parents: Vec<V>,
    leaf: V,
}

impl<V> ResolutionChain<V> {
    /// Returns the number of snapshots, including the leaf.
    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len() + 1
    }

    /// Returns the snapshot taken before segment `depth`, or the leaf for
    /// `depth == path.len()`.
    pub fn get(&self, depth: usize) -> Option<&V> {
        match depth.cmp(&self.parents.len()) {
            core::cmp::Ordering::Less => self.parents.get(depth),
            core::cmp::Ordering::Equal => Some(&self.leaf),
            core::cmp::Ordering::Greater => None,
        }
    }

    #[inline]
    pub fn leaf(&self) -> &V {
        &self.leaf
    }

    /// Iterates from the root snapshot to the leaf.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.parents.iter().chain(core::iter::once(&self.leaf))
    }

    #[inline]
    pub fn into_leaf(self) -> V {
        self.leaf
    }

    /// Splits the chain into the parent snapshots and the leaf.
    #[inline]
    pub fn into_parts(self) -> (Vec<V>, V) {
        (self.parents, self.leaf)
    }
}

// -----------------------------------------------------------------------------
// Walker

/// Applies one segment to `current`.
pub(crate) fn step<P: MemberProvider + ?Sized>(
    provider: &P,
    current: &P::Value,
    segment: &Segment,
    depth: usize,
    phase: Phase,
) -> Result<P::Value, AccessError> {
    use crate::error::AccessErrorKind::*;

    let res = match segment {
        Segment::Field(name) => {
            if provider.has_field(current, name) {
                provider.get_field(current, name)
            } else {
                Err(NoSuchMember {
                    type_name: provider.type_name(current),
                })
            }
        }
        Segment::Index(index) => {
            if provider.is_indexable(current) {
                provider
                    .to_boxed_view(current)
                    .and_then(|view| view.get_at(*index).cloned())
            } else {
                Err(NotIndexable {
                    type_name: provider.type_name(current),
                })
            }
        }
    };

    log::trace!("{phase} `{segment}` at segment {depth}: ok = {}", res.is_ok());
    res.map_err(|kind| AccessError::new(kind, segment, depth, phase))
}

impl PropertyPath {
    /// Returns the value this path addresses inside `root`.
    ///
    /// Reads never modify `root` or anything reachable from it, so the same
    /// call can be repeated freely.
    pub fn resolve<P: MemberProvider + ?Sized>(
        &self,
        provider: &P,
        root: &P::Value,
    ) -> Result<P::Value, PathError> {
        let mut current = root.clone();
        for (depth, segment) in self.iter().enumerate() {
            current = step(provider, &current, segment, depth, Phase::Unfold).inspect_err(|err| {
                log::debug!("resolving `{self}` failed: {err}");
            })?;
        }
        Ok(current)
    }

    /// Walks from `root` to the leaf, recording every object on the way.
    ///
    /// Fails on the first segment that cannot be applied.
    pub fn unfold<P: MemberProvider + ?Sized>(
        &self,
        provider: &P,
        root: &P::Value,
    ) -> Result<ResolutionChain<P::Value>, PathError> {
        let mut parents = Vec::with_capacity(self.len());
        let mut current = root.clone();
        for (depth, segment) in self.iter().enumerate() {
            let next = step(provider, &current, segment, depth, Phase::Unfold).inspect_err(|err| {
                log::debug!("unfolding `{self}` failed: {err}");
            })?;
            parents.push(core::mem::replace(&mut current, next));
        }

        let chain = ResolutionChain {
            parents,
            leaf: current,
        };

        #[cfg(all(debug_assertions, feature = "debug"))]
        assert_eq!(chain.len(), self.len() + 1, "resolution chain of `{self}` is unbalanced");

        Ok(chain)
    }
}

// -----------------------------------------------------------------------------
// Tests
