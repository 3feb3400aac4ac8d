use std::borrow::Borrow;

use tracing::debug;

use crate::{
    error::{AvlError, Result},
    iter::{DeepestBranches, IntoIter, Iter, OpenRangePruner, PruningIter},
    node::{remove_recurse, Node},
};

/// An ordered set of distinct values stored in an AVL tree.
///
/// Every node caches its subtree height and balance factor, giving O(1)
/// [`height()`](Self::height) queries and O(log n) insertion, removal and
/// lookup.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes all values from the tree.
    pub fn clear(&mut self) {
        debug!(n_values = self.len, "clearing tree");
        self.root = None;
        self.len = 0;
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single value.
    ///
    /// This reads the cached height of the root and does not traverse the
    /// tree.
    pub fn height(&self) -> i32 {
        self.root
            .as_deref()
            .map(|v| i32::from(v.height()))
            .unwrap_or(-1)
    }

    /// A read-only view of the root [`Node`], if any.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// An iterator visiting all values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// An iterator over the values on every maximum-depth branch of the tree,
    /// in preorder.
    ///
    /// See [`AvlTree::deepest_branches()`].
    pub fn iter_deepest_branches(&self) -> DeepestBranches<'_, T> {
        DeepestBranches::new(self.root.as_deref())
    }

    /// Returns the values lying on at least one maximum-depth branch of the
    /// tree, in preorder.
    ///
    /// When more than one branch reaches the maximum depth below a node, the
    /// remaining values of the left branch are listed before the right. No
    /// value is listed twice, and the values of a branch are listed from the
    /// root towards the leaf.
    ///
    /// The cached node heights identify the deep branches, so shallower
    /// branches are never visited.
    ///
    /// ```text
    ///                           10
    ///                       /        \
    ///                      5          15
    ///                    /   \      /    \
    ///                   2     7    13    20
    ///                  / \   / \     \  / \
    ///                 1   4 6   8   14 17  25
    ///                /           \          \
    ///               0             9         30
    /// ```
    ///
    /// For the tree above, this returns `[10, 5, 2, 1, 0, 7, 8, 9, 15, 20, 25,
    /// 30]`.
    pub fn deepest_branches(&self) -> Vec<&T> {
        self.iter_deepest_branches().collect()
    }

    /// Remove all values and return an iterator over them, leaving the tree
    /// empty.
    fn take(&mut self) -> IntoIter<T> {
        self.len = 0;
        IntoIter::new(self.root.take())
    }

    /// Consistency check of all the AVL tree invariants, panicking if any are
    /// violated.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self)
    where
        T: Ord,
    {
        /// Validate the subtree rooted at `n`, whose values must all fall
        /// strictly between `low` and `high`, returning its node count.
        fn validate<T: Ord>(n: &Node<T>, low: Option<&T>, high: Option<&T>) -> usize {
            // Invariant 1: the BST ordering, with no duplicates.
            assert!(low.map(|v| v < n.data()).unwrap_or(true), "bst order");
            assert!(high.map(|v| v > n.data()).unwrap_or(true), "bst order");

            let count_left = n
                .left()
                .map(|v| validate(v, low, Some(n.data())))
                .unwrap_or_default();
            let count_right = n
                .right()
                .map(|v| validate(v, Some(n.data()), high))
                .unwrap_or_default();

            // Invariant 2: the height of this node is always +1 of the
            // maximum child height, with an absent child at -1.
            let left_height = n.left().map(|v| i32::from(v.height())).unwrap_or(-1);
            let right_height = n.right().map(|v| i32::from(v.height())).unwrap_or(-1);
            assert_eq!(
                i32::from(n.height()),
                left_height.max(right_height) + 1,
                "stale height"
            );

            // Invariant 3: the cached balance factor matches the subtrees.
            assert_eq!(
                i32::from(n.balance_factor()),
                left_height - right_height,
                "stale balance factor"
            );

            // Invariant 4: the absolute height difference between the left
            // subtree and right subtree cannot exceed 1.
            assert!(
                n.balance_factor().abs() <= 1,
                "balance={}",
                n.balance_factor()
            );

            count_left + count_right + 1
        }

        let count = self
            .root()
            .map(|v| validate(v, None, None))
            .unwrap_or_default();

        // Invariant 5: the length matches the number of reachable nodes.
        assert_eq!(count, self.len, "length does not match node count");
    }
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Insert `data` into the tree, rebalancing as needed.
    ///
    /// Returns false and leaves the tree unchanged if an equal value is
    /// already present.
    pub fn insert(&mut self, data: T) -> bool {
        let inserted = match self.root {
            Some(ref mut v) => v.insert(data),
            None => {
                self.root = Some(Box::new(Node::new(data)));
                true
            }
        };

        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns the stored value equal to `data`.
    ///
    /// The stored value is returned rather than the query, which matters when
    /// the ordering of `T` does not consider all of its contents.
    pub fn get<Q>(&self, data: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root
            .as_ref()
            .and_then(|v| v.get(data))
            .ok_or(AvlError::NotFound)
    }

    /// Returns true if a value equal to `data` is stored in the tree.
    pub fn contains<Q>(&self, data: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(data).is_ok()
    }

    /// Remove the value equal to `data` from the tree, returning the stored
    /// value.
    ///
    /// A node with two children takes the value of its in-order successor,
    /// which is unlinked in its place.
    pub fn remove<Q>(&mut self, data: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let v = remove_recurse(&mut self.root, data).ok_or(AvlError::NotFound)?;
        self.len -= 1;
        Ok(v)
    }

    /// An iterator over the values strictly greater than `low` and strictly
    /// less than `high`, in ascending order.
    ///
    /// See [`AvlTree::sorted_in_between()`].
    ///
    /// The yielded values borrow from the tree only, and may outlive `low` and
    /// `high`.
    pub fn iter_between<'a, 'b, Q>(
        &'a self,
        low: &'b Q,
        high: &'b Q,
    ) -> Result<impl Iterator<Item = &'a T> + 'b>
    where
        'a: 'b,
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if low > high {
            return Err(AvlError::InvalidArgument(
                "low bound is greater than high bound",
            ));
        }

        // The open interval (x, x) is empty.
        let root = if low == high {
            None
        } else {
            self.root.as_deref()
        };

        Ok(PruningIter::new(root, OpenRangePruner::new(low, high)))
    }

    /// Returns the values strictly greater than `low` and strictly less than
    /// `high`, in ascending order.
    ///
    /// Subtrees entirely outside of the interval are never visited.
    ///
    /// For the tree shown in [`AvlTree::deepest_branches()`]:
    ///
    /// ```text
    /// sorted_in_between(7, 14) returns [8, 9, 10, 13]
    /// sorted_in_between(3, 8) returns [4, 5, 6, 7]
    /// sorted_in_between(8, 8) returns []
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::InvalidArgument`] if `low` is greater than `high`.
    pub fn sorted_in_between<Q>(&self, low: &Q, high: &Q) -> Result<Vec<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Ok(self.iter_between(low, high)?.collect())
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.take()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
