use std::{borrow::Borrow, cmp::Ordering};

use tracing::trace;

#[derive(Debug)]
pub(crate) enum RemoveResult<T> {
    /// The value was removed from the tree.
    Removed(T),

    /// The direct descendent node contains the value, but contains no children
    /// and must be unlinked by the parent.
    ParentUnlink,
}

/// A single node of an [`AvlTree`](crate::AvlTree), and the root of the
/// subtree below it.
///
/// Nodes are exposed read-only through [`AvlTree::root()`] so the cached AVL
/// metadata can be inspected.
///
/// [`AvlTree::root()`]: crate::AvlTree::root
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Child nodes pointers.
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The cached "balance factor" of this node: the height of the left
    /// subtree minus the height of the right subtree, where an absent subtree
    /// has a height of -1.
    balance: i8,

    data: T,
}

impl<T> Node<T> {
    /// A leaf node holding `data`.
    pub(crate) fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
            height: 0,
            balance: 0,
        }
    }

    /// Insert `data` into the subtree rooted at `self`, returning true if it
    /// was not already present.
    pub(crate) fn insert(self: &mut Box<Self>, data: T) -> bool
    where
        T: Ord,
    {
        let child = match data.cmp(&self.data) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => return false,
            Ordering::Greater => &mut self.right,
        };

        match child {
            Some(v) => {
                if !v.insert(data) {
                    // The tree structure has not been modified, so it does not
                    // require rebalancing.
                    return false;
                }
            }
            None => {
                *child = Some(Box::new(Self::new(data)));

                // Inserting this new child node cannot skew the tree in the
                // direction of the new addition such that it requires the tree
                // be rebalanced as, at most, it creates an absolute difference
                // of 1 in this direction (from balanced, or slightly skewed in
                // the opposite direction).
                //
                // Update this node and skip the rebalancing checks.
                update(self);
                return true;
            }
        }

        rebalance(self);
        true
    }

    pub(super) fn remove<Q>(self: &mut Box<Self>, data: &Q) -> Option<RemoveResult<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        // Recurse down the subtree rooted at `self`.
        //
        // If the value is not found, or successfully removed, the result is
        // returned. If the direct descendent node contains the value and no
        // children, it returns [`RemoveResult::ParentUnlink`] and the node is
        // unlinked here in the parent before returning the result to the
        // caller.
        match data.cmp(self.data.borrow()) {
            Ordering::Less => {
                return remove_recurse(&mut self.left, data).map(RemoveResult::Removed)
            }
            Ordering::Greater => {
                return remove_recurse(&mut self.right, data).map(RemoveResult::Removed)
            }
            Ordering::Equal => {}
        };

        // This node holds the value to be removed and may have 0, 1 or 2
        // child node(s):
        //
        //                          +----------+
        //                          |  parent  |
        //                          +----------+
        //                                |
        //                                v
        //                          +----------+
        //                     +----|   self   |----+
        //                     |    +----------+    |
        //                     |                    |
        //                     v                    v
        //               +-----------+       +------------+
        //               | self.left |       | self.right |
        //               +-----------+       +------------+
        //
        // With two children, the in-order successor (the left-most node of
        // "self.right") is unlinked from the right subtree and its data moves
        // into "self", leaving the shape above "self" untouched.
        //
        // With a single child, that child replaces "self".
        //
        // With no children, the parent unlinks "self".
        let old = match (self.left.is_some(), self.right.is_some()) {
            (true, true) => {
                let successor = take_min(&mut self.right)?;
                std::mem::replace(&mut self.data, successor)
            }
            (true, false) | (false, true) => {
                debug_assert_ne!(self.height, 0);

                let child = match self.left.take() {
                    Some(v) => v,
                    None => self.right.take()?,
                };

                let old = std::mem::replace(self, child);

                // Invariant: the node being unlinked contains no subtree.
                debug_assert!(old.left.is_none());
                debug_assert!(old.right.is_none());

                old.data
            }
            (false, false) => {
                debug_assert_eq!(self.height, 0);

                // Parent will unlink this "self" node.
                return Some(RemoveResult::ParentUnlink);
            }
        };

        Some(RemoveResult::Removed(old))
    }

    /// The stored value equal to `data` in the subtree rooted at `self`.
    pub(crate) fn get<Q>(&self, data: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = match data.cmp(self.data.borrow()) {
            Ordering::Less => self.left(),
            Ordering::Equal => return Some(&self.data),
            Ordering::Greater => self.right(),
        }?;

        node.get(data)
    }

    /// The value stored in this node.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The cached height of the subtree rooted at this node, where a leaf has
    /// a height of 0.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The cached balance factor of this node, always within `-1..=1`.
    ///
    /// Positive when the left subtree is taller, negative when the right
    /// subtree is taller.
    pub fn balance_factor(&self) -> i8 {
        self.balance
    }

    /// The left child of this node, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// A mutable handle to the left child, if any.
    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    /// The right child of this node, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// A mutable handle to the right child, if any.
    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Consume this node, returning the value it holds.
    pub(crate) fn into_data(self) -> T {
        self.data
    }
}

/// The height of `n`, or -1 for an empty subtree.
fn height<T>(n: Option<&Node<T>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

/// Recompute the cached height and balance factor of `n` from its children.
fn update<T>(n: &mut Node<T>) {
    let left = height(n.left());
    let right = height(n.right());

    // Correctness: both heights are derived from a u8 and the AVL invariant
    // bounds their difference to 2 before rebalancing, so neither cast
    // truncates.
    n.height = (left.max(right) + 1) as u8;
    n.balance = (left - right) as i8;
}

/// Recompute the metadata of `n` and restore the AVL invariant of the subtree
/// rooted at it.
///
/// The metadata of both children must be up to date.
fn rebalance<T>(n: &mut Box<Node<T>>) {
    update(n);

    match n.balance {
        // Left-heavy
        2.. => {
            if n.left().map(|v| v.balance < 0).unwrap_or_default() {
                // Left-right case.
                if let Some(left) = n.left_mut() {
                    rotate_left(left);
                }
            }
            rotate_right(n);
        }
        // Right-heavy
        ..=-2 => {
            if n.right().map(|v| v.balance > 0).unwrap_or_default() {
                // Right-left case.
                if let Some(right) = n.right_mut() {
                    rotate_right(right);
                }
            }
            rotate_left(n);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(n.balance.abs() <= 1, "balance={}", n.balance);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// A no-op if `x` has no right pointer (cannot be rotated).
fn rotate_left<T>(x: &mut Box<Node<T>>) {
    let Some(mut p) = x.right.take() else {
        return;
    };
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update(&mut p);

    x.left = Some(p);
    update(x);

    trace!(height = x.height, balance = x.balance, "rotated left");
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// A no-op if `y` has no left pointer (cannot be rotated).
fn rotate_right<T>(y: &mut Box<Node<T>>) {
    let Some(mut p) = y.left.take() else {
        return;
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update(&mut p);

    y.right = Some(p);
    update(y);

    trace!(height = y.height, balance = y.balance, "rotated right");
}

/// Unlinks the node holding the minimum value of the subtree in `slot`,
/// linking its right subtree (if any) in its place, and returns its data.
///
/// Every node on the left edge is rebalanced as the recursion unwinds.
fn take_min<T>(slot: &mut Option<Box<Node<T>>>) -> Option<T> {
    let node = slot.as_mut()?;

    if node.left.is_some() {
        // Descend left to the minimum.
        let v = take_min(&mut node.left);
        rebalance(node);
        return v;
    }

    // This is the end of the left edge.
    //
    // ```text
    //                 6
    //                / \
    //    here ->   <4>   7
    //                \
    //                 5
    // ```
    //
    // Unlink it, moving its right child (if any) up into its place.
    let mut min = slot.take()?;
    *slot = min.take_right();

    Some(min.into_data())
}

/// Recurse into `node`, calling [`Node::remove()`] to remove the provided
/// `data` from the subtree rooted at `node`, if it exists.
///
/// Returns [`None`] if the value is not found.
///
/// Clears the `node` pointer if the [`Node::remove()`] call returns
/// [`RemoveResult::ParentUnlink`], returning the extracted value.
pub(super) fn remove_recurse<T, Q>(node: &mut Option<Box<Node<T>>>, data: &Q) -> Option<T>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    // Remove the value (if any) and rebalance the tree.
    let remove_ret = node.as_mut().and_then(|v| {
        let ret = v.remove(data)?;
        rebalance(v);
        Some(ret)
    })?;

    match remove_ret {
        RemoveResult::Removed(v) => Some(v),
        RemoveResult::ParentUnlink => node.take().map(|v| v.into_data()),
    }
}
