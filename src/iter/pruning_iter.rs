use crate::node::Node;

pub(crate) trait PruningOracle<T> {
    /// Returns true when the left child and subtree of `subtree_root` should be
    /// descended into and evaluated.
    fn visit_left(&self, subtree_root: &Node<T>) -> bool;

    /// Returns true when the right child and subtree of `subtree_root` should
    /// be descended into and evaluated.
    fn visit_right(&self, subtree_root: &Node<T>) -> bool;

    /// Returns true if `n` satisfies the pruning logic and should be yielded to
    /// the caller.
    fn filter_yield(&self, n: &Node<T>) -> bool;
}

/// An [`Iterator`] that performs a depth-first, in-order walk of a subtree and
/// yields the values of [`Node`] instances that match a pruning predicate.
#[derive(Debug)]
pub(crate) struct PruningIter<'a, T, P> {
    stack: Vec<&'a Node<T>>,
    pruner: P,
}

impl<'a, T, P> PruningIter<'a, T, P>
where
    P: PruningOracle<T>,
{
    pub(crate) fn new(root: Option<&'a Node<T>>, pruner: P) -> Self {
        let mut this = Self {
            stack: vec![],
            pruner,
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached, or the
        // remaining left edge is pruned.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<T>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);

            if !self.pruner.visit_left(v) {
                break;
            }
            ptr = v.left();
        }
    }
}

impl<'a, T, P> Iterator for PruningIter<'a, T, P>
where
    P: PruningOracle<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            // Push the right subtree to be visited next, unless pruned.
            if self.pruner.visit_right(v) {
                if let Some(right) = v.right() {
                    self.push_subtree(right);
                }
            }

            // Yield this node if it satisfies the pruning predicate.
            if self.pruner.filter_yield(v) {
                return Some(v.data());
            }
        }
    }
}
