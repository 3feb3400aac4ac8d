use std::borrow::Borrow;

use crate::node::Node;

use super::pruning_iter::PruningOracle;

/// Selects the values strictly within the open interval `(low, high)`.
#[derive(Debug)]
pub(crate) struct OpenRangePruner<'a, Q: ?Sized> {
    low: &'a Q,
    high: &'a Q,
}

impl<'a, Q: ?Sized> OpenRangePruner<'a, Q> {
    pub(crate) fn new(low: &'a Q, high: &'a Q) -> Self {
        Self { low, high }
    }
}

impl<T, Q> PruningOracle<T> for OpenRangePruner<'_, Q>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn visit_left(&self, subtree_root: &Node<T>) -> bool {
        // All values in the left subtree are strictly less than this node, so
        // none can exceed "low" unless this node does.
        let v: &Q = subtree_root.data().borrow();
        self.low < v
    }

    fn visit_right(&self, subtree_root: &Node<T>) -> bool {
        let v: &Q = subtree_root.data().borrow();
        v < self.high
    }

    fn filter_yield(&self, n: &Node<T>) -> bool {
        let v: &Q = n.data().borrow();
        self.low < v && v < self.high
    }
}
