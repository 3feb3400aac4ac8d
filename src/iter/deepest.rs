use crate::node::Node;

/// A preorder iterator over the values lying on at least one maximum-depth
/// branch of an [`AvlTree`](crate::AvlTree).
///
/// When both children of a node lead to a maximum-depth leaf, the left branch
/// is yielded before the right. Each value is yielded once, and subtrees that
/// do not reach the maximum depth are never visited.
#[derive(Debug, Clone)]
pub struct DeepestBranches<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> DeepestBranches<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

/// Returns `child` if it lies on a path realising the height of `parent`.
fn on_deepest_path<'a, T>(parent: &Node<T>, child: Option<&'a Node<T>>) -> Option<&'a Node<T>> {
    child.filter(|v| v.height() as u16 + 1 == parent.height() as u16)
}

impl<'a, T> Iterator for DeepestBranches<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Push the right child first so the left branch is popped (and fully
        // explored) before it.
        self.stack.extend(on_deepest_path(v, v.right()));
        self.stack.extend(on_deepest_path(v, v.left()));

        Some(v.data())
    }
}
