//! An AVL tree set of distinct, totally ordered values.
//!
//! Each [`Node`] caches the height and balance factor of the subtree rooted at
//! it, which keeps [`AvlTree::height()`] O(1) and drives two augmented
//! queries that only visit the nodes they report:
//!
//! * [`AvlTree::deepest_branches()`]: every value on a maximum-depth branch,
//!   in preorder.
//! * [`AvlTree::sorted_in_between()`]: the values strictly inside an open
//!   interval, in ascending order.
//!
//! ```
//! use avlset::AvlTree;
//!
//! let t = [10, 5, 15, 2, 7, 13, 20, 1, 4, 6, 8, 14, 17, 25, 0, 9, 30]
//!     .into_iter()
//!     .collect::<AvlTree<_>>();
//!
//! assert_eq!(t.height(), 4);
//! assert_eq!(
//!     t.deepest_branches(),
//!     [&10, &5, &2, &1, &0, &7, &8, &9, &15, &20, &25, &30]
//! );
//! assert_eq!(t.sorted_in_between(&7, &14).unwrap(), [&8, &9, &10, &13]);
//! ```

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    clippy::todo,
    clippy::dbg_macro,
    unused_crate_dependencies
)]

// Silence unused dev-dependency warnings for the ones only used by benches.
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use paste as _;

mod error;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::{AvlError, Result};
pub use iter::{DeepestBranches, IntoIter, Iter};
pub use node::Node;
pub use tree::AvlTree;
