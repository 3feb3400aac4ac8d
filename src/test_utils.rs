use std::fmt::{Display, Write};

use proptest::prelude::*;

use crate::node::Node;

const VALUE_MAX: u16 = 64;

/// Generate arbitrary values from [0..[`VALUE_MAX`]).
///
/// A small value domain encourages multiple operations to act on the same
/// value.
pub(crate) fn arbitrary_value() -> impl Strategy<Value = u16> {
    0..VALUE_MAX
}

/// A deterministic xorshift PRNG for long randomised operation sequences.
#[derive(Debug, Clone)]
pub(crate) struct XorShift(u64);

impl Default for XorShift {
    fn default() -> Self {
        Self(0x2545_F491_4F6C_DD1D)
    }
}

impl XorShift {
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    /// A value in `0..bound`.
    pub(crate) fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Compute the deepest branches of the subtree rooted at `root` by visiting
/// every node and measuring its depth, ignoring the cached heights.
pub(crate) fn naive_deepest_branches<T>(root: Option<&Node<T>>) -> Vec<&T> {
    fn max_depth<T>(n: Option<&Node<T>>) -> usize {
        n.map(|v| 1 + max_depth(v.left()).max(max_depth(v.right())))
            .unwrap_or_default()
    }

    // A node is on a deepest branch if its depth plus the length of the
    // longest path below it reaches the tree depth.
    fn walk<'a, T>(n: Option<&'a Node<T>>, depth: usize, want: usize, out: &mut Vec<&'a T>) {
        let Some(n) = n else {
            return;
        };
        if depth + max_depth(Some(n)) != want {
            return;
        }
        out.push(n.data());
        walk(n.left(), depth + 1, want, out);
        walk(n.right(), depth + 1, want, out);
    }

    let mut out = vec![];
    walk(root, 0, max_depth(root), &mut out);
    out
}

#[allow(unused)]
pub(crate) fn print_dot<T>(n: &Node<T>) -> String
where
    T: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

#[allow(unused)]
fn recurse<T, W>(n: &Node<T>, buf: &mut W)
where
    W: std::fmt::Write,
    T: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {{ h={} | b={} }}"];"#,
        n.data(),
        n.data(),
        n.height(),
        n.balance_factor(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.data(),
                    v.data()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.data()).unwrap();
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.data(),
                    n.data()
                )
                .unwrap();
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AvlTree;

    #[test]
    fn test_print_dot() {
        let t = [2, 1, 3].into_iter().collect::<AvlTree<_>>();
        let dot = print_dot(t.root().unwrap());

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains(r#""2" -> "1""#));
        assert!(dot.contains(r#""2" -> "3""#));
        assert!(dot.contains(r#""1" [label="1 | { h=0 | b=0 }"];"#));
    }

    #[test]
    fn test_naive_deepest_branches() {
        let t = [2, 1, 3, 4].into_iter().collect::<AvlTree<_>>();
        assert_eq!(naive_deepest_branches(t.root()), [&2, &3, &4]);
        assert!(naive_deepest_branches::<u8>(None).is_empty());
    }
}
