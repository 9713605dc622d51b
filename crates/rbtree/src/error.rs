use thiserror::Error;

/// A broken red-black or ordering invariant, found by
/// [`assert_red_black_tree`](crate::validate::assert_red_black_tree).
///
/// Node fields are arena indices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root {node} has a parent")]
    RootHasParent { node: u32 },
    #[error("root {node} is red")]
    RedRoot { node: u32 },
    #[error("red node {parent} has red child {child}")]
    RedRedEdge { parent: u32, child: u32 },
    #[error("black height mismatch under node {node}: left {left}, right {right}")]
    BlackHeightMismatch { node: u32, left: usize, right: usize },
    #[error("child {child} does not point back at parent {node}")]
    BrokenParentLink { node: u32, child: u32 },
    #[error("node {node} sorts before its in-order predecessor {prev}")]
    OrderViolated { prev: u32, node: u32 },
}
