//! Arena-backed red-black tree.
//!
//! Nodes live in a caller-owned (or [`RbTree`]-owned) `Vec<N>` arena and
//! every link is an `Option<u32>` index into it. Parent links are plain
//! back-references: they never own anything and always mirror the
//! `l`/`r` links at rest.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Color`], [`Node`] / [`Colored`] / [`RbNodeLike`] traits, [`RbNode`] |
//! [`util`] | `first`, `next`, `find`, `swap`, `relocate` … over any [`Node`] arena |
//! [`rotate`] | `rotate_left` / `rotate_right` |
//! [`insert`] | BST descent + insertion fixup |
//! [`remove`] | predecessor swap + deletion fixup |
//! [`validate`] | invariant checker and [`InvariantViolation`] |
//! [`print`] | debug dump of structure and colors |
//! [`tree`] | [`RbTree`], the owning ordered container |
//!
//! Equal keys are accepted and placed to the right of existing ones, so an
//! in-order walk yields them in insertion order.

pub mod error;
pub mod insert;
pub mod print;
pub mod remove;
pub mod rotate;
pub mod tree;
pub mod types;
pub mod util;
pub mod validate;

pub use error::InvariantViolation;
pub use insert::{insert, insert_left, insert_right};
pub use remove::remove;
pub use rotate::{rotate_left, rotate_right};
pub use tree::{Iter, NodeId, RbTree};
pub use types::{Color, Colored, Node, RbNode, RbNodeLike};
pub use validate::assert_red_black_tree;
