//! Arena navigation helpers.
//!
//! Everything here works on plain links and is shared by the insertion and
//! deletion paths. Key-based lookups take a `key_of` accessor and a
//! comparator so they run over any arena node layout.

pub mod relocate;
pub mod swap;

use std::cmp::Ordering;

use crate::types::{Color, Colored, Node};

pub use relocate::relocate;
pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Absent children are black.
#[inline]
pub(crate) fn is_red<N: Colored>(arena: &[N], idx: Option<u32>) -> bool {
    idx.is_some_and(|i| arena[i as usize].is_red())
}

#[inline]
pub(crate) fn is_black<N: Colored>(arena: &[N], idx: Option<u32>) -> bool {
    !is_red(arena, idx)
}

#[inline]
pub(crate) fn color_of<N: Colored>(arena: &[N], idx: u32) -> Color {
    arena[idx as usize].color()
}

#[inline]
pub(crate) fn set_color<N: Colored>(arena: &mut [N], idx: u32, color: Color) {
    arena[idx as usize].set_color(color);
}

/// Points `parent`'s slot that held `old` at `new`. A `None` parent means
/// `old` was the root and there is no slot to rewrite.
#[inline]
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    if let Some(p) = parent {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, new);
        } else {
            set_r(arena, p, new);
        }
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Walks parent links up to the top of the tree containing `idx`.
pub fn root_of<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(p) = get_p(arena, idx) {
        idx = p;
    }
    idx
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r)))
    })
}

/// Finds a node by key.
///
/// With duplicates, returns whichever equal node the descent meets first.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    K: ?Sized,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, key_of(&arena[i as usize])) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Finds node by key, or the smallest node greater than `key` when the exact
/// key does not exist (ceiling query).
pub fn find_or_next_higher<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    K: ?Sized,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        match comparator(key_of(&arena[i as usize]), key) {
            Ordering::Equal => return Some(i),
            Ordering::Less => curr = get_r(arena, i),
            Ordering::Greater => {
                result = Some(i);
                curr = get_l(arena, i);
            }
        }
    }
    result
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    K: ?Sized,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        match comparator(key_of(&arena[i as usize]), key) {
            Ordering::Equal => return Some(i),
            Ordering::Greater => curr = get_l(arena, i),
            Ordering::Less => {
                result = Some(i);
                curr = get_r(arena, i);
            }
        }
    }
    result
}
