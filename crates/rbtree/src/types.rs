//! Node trait definitions and the concrete red-black node.
//!
//! Each "pointer" is an `Option<u32>` index into a [`Vec`]-backed arena.
//! Tree-manipulation functions take the arena as `&mut [N]` and work with
//! indices, so the same algorithms run over any node layout implementing
//! [`RbNodeLike`].

/// Node color. Absent children count as [`Color::Black`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Structural links (`p`, `l`, `r`).
///
/// `p` is a back-reference only; the tree shape is defined by `l` / `r`.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Color bit. Rotations and fixups only need links plus this.
pub trait Colored: Node {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    fn is_black(&self) -> bool {
        self.color().is_black()
    }

    fn is_red(&self) -> bool {
        self.color().is_red()
    }
}

/// Keyed red-black node, needed wherever the tree is searched.
pub trait RbNodeLike<K>: Colored {
    fn key(&self) -> &K;
}

/// Arena node carrying a key.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub color: Color,
}

impl<K> RbNode<K> {
    /// Detached red node.
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            color: Color::Red,
        }
    }

    pub fn into_key(self) -> K {
        self.k
    }
}

impl<K> Node for RbNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> Colored for RbNode<K> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl<K> RbNodeLike<K> for RbNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
}
