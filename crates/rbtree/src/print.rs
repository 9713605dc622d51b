use std::fmt::Debug;

use crate::types::RbNodeLike;

/// Debug printer for red-black trees.
///
/// One node per line: slot index, color and key, with `L=` / `R=` branches
/// indented under it and `∅` for absent children.
pub fn print<K, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    N: RbNodeLike<K>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let left = print::<K, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {:?}\n{tab}L={left}\n{tab}R={right}",
                n.key()
            )
        }
    }
}
