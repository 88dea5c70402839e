//! Key-addressed tree with per-node values.
//!
//! Backs the dominator tree (value = dominator set) and the loop tree
//! (value = loop info). Vertices are created detached and wired up with
//! [`KeyedTree::link`]; insertion order is preserved so iteration and DOT
//! dumps are deterministic.

use std::hash::Hash;

use indexmap::IndexMap;

use super::DirectedGraph;

struct Vertex<K, V> {
    value: V,
    parent: Option<K>,
    children: Vec<K>,
}

pub struct KeyedTree<K, V> {
    vertices: IndexMap<K, Vertex<K, V>>,
    root: Option<K>,
}

impl<K, V> KeyedTree<K, V>
where
    K: Copy + Eq + Hash,
    V: Default,
{
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
            root: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains(&self, key: K) -> bool {
        self.vertices.contains_key(&key)
    }

    /// Inserts a detached vertex with a default value. Re-inserting an
    /// existing key is a no-op.
    pub fn insert(&mut self, key: K) {
        self.vertices.entry(key).or_insert_with(|| Vertex {
            value: V::default(),
            parent: None,
            children: Vec::new(),
        });
    }

    pub fn get(&self, key: K) -> &V {
        &self.vertex(key).value
    }

    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.vertex_mut(key).value
    }

    /// Makes `child` a child of `parent`, detaching it from any previous
    /// parent. If the old root is linked under another vertex, the root is
    /// re-derived by walking up from the new parent.
    pub fn link(&mut self, parent: K, child: K) {
        assert!(parent != child, "cannot link a vertex to itself");
        assert!(self.contains(parent), "unknown parent key");
        assert!(self.contains(child), "unknown child key");

        if self.vertex(child).parent.is_some() {
            self.unlink_parent(child);
        }

        self.vertex_mut(parent).children.push(child);
        self.vertex_mut(child).parent = Some(parent);

        if self.root == Some(child) {
            let mut new_root = parent;
            while let Some(p) = self.vertex(new_root).parent {
                new_root = p;
            }
            self.root = Some(new_root);
        }
    }

    pub fn unlink_parent(&mut self, child: K) {
        let Some(parent) = self.vertex(child).parent else {
            return;
        };
        self.vertex_mut(parent).children.retain(|&c| c != child);
        self.vertex_mut(child).parent = None;
    }

    /// Marks an existing parentless vertex as the root.
    pub fn set_root(&mut self, key: K) -> bool {
        if !self.contains(key) || self.vertex(key).parent.is_some() {
            return false;
        }
        self.root = Some(key);
        true
    }

    pub fn root(&self) -> Option<K> {
        self.root
    }

    pub fn parent(&self, key: K) -> Option<K> {
        self.vertex(key).parent
    }

    pub fn has_parent(&self, key: K) -> bool {
        self.parent(key).is_some()
    }

    pub fn children(&self, key: K) -> &[K] {
        &self.vertex(key).children
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.vertices.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.vertices.iter().map(|(k, v)| (*k, &v.value))
    }

    fn vertex(&self, key: K) -> &Vertex<K, V> {
        self.vertices.get(&key).expect("key not in tree")
    }

    fn vertex_mut(&mut self, key: K) -> &mut Vertex<K, V> {
        self.vertices.get_mut(&key).expect("key not in tree")
    }
}

impl<K, V> Default for KeyedTree<K, V>
where
    K: Copy + Eq + Hash,
    V: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> DirectedGraph for KeyedTree<K, V>
where
    K: Copy + Eq + Hash,
    V: Default,
{
    type Node = K;

    fn successors(&self, node: K) -> Vec<K> {
        self.children(node).to_vec()
    }

    fn predecessors(&self, node: K) -> Vec<K> {
        self.parent(node).into_iter().collect()
    }
}

#[cfg(test)]
#[path = "../tests/graph/t_tree.rs"]
mod tests;
