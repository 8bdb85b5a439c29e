use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::comparator::Comparator;
use crate::error::{self, TreeError, Violation};

/// Explicit traversal stack. A red-black tree of `n` nodes is at most
/// `2 * log2(n + 1)` deep, so this only spills for enormous trees.
type Stack = SmallVec<[Handle; 64]>;

/// Visiting order for a full-tree walk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Order {
    In,
    Pre,
    Post,
}

/// The red-black tree engine backing `RBTreeMap`.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, V, C> {
    /// Arena storing one node per key.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, `None` (NIL) when empty.
    root: Option<Handle>,
    /// Number of real nodes in the tree.
    len: usize,
    comparator: C,
}

impl<K, V, C> RawRBTree<K, V, C> {
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            comparator,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Drops every node, and with it every stored value, exactly once.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.node_mut(handle).value
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent
    }

    /// NIL is black.
    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|h| self.node(h).is_red())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).color = color;
    }

    /// Which side of `parent` the real node `child` hangs from.
    #[inline]
    fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` from above (its parent, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(old, p);
                self.node_mut(p).set_child(side, new);
            }
        }
    }

    /// Rotates `top` down towards `dir`; its child on the opposite side takes its place.
    ///
    /// ```text
    ///     top              up            (dir = Left)
    ///    /   \            /  \
    ///   a     up   =>   top   c
    ///        /  \      /   \
    ///       b    c    a     b
    /// ```
    fn rotate(&mut self, top: Handle, dir: Side) {
        let Some(up) = self.node(top).child(dir.opposite()) else {
            unreachable!("`RawRBTree::rotate()` - no child to rotate up");
        };
        trace!("rotate {top:?} {dir:?} (raising {up:?})");

        let inner = self.node(up).child(dir);
        self.node_mut(top).set_child(dir.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(top);
        }

        let grandparent = self.parent(top);
        self.node_mut(up).parent = grandparent;
        self.replace_child(grandparent, top, Some(up));

        self.node_mut(up).set_child(dir, Some(top));
        self.node_mut(top).parent = Some(up);
    }

    fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left {
            handle = left;
        }
        handle
    }

    fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.maximum(root))
    }

    /// Restores invariants after linking the red node `node` into the tree.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.parent(node).filter(|&p| self.node(p).is_red()) {
            // A red parent is never the root.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.node(grandparent).child(parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.node(u).is_red()) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Zig-zag: turn the inner grandchild into an outer one first.
            let top = if self.side_of(node, parent) == parent_side {
                parent
            } else {
                self.rotate(parent, parent_side);
                node
            };
            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            trace!("insert fixup settled at {top:?}");
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks `target` and returns its entry. If `target` has two children,
    /// its in-order successor's entry is moved into it and the successor's
    /// slot is the one released.
    fn remove_node(&mut self, target: Handle) -> (K, V) {
        let spliced = match (self.node(target).left, self.node(target).right) {
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                let (t, s) = self.nodes.get2_mut(target, successor);
                mem::swap(&mut t.key, &mut s.key);
                mem::swap(&mut t.value, &mut s.value);
                successor
            }
            _ => target,
        };

        let node = self.node(spliced);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, spliced, child);

        let removed = self.nodes.take(spliced);
        self.len -= 1;

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        removed.into_entry()
    }

    /// Repairs the black-height deficiency on the path through `node`, whose
    /// parent is passed separately because `node` may be NIL.
    fn remove_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            let side = if self.node(p).left == node { Side::Left } else { Side::Right };
            let Some(mut sibling) = self.node(p).child(side.opposite()) else {
                break;
            };

            if self.node(sibling).is_red() {
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                let Some(next) = self.node(p).child(side.opposite()) else {
                    break;
                };
                sibling = next;
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !self.is_red(far) {
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                let Some(next) = self.node(p).child(side.opposite()) else {
                    break;
                };
                sibling = next;
            }

            let parent_color = self.node(p).color;
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.node(sibling).child(side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            trace!("remove fixup settled at {sibling:?}");
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_node(first))
    }

    /// Removes and returns the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_node(last))
    }

    /// Collects every node handle in the requested order.
    pub(crate) fn walk(&self, order: Order) -> Vec<Handle> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Stack = SmallVec::new();

        match order {
            Order::In => {
                let mut cursor = self.root;
                loop {
                    while let Some(h) = cursor {
                        stack.push(h);
                        cursor = self.node(h).left;
                    }
                    let Some(h) = stack.pop() else {
                        break;
                    };
                    out.push(h);
                    cursor = self.node(h).right;
                }
            }
            Order::Pre | Order::Post => {
                // Post-order is the reverse of a root-right-left pre-order.
                let (first, second) = if order == Order::Pre {
                    (Side::Right, Side::Left)
                } else {
                    (Side::Left, Side::Right)
                };
                stack.extend(self.root);
                while let Some(h) = stack.pop() {
                    out.push(h);
                    let node = self.node(h);
                    stack.extend(node.child(first));
                    stack.extend(node.child(second));
                }
                if order == Order::Post {
                    out.reverse();
                }
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        fn depth<K, V, C>(tree: &RawRBTree<K, V, C>, link: Option<Handle>) -> usize {
            link.map_or(0, |h| {
                let node = tree.node(h);
                1 + depth(tree, node.left).max(depth(tree, node.right))
            })
        }
        depth(self, self.root)
    }

    /// Number of black nodes from the root down to any NIL, not counting NIL.
    pub(crate) fn black_height(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            if !node.is_red() {
                count += 1;
            }
            cursor = node.left;
        }
        count
    }
}

impl<K, V, C: Comparator<K>> RawRBTree<K, V, C> {
    /// Returns the node holding `key`, if any.
    pub(crate) fn find(&self, key: &K) -> Option<Handle> {
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            cursor = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Inserts a new entry, failing without any change if `key` is present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> error::Result<Handle> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            side = match self.comparator.compare(&key, &node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(TreeError::DuplicateKey),
            };
            parent = Some(h);
            cursor = node.child(side);
        }

        let mut node = Node::new(key, value);
        node.parent = parent;
        let handle = self.nodes.alloc(node);
        match parent {
            None => self.root = Some(handle),
            Some(p) => self.node_mut(p).set_child(side, Some(handle)),
        }
        self.len += 1;

        self.insert_fixup(handle);
        Ok(handle)
    }

    /// Removes the entry for `key`, if present.
    pub(crate) fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let target = self.find(key)?;
        Some(self.remove_node(target))
    }

    /// Re-derives every structural invariant by walking the whole tree.
    pub(crate) fn check(&self) -> core::result::Result<(), Violation> {
        self.check_structure().inspect_err(|violation| debug!("red-black check failed: {violation}"))
    }

    fn check_structure(&self) -> core::result::Result<(), Violation> {
        if let Some(root) = self.root {
            if self.node(root).is_red() {
                return Err(Violation::RedRoot);
            }
            if self.parent(root).is_some() {
                return Err(Violation::BrokenParentLink);
            }
        }

        let mut count = 0;
        self.check_subtree(self.root, None, None, &mut count)?;
        if count != self.len || self.nodes.len() != self.len {
            return Err(Violation::SizeMismatch {
                recorded: self.len,
                actual: count,
            });
        }
        Ok(())
    }

    /// Checks the subtree under `link` against the open key interval
    /// `(lower, upper)` and returns its black height, counting NIL.
    fn check_subtree<'a>(
        &'a self,
        link: Option<Handle>,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        count: &mut usize,
    ) -> core::result::Result<usize, Violation> {
        let Some(h) = link else {
            return Ok(1);
        };
        *count += 1;
        let node = self.node(h);

        let above_lower = lower.is_none_or(|lo| self.comparator.compare(lo, &node.key) == Ordering::Less);
        let below_upper = upper.is_none_or(|hi| self.comparator.compare(&node.key, hi) == Ordering::Less);
        if !above_lower || !below_upper {
            return Err(Violation::OutOfOrder);
        }

        for child in [node.left, node.right].into_iter().flatten() {
            let child = self.node(child);
            if child.parent != Some(h) {
                return Err(Violation::BrokenParentLink);
            }
            if node.is_red() && child.is_red() {
                return Err(Violation::RedRedEdge);
            }
        }

        let left = self.check_subtree(node.left, lower, Some(&node.key), count)?;
        let right = self.check_subtree(node.right, Some(&node.key), upper, count)?;
        if left != right {
            return Err(Violation::BlackHeightMismatch { left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }
}
