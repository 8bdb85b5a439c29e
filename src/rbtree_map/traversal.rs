use alloc::vec::Vec;

use super::RBTreeMap;
use crate::raw::Order;

// Snapshots borrow the map, so it cannot change while one is alive.
impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns every entry in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(map.inorder(), [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    #[must_use]
    pub fn inorder(&self) -> Vec<(&K, &V)> {
        self.snapshot(Order::In)
    }

    /// Returns every entry with each node before its left then right subtree.
    ///
    /// Useful for inspecting or reproducing the tree's shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, ()), (2, ()), (3, ())]);
    /// let keys: Vec<_> = map.preorder().into_iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    #[must_use]
    pub fn preorder(&self) -> Vec<(&K, &V)> {
        self.snapshot(Order::Pre)
    }

    /// Returns every entry with each node after its left then right subtree.
    #[must_use]
    pub fn postorder(&self) -> Vec<(&K, &V)> {
        self.snapshot(Order::Post)
    }

    /// Returns every key in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.inorder().into_iter().map(|(key, _)| key).collect()
    }

    /// Returns every value in ascending key order.
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.inorder().into_iter().map(|(_, value)| value).collect()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// assert_eq!(map.last_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.entry(h))
    }

    fn snapshot(&self, order: Order) -> Vec<(&K, &V)> {
        self.raw.walk(order).into_iter().map(|h| self.raw.entry(h)).collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_map_snapshots_are_empty() {
        let map: RBTreeMap<u8, u8> = RBTreeMap::new();
        assert!(map.inorder().is_empty());
        assert!(map.preorder().is_empty());
        assert!(map.postorder().is_empty());
        assert_eq!(map.first_key_value(), None);
        assert_eq!(map.last_key_value(), None);
    }

    #[test]
    fn keys_and_values_follow_key_order() {
        let map = RBTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        assert_eq!(map.keys(), vec![&1, &2, &3]);
        assert_eq!(map.values(), vec![&'a', &'b', &'c']);
    }

    #[test]
    fn postorder_ends_at_root() {
        let map = RBTreeMap::from([(10, ()), (5, ()), (15, ()), (3, ()), (7, ())]);
        let root = *map.preorder()[0].0;
        assert_eq!(*map.postorder().last().unwrap().0, root);
        assert_eq!(map.postorder().len(), 5);
    }
}
