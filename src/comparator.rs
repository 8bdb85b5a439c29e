use core::cmp::Ordering;

/// A total order over keys, fixed when the map is constructed.
///
/// Every operation of [`RBTreeMap`](crate::RBTreeMap) consults the map's comparator, so
/// it must be consistent: reflexive, antisymmetric and transitive for every key
/// that is ever stored. Violating that is a logic error; the map will not exhibit
/// undefined behavior, but lookups and [`validate`](crate::RBTreeMap::validate) may
/// give unexpected answers.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use rbtree_map::RBTreeMap;
///
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "a").unwrap();
/// map.insert(2, "b").unwrap();
/// assert_eq!(map.keys(), [&2, &1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`] implementation. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<K: ?Sized + Ord> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
///
/// ```
/// use rbtree_map::{Natural, RBTreeMap, Reversed};
///
/// let map = RBTreeMap::from_iter_with_comparator([(1, ()), (3, ()), (2, ())], Reversed(Natural));
/// assert_eq!(map.keys(), [&3, &2, &1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_uses_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn reversed_flips_the_order() {
        assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reversed(Reversed(Natural)).compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn closures_compare() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc", &"z"), Ordering::Greater);
        assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
    }
}
