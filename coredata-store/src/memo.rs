//! Identity-keyed memoization for derived selectors.
//!
//! A [`MemoSelector`] keeps one entry per argument set. Each entry tracks
//! the dependency `Arc`s its value was computed from through `Weak`
//! handles; a lookup whose dependencies are the same allocations returns
//! the cached `Arc` without recomputing. A `Weak` keeps the allocation
//! (not its contents) reserved, so a freed-and-reused pointer can never
//! produce a false hit, and dropped state trees are not kept alive by the
//! cache. Entries whose dependencies have all been dropped are pruned on
//! every recompute.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::trace;

/// Inputs a memoized value depends on, compared by identity.
pub trait Dependants {
    /// Non-owning handle the cache stores in place of the inputs.
    type Tracked;

    fn track(&self) -> Self::Tracked;

    /// True if `self` is the very same inputs `tracked` was taken from.
    fn is_tracked_by(&self, tracked: &Self::Tracked) -> bool;

    /// False once any tracked input has been dropped; such an entry can
    /// never be hit again.
    fn is_live(tracked: &Self::Tracked) -> bool;
}

impl<T: ?Sized> Dependants for Arc<T> {
    type Tracked = Weak<T>;

    fn track(&self) -> Weak<T> {
        Arc::downgrade(self)
    }

    fn is_tracked_by(&self, tracked: &Weak<T>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(self), tracked.as_ptr())
    }

    fn is_live(tracked: &Weak<T>) -> bool {
        tracked.strong_count() > 0
    }
}

impl<T: Dependants> Dependants for Option<T> {
    type Tracked = Option<T::Tracked>;

    fn track(&self) -> Self::Tracked {
        self.as_ref().map(T::track)
    }

    fn is_tracked_by(&self, tracked: &Self::Tracked) -> bool {
        match (self, tracked) {
            (Some(a), Some(b)) => a.is_tracked_by(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn is_live(tracked: &Self::Tracked) -> bool {
        tracked.as_ref().is_none_or(T::is_live)
    }
}

impl<A: Dependants, B: Dependants> Dependants for (A, B) {
    type Tracked = (A::Tracked, B::Tracked);

    fn track(&self) -> Self::Tracked {
        (self.0.track(), self.1.track())
    }

    fn is_tracked_by(&self, tracked: &Self::Tracked) -> bool {
        self.0.is_tracked_by(&tracked.0) && self.1.is_tracked_by(&tracked.1)
    }

    fn is_live(tracked: &Self::Tracked) -> bool {
        A::is_live(&tracked.0) && B::is_live(&tracked.1)
    }
}

struct MemoEntry<T, V> {
    dependants: T,
    value: Arc<V>,
}

/// Cache for one derived selector.
pub struct MemoSelector<K, D: Dependants, V> {
    name: &'static str,
    entries: Mutex<HashMap<K, MemoEntry<D::Tracked, V>>>,
}

impl<K, D, V> MemoSelector<K, D, V>
where
    K: Hash + Eq,
    D: Dependants,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the cached value for `key` if it was computed from
    /// `dependants`, otherwise runs `compute` and caches its result.
    pub fn get_or_compute(&self, key: K, dependants: D, compute: impl FnOnce() -> V) -> Arc<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(&key) {
            if dependants.is_tracked_by(&entry.dependants) {
                trace!(selector = self.name, "memo hit");
                return Arc::clone(&entry.value);
            }
        }

        entries.retain(|_, entry| D::is_live(&entry.dependants));
        trace!(selector = self.name, cached = entries.len(), "memo recompute");
        let value = Arc::new(compute());
        entries.insert(
            key,
            MemoEntry {
                dependants: dependants.track(),
                value: Arc::clone(&value),
            },
        );
        value
    }

    /// Number of argument sets currently cached.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached value.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<K, D, V> std::fmt::Debug for MemoSelector<K, D, V>
where
    K: Hash + Eq,
    D: Dependants,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoSelector")
            .field("name", &self.name)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn same_allocation_is_a_hit() {
        let memo: MemoSelector<&str, Arc<Vec<u32>>, usize> = MemoSelector::new("len");
        let input = Arc::new(vec![1, 2, 3]);
        let calls = Cell::new(0);

        let a = memo.get_or_compute("k", Arc::clone(&input), || {
            calls.set(calls.get() + 1);
            input.len()
        });
        let b = memo.get_or_compute("k", Arc::clone(&input), || {
            calls.set(calls.get() + 1);
            input.len()
        });

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn equal_but_distinct_allocation_recomputes() {
        let memo: MemoSelector<&str, Arc<Vec<u32>>, usize> = MemoSelector::new("len");
        let first = Arc::new(vec![1]);
        let second = Arc::new(vec![1]);
        let a = memo.get_or_compute("k", Arc::clone(&first), || 1);
        let b = memo.get_or_compute("k", Arc::clone(&second), || 1);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn keys_are_cached_independently() {
        let memo: MemoSelector<&str, Arc<()>, &str> = MemoSelector::new("id");
        let dep = Arc::new(());
        memo.get_or_compute("a", Arc::clone(&dep), || "a");
        memo.get_or_compute("b", Arc::clone(&dep), || "b");
        let again = memo.get_or_compute("a", Arc::clone(&dep), || "recomputed");
        assert_eq!(*again, "a");
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn cache_does_not_keep_inputs_alive() {
        let memo: MemoSelector<&str, Arc<Vec<u32>>, usize> = MemoSelector::new("len");
        let input = Arc::new(vec![1, 2]);
        memo.get_or_compute("k", Arc::clone(&input), || 2);
        assert_eq!(Arc::strong_count(&input), 1);
    }

    #[test]
    fn dropped_inputs_are_pruned_on_recompute() {
        let memo: MemoSelector<&str, Arc<Vec<u32>>, usize> = MemoSelector::new("len");
        let stale = Arc::new(vec![1]);
        let kept = Arc::new(vec![2]);
        memo.get_or_compute("stale", Arc::clone(&stale), || 1);
        memo.get_or_compute("kept", Arc::clone(&kept), || 1);
        drop(stale);

        memo.get_or_compute("new", Arc::new(vec![3]), || 1);
        // "new"'s input died with the call, but pruning runs before insert.
        assert_eq!(memo.len(), 2);
        let hit = memo.get_or_compute("kept", Arc::clone(&kept), || 99);
        assert_eq!(*hit, 1);
    }

    #[test]
    fn option_dependants_compare_presence_and_identity() {
        let x = Arc::new(1);
        let other = Arc::new(1);
        assert!(None::<Arc<i32>>.is_tracked_by(&None));
        assert!(Some(Arc::clone(&x)).is_tracked_by(&Some(x.track())));
        assert!(!Some(Arc::clone(&x)).is_tracked_by(&None));
        assert!(!Some(Arc::clone(&x)).is_tracked_by(&Some(other.track())));
        assert!(<Option<Arc<i32>>>::is_live(&None));
    }

    #[test]
    fn tuple_dependants_require_both_sides() {
        let a = Arc::new(1);
        let b = Arc::new(2);
        let c = Arc::new(2);
        let pair = (Arc::clone(&a), Arc::clone(&b));
        assert!(pair.is_tracked_by(&(a.track(), b.track())));
        assert!(!pair.is_tracked_by(&(a.track(), c.track())));

        let tracked = (a.track(), c.track());
        drop(c);
        assert!(!<(Arc<i32>, Arc<i32>)>::is_live(&tracked));
    }

    #[test]
    fn clear_empties_cache() {
        let memo: MemoSelector<u8, Arc<()>, ()> = MemoSelector::new("unit");
        let dep = Arc::new(());
        memo.get_or_compute(1, Arc::clone(&dep), || ());
        assert!(!memo.is_empty());
        memo.clear();
        assert!(memo.is_empty());
    }
}
