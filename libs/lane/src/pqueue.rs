use std::{
    fmt,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::Container;

pub type Priority = i64;

/// Strict ordering predicate over priorities: `less(a, b)` is `true` when an item with priority
/// `a` has to come *after* an item with priority `b`.
type Comparator = fn(Priority, Priority) -> bool;

/// Ordering kind of a [`PQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PQType {
    /// Highest priority is popped first.
    Max,
    /// Lowest priority is popped first.
    Min,
}

impl PQType {
    fn comparator(self) -> Comparator {
        match self {
            PQType::Max => max,
            PQType::Min => min,
        }
    }
}

fn max(a: Priority, b: Priority) -> bool {
    a < b
}

fn min(a: Priority, b: Priority) -> bool {
    a > b
}

/// A value paired with the priority it was pushed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    value: T,
    priority: Priority,
}

impl<T> Item<T> {
    pub fn new(value: T, priority: Priority) -> Self {
        Self { value, priority }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Priority) {
        (self.value, self.priority)
    }
}

impl<T: fmt::Display> fmt::Display for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<item value:{} priority:{}>", self.value, self.priority)
    }
}

/// Binary heap addressed with 1-based slots: the parent of slot `k` is `k / 2`, its children
/// are `2k` and `2k + 1`. Slot `k` lives at `items[k - 1]`.
#[derive(Debug)]
struct Heap<T> {
    items: Vec<Item<T>>,
    less: Comparator,
}

impl<T> Heap<T> {
    fn new(less: Comparator) -> Self {
        Self {
            items: Vec::new(),
            less,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        (self.less)(self.items[i - 1].priority, self.items[j - 1].priority)
    }

    fn exch(&mut self, i: usize, j: usize) {
        self.items.swap(i - 1, j - 1);
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.less(k / 2, k) {
            self.exch(k / 2, k);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        let count = self.len();
        while 2 * k <= count {
            let mut j = 2 * k;
            if j < count && self.less(j, j + 1) {
                j += 1;
            }
            if !self.less(k, j) {
                break;
            }
            self.exch(k, j);
            k = j;
        }
    }

    fn push(&mut self, item: Item<T>) {
        self.items.push(item);
        self.swim(self.len());
    }

    fn pop(&mut self) -> Option<Item<T>> {
        if self.items.is_empty() {
            return None;
        }
        // `swap_remove` moves the last slot into the root.
        let root = self.items.swap_remove(0);
        self.sink(1);
        Some(root)
    }

    fn head(&self) -> Option<&Item<T>> {
        self.items.first()
    }

    fn is_ordered(&self) -> bool {
        (2..=self.len()).all(|k| !self.less(k / 2, k))
    }
}

/// Heap priority queue that is safe for concurrent use.
///
/// Structural changes ([`push`](Self::push), [`pop`](Self::pop), [`drain`](Self::drain)) take the
/// write lock, while peeking and size checks share the read lock. Popping or peeking an empty
/// queue returns `None` right away instead of waiting for an item.
///
/// Items with equal priority leave the queue in no particular order.
#[derive(Debug)]
pub struct PQueue<T> {
    heap: RwLock<Heap<T>>,
    ordering: Option<PQType>,
}

impl<T> PQueue<T> {
    pub fn new(ordering: PQType) -> Self {
        Self {
            heap: RwLock::new(Heap::new(ordering.comparator())),
            ordering: Some(ordering),
        }
    }

    /// Creates a queue ordered by a custom predicate. `less(a, b)` must return `true` exactly
    /// when priority `a` should be popped after priority `b`, and has to be a strict ordering.
    pub fn with_comparator(less: fn(Priority, Priority) -> bool) -> Self {
        Self {
            heap: RwLock::new(Heap::new(less)),
            ordering: None,
        }
    }

    /// The ordering kind this queue was created with, `None` for a custom comparator.
    pub fn ordering(&self) -> Option<PQType> {
        self.ordering
    }

    pub fn push(&self, value: T, priority: Priority) {
        let item = Item::new(value, priority);
        self.write().push(item);
    }

    /// Removes and returns the highest (max queue) or lowest (min queue) priority item.
    pub fn pop(&self) -> Option<Item<T>> {
        self.write().pop()
    }

    /// Pops up to `n` items while holding the write lock once, extremal item first.
    pub fn drain(&self, n: usize) -> Vec<Item<T>> {
        let mut heap = self.write();

        let mut items = Vec::with_capacity(n.min(heap.len()));
        for _ in 0..n {
            let Some(item) = heap.pop() else {
                break;
            };
            items.push(item);
        }

        items
    }

    /// Runs `f` on the item that would be popped next, without removing it.
    pub fn peek_with<R>(&self, f: impl FnOnce(&Item<T>) -> R) -> Option<R> {
        self.read().head().map(f)
    }

    pub fn size(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Checks that no item compares as "should come before" its parent.
    pub fn is_heap_ordered(&self) -> bool {
        self.read().is_ordered()
    }

    // No code path can panic halfway through a heap mutation, so a poisoned lock still guards
    // a valid heap.
    fn read(&self) -> RwLockReadGuard<'_, Heap<T>> {
        self.heap.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Heap<T>> {
        self.heap.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> PQueue<T> {
    /// Returns a copy of the item that would be popped next.
    pub fn head(&self) -> Option<Item<T>> {
        self.peek_with(Item::clone)
    }
}

impl<T: Send + Sync + 'static> Container for PQueue<T> {
    type Elem = Item<T>;

    fn put(&self, elem: Item<T>) {
        self.write().push(elem);
    }

    fn take(&self) -> Option<Item<T>> {
        self.pop()
    }

    fn size(&self) -> usize {
        PQueue::size(self)
    }
}
