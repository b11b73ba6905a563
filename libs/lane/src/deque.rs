use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::Container;

/// Position of a node inside the [`Chain`] arena.
type Link = Option<usize>;

/// Arenas up to this size are never compacted.
const MIN_ARENA_SLOTS: usize = 16;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Link,
    next: Link,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Link },
}

/// Doubly linked list whose nodes live in an arena.
///
/// `prev`/`next` are plain arena positions and own nothing; the arena owns every node. Vacated
/// slots are chained into a free list and reused by the next insertion, and the arena is
/// compacted once it is mostly vacant.
#[derive(Debug)]
struct Chain<T> {
    slots: Vec<Slot<T>>,
    free: Link,
    head: Link,
    tail: Link,
    len: usize,
}

impl<T> Chain<T> {
    const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link {idx} points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link {idx} points at a vacant slot"),
        }
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(idx) => {
                if let Slot::Vacant { next_free } = self.slots[idx] {
                    self.free = next_free;
                }
                self.slots[idx] = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Node<T> {
        let slot = std::mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(idx);

        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("released slot {idx} twice"),
        }
    }

    fn push_back(&mut self, value: T) {
        let idx = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    fn push_front(&mut self, value: T) {
        let idx = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });

        match self.head {
            Some(head) => self.node_mut(head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    fn pop_back(&mut self) -> Option<T> {
        let idx = self.tail?;
        let node = self.release(idx);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = None,
            None => self.head = None,
        }
        self.tail = node.prev;
        self.shrink();

        Some(node.value)
    }

    fn pop_front(&mut self) -> Option<T> {
        let idx = self.head?;
        let node = self.release(idx);

        match node.next {
            Some(next) => self.node_mut(next).prev = None,
            None => self.tail = None,
        }
        self.head = node.next;
        self.shrink();

        Some(node.value)
    }

    /// Accounts for one removed node and compacts the arena once fewer than a quarter of its
    /// slots are occupied.
    fn shrink(&mut self) {
        self.len -= 1;
        if self.slots.len() > MIN_ARENA_SLOTS && self.len < self.slots.len() / 4 {
            self.compact();
        }
    }

    /// Moves the live nodes, in chain order, into a fresh arena sized to fit them.
    fn compact(&mut self) {
        let len = self.len;
        let mut slots = Vec::with_capacity(len);
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = match std::mem::replace(&mut self.slots[idx], Slot::Vacant { next_free: None })
            {
                Slot::Occupied(node) => node,
                Slot::Vacant { .. } => unreachable!("link {idx} points at a vacant slot"),
            };
            cursor = node.next;

            let pos = slots.len();
            slots.push(Slot::Occupied(Node {
                value: node.value,
                prev: pos.checked_sub(1),
                next: (pos + 1 < len).then_some(pos + 1),
            }));
        }

        self.head = (len > 0).then_some(0);
        self.tail = len.checked_sub(1);
        self.slots = slots;
        self.free = None;
    }

    fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let mut forward = vec![];
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            forward.push(idx);
            if forward.len() > self.len {
                return false;
            }
            cursor = self.node(idx).next;
        }

        let mut backward = vec![];
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            backward.push(idx);
            if backward.len() > self.len {
                return false;
            }
            cursor = self.node(idx).prev;
        }
        backward.reverse();

        forward.len() == self.len && forward == backward
    }
}

/// Double-ended queue backed by a doubly linked list, safe for concurrent use.
///
/// Every operation is amortized O(1) and takes the single internal mutex for its whole duration. Removing
/// or peeking at an empty deque returns `None` immediately.
#[derive(Debug)]
pub struct Deque<T> {
    chain: Mutex<Chain<T>>,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    pub const fn new() -> Self {
        Self {
            chain: Mutex::new(Chain::new()),
        }
    }

    /// Inserts `value` at the tail.
    pub fn append(&self, value: T) {
        self.lock().push_back(value);
    }

    /// Inserts `value` at the head.
    pub fn prepend(&self, value: T) {
        self.lock().push_front(value);
    }

    /// Removes and returns the tail value.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop_back()
    }

    /// Removes and returns the head value.
    pub fn shift(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn size(&self) -> usize {
        self.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    // The chain is relinked before any value is handed out, so a poisoned lock never guards a
    // half-linked chain.
    fn lock(&self) -> MutexGuard<'_, Chain<T>> {
        self.chain.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Deque<T> {
    /// Returns a copy of the head value.
    pub fn first(&self) -> Option<T> {
        self.lock().front().cloned()
    }

    /// Returns a copy of the tail value.
    pub fn last(&self) -> Option<T> {
        self.lock().back().cloned()
    }
}

/// The deque as a FIFO: `put` appends, `take` shifts.
impl<T: Send + 'static> Container for Deque<T> {
    type Elem = T;

    fn put(&self, elem: T) {
        self.append(elem);
    }

    fn take(&self) -> Option<T> {
        self.shift()
    }

    fn size(&self) -> usize {
        Deque::size(self)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::{Deque, MIN_ARENA_SLOTS};

    fn shift_all<T>(deque: &Deque<T>) -> Vec<T> {
        std::iter::from_fn(|| deque.shift()).collect()
    }

    fn assert_consistent<T>(deque: &Deque<T>) {
        assert!(deque.lock().is_consistent());
    }

    #[test]
    fn append_then_shift_keeps_order() {
        let deque = Deque::new();
        for i in 1..=5 {
            deque.append(i);
            assert_consistent(&deque);
        }

        assert_eq!(shift_all(&deque), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn prepend_then_shift_reverses_order() {
        let deque = Deque::new();
        for i in 1..=5 {
            deque.prepend(i);
            assert_consistent(&deque);
        }

        assert_eq!(shift_all(&deque), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn pop_takes_from_tail() {
        let deque = Deque::new();
        deque.append("b");
        deque.prepend("a");
        deque.append("c");

        assert_eq!(deque.pop(), Some("c"));
        assert_eq!(deque.pop(), Some("b"));
        assert_eq!(deque.pop(), Some("a"));
        assert_eq!(deque.pop(), None);
    }

    #[test]
    fn first_and_last_peek_both_ends() {
        let deque = Deque::new();
        assert_eq!(deque.first(), None);
        assert_eq!(deque.last(), None);

        deque.append(2);
        assert_eq!(deque.first(), Some(2));
        assert_eq!(deque.last(), Some(2));

        deque.prepend(1);
        deque.append(3);
        assert_eq!(deque.first(), Some(1));
        assert_eq!(deque.last(), Some(3));
        assert_eq!(deque.size(), 3);
    }

    #[test]
    fn removing_only_element_resets_both_ends() {
        let deque = Deque::new();

        deque.append('x');
        assert_eq!(deque.pop(), Some('x'));
        {
            let chain = deque.lock();
            assert_eq!((chain.head, chain.tail), (None, None));
            assert_eq!(chain.len, 0);
        }

        deque.prepend('y');
        assert_eq!(deque.shift(), Some('y'));
        {
            let chain = deque.lock();
            assert_eq!((chain.head, chain.tail), (None, None));
        }

        // Both ends still work after the reset.
        deque.append('z');
        deque.prepend('w');
        assert_eq!(deque.first(), Some('w'));
        assert_eq!(deque.last(), Some('z'));
        assert_consistent(&deque);
    }

    #[test]
    fn vacated_slots_are_reused() {
        let deque = Deque::new();
        deque.append(0);
        for i in 1..100 {
            deque.append(i);
            assert_eq!(deque.shift(), Some(i - 1));
        }

        assert_eq!(deque.size(), 1);
        assert!(deque.lock().slots.len() <= 2);
        assert_consistent(&deque);
    }

    #[test]
    fn arena_shrinks_after_large_drain() {
        let deque = Deque::new();
        for i in 0..100_000 {
            deque.append(i);
        }
        for i in 0..99_999 {
            assert_eq!(deque.shift(), Some(i));
        }

        {
            let chain = deque.lock();
            assert_eq!(chain.len, 1);
            assert!(chain.slots.len() <= MIN_ARENA_SLOTS);
        }
        assert_consistent(&deque);
        assert_eq!(deque.first(), Some(99_999));
        assert_eq!(deque.last(), Some(99_999));
    }

    #[test]
    fn arena_tracks_live_count_while_draining_both_ends() {
        let deque = Deque::new();
        for i in 0..10_000 {
            deque.append(i);
        }

        let mut expected: std::collections::VecDeque<i32> = (0..10_000).collect();
        while expected.len() > 100 {
            if expected.len() % 2 == 0 {
                assert_eq!(deque.pop(), expected.pop_back());
            } else {
                assert_eq!(deque.shift(), expected.pop_front());
            }

            let slots = deque.lock().slots.len();
            assert!(slots <= MIN_ARENA_SLOTS.max(4 * expected.len() + 3));
        }

        assert_consistent(&deque);
        assert_eq!(shift_all(&deque), Vec::from(expected));
    }

    #[test]
    fn mixed_operations_keep_links_consistent() {
        let deque = Deque::new();
        let mut model = std::collections::VecDeque::new();

        for i in 0..200 {
            match i % 7 {
                0 | 3 => {
                    deque.append(i);
                    model.push_back(i);
                }
                1 | 5 => {
                    deque.prepend(i);
                    model.push_front(i);
                }
                2 => assert_eq!(deque.pop(), model.pop_back()),
                _ => assert_eq!(deque.shift(), model.pop_front()),
            }
            assert_consistent(&deque);
            assert_eq!(deque.size(), model.len());
            assert_eq!(deque.first(), model.front().copied());
            assert_eq!(deque.last(), model.back().copied());
        }
    }

    #[test]
    fn empty_deque_answers_none() {
        let deque: Deque<u8> = Deque::default();

        assert_eq!(deque.pop(), None);
        assert_eq!(deque.shift(), None);
        assert_eq!(deque.first(), None);
        assert_eq!(deque.last(), None);
        assert!(deque.is_empty());
    }

    #[test]
    fn concurrent_both_ends() {
        let deque = Arc::new(Deque::new());
        let mut handles = vec![];

        for t in 0..8 {
            let deque = Arc::clone(&deque);
            handles.push(thread::spawn(move || {
                for i in 0..500 {
                    if t % 2 == 0 {
                        deque.append(i);
                        assert!(deque.pop().is_some());
                    } else {
                        deque.prepend(i);
                        assert!(deque.shift().is_some());
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(deque.is_empty());
        assert_consistent(&deque);
    }
}
