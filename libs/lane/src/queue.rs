use crate::{Container, Deque};

/// FIFO queue over a [`Deque`]: values leave in the order they were enqueued.
#[derive(Debug)]
pub struct Queue<T> {
    deque: Deque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub const fn new() -> Self {
        Self {
            deque: Deque::new(),
        }
    }

    pub fn enqueue(&self, value: T) {
        self.deque.append(value);
    }

    pub fn dequeue(&self) -> Option<T> {
        self.deque.shift()
    }

    pub fn size(&self) -> usize {
        self.deque.size()
    }

    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}

impl<T: Clone> Queue<T> {
    /// Returns a copy of the value the next [`dequeue`](Self::dequeue) would return.
    pub fn head(&self) -> Option<T> {
        self.deque.first()
    }
}

impl<T: Send + 'static> Container for Queue<T> {
    type Elem = T;

    fn put(&self, elem: T) {
        self.enqueue(elem);
    }

    fn take(&self) -> Option<T> {
        self.dequeue()
    }

    fn size(&self) -> usize {
        Queue::size(self)
    }
}
