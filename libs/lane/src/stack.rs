use crate::{Container, Deque};

/// LIFO stack over a [`Deque`]. Pushing, popping and peeking all happen at the deque's head.
#[derive(Debug)]
pub struct Stack<T> {
    deque: Deque<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub const fn new() -> Self {
        Self {
            deque: Deque::new(),
        }
    }

    pub fn push(&self, value: T) {
        self.deque.prepend(value);
    }

    pub fn pop(&self) -> Option<T> {
        self.deque.shift()
    }

    pub fn size(&self) -> usize {
        self.deque.size()
    }

    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}

impl<T: Clone> Stack<T> {
    /// Returns a copy of the most recently pushed value.
    pub fn head(&self) -> Option<T> {
        self.deque.first()
    }
}

impl<T: Send + 'static> Container for Stack<T> {
    type Elem = T;

    fn put(&self, elem: T) {
        self.push(elem);
    }

    fn take(&self) -> Option<T> {
        self.pop()
    }

    fn size(&self) -> usize {
        Stack::size(self)
    }
}
