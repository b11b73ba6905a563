mod container;
mod deque;
mod pqueue;
mod queue;
mod stack;

// region:    --- Exports
pub use container::Container;
pub use deque::Deque;
pub use pqueue::{Item, PQType, PQueue, Priority};
pub use queue::Queue;
pub use stack::Stack;
// endregion: --- Exports
