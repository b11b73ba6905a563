/// Common surface of every container in this crate, so that the test suite and the stress
/// runner can drive any of them.
///
/// `put` and `take` map onto the container's own vocabulary (`push`/`pop` for the priority
/// queue, `enqueue`/`dequeue` for the queue, ...). `take` never waits: an empty container
/// answers with `None` immediately.
pub trait Container: Send + Sync + 'static {
    type Elem: Send + 'static;

    fn put(&self, elem: Self::Elem);
    fn take(&self) -> Option<Self::Elem>;
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
