use tokio::sync::watch;

use crate::stream::StateStream;

/// A value that notifies subscribers whenever it is replaced or modified.
///
/// Writes never block and never fail: a cell with no subscribers still
/// keeps its latest value.
#[derive(Debug)]
pub struct StateCell<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Replace the value only if it differs; returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn subscribe(&self) -> StateStream<T> {
        StateStream::new(self.sender.subscribe())
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
