use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// The container a chart surface lives in, and who watches its size.
#[derive(Debug, Default)]
pub struct Viewport {
    size: Size,
    observers: BTreeSet<ObserverId>,
    next_id: u64,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn observe(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id);
        id
    }

    /// Returns `false` if the observer was not connected.
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.remove(&observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Records the new size and returns the observers to notify. Nobody is
    /// notified when the size did not change.
    pub fn resize(&mut self, size: Size) -> Vec<ObserverId> {
        if size == self.size {
            return Vec::new();
        }
        self.size = size;
        self.observers.iter().copied().collect()
    }
}
