//! # World Work Queue
//!
//! Deferred mesh work, spread across frames so that large visibility changes
//! (sector transitions, the initial world) never stall a single frame.
//!
//! The queue is plain FIFO. Entries are never coalesced or cancelled: showing
//! and then hiding a block before the first entry is drained leaves both
//! entries queued. Each entry is reconciled against the logical Shown Set when
//! it is drained (see [`World::process_queue`](super::world::World::process_queue)).

use std::collections::VecDeque;

use super::spatial::BlockCoordinate;

/// A single deferred mesh operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueuedOperation {
    /// Build and realise the mesh for a block.
    BuildMesh {
        /// Block to build
        coord: BlockCoordinate,
    },
    /// Release the realised mesh of a block.
    ReleaseMesh {
        /// Block to release
        coord: BlockCoordinate,
    },
}

impl QueuedOperation {
    /// The block this operation applies to.
    pub fn coord(&self) -> BlockCoordinate {
        match self {
            QueuedOperation::BuildMesh { coord } | QueuedOperation::ReleaseMesh { coord } => *coord,
        }
    }
}

/// FIFO of deferred mesh operations.
#[derive(Debug, Default)]
pub struct WorkQueue {
    operations: VecDeque<QueuedOperation>,
}

impl WorkQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the back of the queue.
    pub fn enqueue(&mut self, operation: QueuedOperation) {
        self.operations.push_back(operation);
    }

    /// Removes the oldest operation.
    pub fn dequeue(&mut self) -> Option<QueuedOperation> {
        self.operations.pop_front()
    }

    /// Number of pending operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation is pending.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Pending operations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedOperation> {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn drains_in_fifo_order_and_keeps_duplicates() {
        let coord = Point3::new(1, 2, 3);
        let mut queue = WorkQueue::new();
        queue.enqueue(QueuedOperation::BuildMesh { coord });
        queue.enqueue(QueuedOperation::ReleaseMesh { coord });
        queue.enqueue(QueuedOperation::BuildMesh { coord });
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.dequeue(), Some(QueuedOperation::BuildMesh { coord }));
        assert_eq!(queue.dequeue(), Some(QueuedOperation::ReleaseMesh { coord }));
        assert_eq!(queue.dequeue().map(|op| op.coord()), Some(coord));
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
    }
}
