//! # Visibility Engine
//!
//! Keeps two views of "what is drawn" consistent with the World Store:
//!
//! * the **logical** Shown Set: blocks the engine has decided should be visible,
//!   updated synchronously by every show/hide call
//! * the **realised** Shown Set: blocks whose mesh the renderer actually holds
//!
//! Immediate show/hide (player edits) realise or release the mesh in the same
//! call. Deferred show/hide (sector transitions, world start-up) enqueue the
//! mesh work instead, and [`World::process_queue`] drains it once per frame
//! under a wall-clock budget.
//!
//! Queued work is reconciled when it is drained rather than when it is queued:
//! a `BuildMesh` only realises a block that is still logically shown, and a
//! `ReleaseMesh` only releases a block that is no longer logically shown. Stale
//! or duplicate entries are therefore harmless. A deferred hide leaves the mesh
//! realised until its `ReleaseMesh` is drained, so the realised set is a subset
//! of the logical set only while no release is pending.

use std::collections::HashSet;

use cgmath::Point3;
use web_time::{Duration, Instant};

use super::block::block_type::BlockType;
use super::spatial::{BlockCoordinate, Sector};
use super::world::World;
use super::world_queue::QueuedOperation;
use crate::engine_state::rendering::mesh::{BlockMesh, MeshBackend};
use crate::error::WorldError;

/// Sectors that changed visibility during a [`World::change_sectors`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectorTransition {
    /// Sectors that entered the render distance
    pub shown_sectors: Vec<Sector>,
    /// Sectors that left the render distance
    pub hidden_sectors: Vec<Sector>,
    /// Blocks newly marked shown across `shown_sectors`
    pub blocks_shown: usize,
    /// Blocks newly marked hidden across `hidden_sectors`
    pub blocks_hidden: usize,
}

impl<B: MeshBackend> World<B> {
    /// Marks the block at `coord` as shown.
    ///
    /// # Arguments
    /// * `coord` - Block to show
    /// * `immediate` - Build the mesh now instead of queueing it
    ///
    /// # Errors
    /// [`WorldError::BlockMissing`] if there is no block at `coord`.
    pub fn show_block(&mut self, coord: BlockCoordinate, immediate: bool) -> Result<(), WorldError> {
        let block_type = self
            .block_at(coord)
            .ok_or(WorldError::BlockMissing(coord))?;
        self.mark_shown(coord, block_type, immediate);
        Ok(())
    }

    /// Marks the block at `coord` as hidden.
    ///
    /// # Arguments
    /// * `coord` - Block to hide
    /// * `immediate` - Release the mesh now instead of queueing it
    ///
    /// # Errors
    /// [`WorldError::BlockNotShown`] if `coord` is not in the logical Shown Set.
    pub fn hide_block(&mut self, coord: BlockCoordinate, immediate: bool) -> Result<(), WorldError> {
        if !self.shown.contains_key(&coord) {
            return Err(WorldError::BlockNotShown(coord));
        }
        self.mark_hidden(coord, immediate);
        Ok(())
    }

    pub(super) fn mark_shown(&mut self, coord: BlockCoordinate, block_type: BlockType, immediate: bool) {
        self.shown.insert(coord, block_type);
        if immediate {
            self.realize(coord);
        } else {
            self.queue.enqueue(QueuedOperation::BuildMesh { coord });
        }
    }

    pub(super) fn mark_hidden(&mut self, coord: BlockCoordinate, immediate: bool) {
        self.shown.remove(&coord);
        if immediate {
            self.unrealize(coord);
        } else {
            self.queue.enqueue(QueuedOperation::ReleaseMesh { coord });
        }
    }

    /// Builds the mesh for a logically shown block, replacing any mesh it
    /// already had.
    fn realize(&mut self, coord: BlockCoordinate) {
        let Some(block_type) = self.shown.get(&coord).copied() else {
            return;
        };
        let mesh = BlockMesh::new(coord, block_type, &self.atlas);
        let handle = self.backend.build(coord, mesh);
        if let Some(stale) = self.realized.insert(coord, handle) {
            self.backend.release(stale);
        }
    }

    fn unrealize(&mut self, coord: BlockCoordinate) {
        if let Some(handle) = self.realized.remove(&coord) {
            self.backend.release(handle);
        }
    }

    /// Queues every exposed, not yet shown block of `sector` to be shown.
    ///
    /// # Returns
    /// The number of blocks newly marked shown.
    pub fn show_sector(&mut self, sector: Sector) -> usize {
        let Some(members) = self.sectors.get(&sector) else {
            return 0;
        };
        let to_show: Vec<(BlockCoordinate, BlockType)> = members
            .iter()
            .filter(|coord| !self.shown.contains_key(*coord) && self.exposed(**coord))
            .filter_map(|coord| self.blocks.get(coord).map(|block_type| (*coord, *block_type)))
            .collect();

        for (coord, block_type) in &to_show {
            self.mark_shown(*coord, *block_type, false);
        }
        to_show.len()
    }

    /// Queues every shown block of `sector` to be hidden.
    ///
    /// # Returns
    /// The number of blocks newly marked hidden.
    pub fn hide_sector(&mut self, sector: Sector) -> usize {
        let Some(members) = self.sectors.get(&sector) else {
            return 0;
        };
        let to_hide: Vec<BlockCoordinate> = members
            .iter()
            .filter(|coord| self.shown.contains_key(*coord))
            .copied()
            .collect();

        for coord in &to_hide {
            self.mark_hidden(*coord, false);
        }
        to_hide.len()
    }

    /// Sectors within render distance of `center`: a disc of radius
    /// `render_distance + 1` clipped to a square of half-width `render_distance`.
    fn sectors_around(&self, center: Sector) -> HashSet<Sector> {
        let pad = self.render_distance;
        let mut sectors = HashSet::new();
        for dx in -pad..=pad {
            for dz in -pad..=pad {
                if dx * dx + dz * dz > (pad + 1) * (pad + 1) {
                    continue;
                }
                sectors.insert(Point3::new(center.x + dx, 0, center.z + dz));
            }
        }
        sectors
    }

    /// Moves the visible window of sectors from `before` to `after`.
    ///
    /// Sectors within render distance of `after` but not of `before` are shown;
    /// sectors within render distance of `before` but not of `after` are hidden.
    /// `None` stands for "no sector" (before the first frame). Both the show
    /// pass and the hide pass always run; all block work is deferred to the
    /// queue.
    pub fn change_sectors(&mut self, before: Option<Sector>, after: Option<Sector>) -> SectorTransition {
        let before_set = before.map(|s| self.sectors_around(s)).unwrap_or_default();
        let after_set = after.map(|s| self.sectors_around(s)).unwrap_or_default();

        let mut transition = SectorTransition {
            shown_sectors: after_set.difference(&before_set).copied().collect(),
            hidden_sectors: before_set.difference(&after_set).copied().collect(),
            ..SectorTransition::default()
        };

        for sector in transition.shown_sectors.clone() {
            transition.blocks_shown += self.show_sector(sector);
        }
        for sector in transition.hidden_sectors.clone() {
            transition.blocks_hidden += self.hide_sector(sector);
        }

        log::debug!(
            "Sector change {:?} -> {:?}: {} sectors shown ({} blocks), {} sectors hidden ({} blocks)",
            before,
            after,
            transition.shown_sectors.len(),
            transition.blocks_shown,
            transition.hidden_sectors.len(),
            transition.blocks_hidden,
        );
        transition
    }

    /// Drains queued mesh work for at most one frame's budget.
    ///
    /// # Returns
    /// The number of entries processed.
    pub fn process_queue(&mut self) -> usize {
        self.process_queue_within(self.queue_budget)
    }

    /// Drains queued mesh work until the queue is empty or `budget` has elapsed.
    ///
    /// The clock is checked before each entry, so a zero budget processes
    /// nothing.
    pub fn process_queue_within(&mut self, budget: Duration) -> usize {
        let start = Instant::now();
        let mut processed = 0;
        while !self.queue.is_empty() && start.elapsed() < budget {
            if let Some(operation) = self.queue.dequeue() {
                self.dispatch(operation);
                processed += 1;
            }
        }
        if !self.queue.is_empty() {
            log::debug!(
                "Queue budget of {:?} spent after {} entries, {} remaining",
                budget,
                processed,
                self.queue.len()
            );
        }
        processed
    }

    /// Drains all queued mesh work, regardless of time.
    ///
    /// # Returns
    /// The number of entries processed.
    pub fn process_entire_queue(&mut self) -> usize {
        let mut processed = 0;
        while let Some(operation) = self.queue.dequeue() {
            self.dispatch(operation);
            processed += 1;
        }
        processed
    }

    fn dispatch(&mut self, operation: QueuedOperation) {
        log::trace!("Dispatching {:?}", operation);
        match operation {
            QueuedOperation::BuildMesh { coord } => {
                if self.shown.contains_key(&coord) {
                    self.realize(coord);
                }
            }
            QueuedOperation::ReleaseMesh { coord } => {
                if !self.shown.contains_key(&coord) {
                    self.unrealize(coord);
                }
            }
        }
    }
}
