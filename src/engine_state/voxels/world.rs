//! # World Module
//!
//! This module provides the [`World`] struct: the authoritative store of every
//! placed block, plus the bookkeeping that decides which of those blocks are
//! drawn.
//!
//! ## Architecture
//!
//! The world is sparse. Only coordinates that hold a block are stored, so an
//! absent key means air and an unbounded grid costs memory proportional to the
//! number of blocks, not to its extent.
//!
//! Two indexes are kept in lockstep by the same mutation path
//! ([`World::add_block`] / [`World::remove_block`]):
//! - `blocks`: coordinate → block type, for O(1) occupancy queries
//! - `sectors`: sector → coordinates in it, so whole areas can be shown or
//!   hidden as the player moves (see the `visibility` module)
//!
//! ## Exposure
//!
//! Only blocks touching air on at least one face are ever shown. Exposure is
//! six hash lookups, independent of world or sector size.

use std::collections::{HashMap, HashSet};

use cgmath::{Point3, Vector3};
use web_time::Duration;

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::spatial::{normalize, BlockCoordinate, Sector, SectorSize};
use super::world_queue::WorkQueue;
use crate::engine_state::engine_config::EngineConfig;
use crate::engine_state::rendering::geometry::TextureAtlas;
use crate::engine_state::rendering::mesh::{MeshBackend, MeshStore};
use crate::error::{ConfigError, WorldError};

/// Sub-steps per block taken by [`World::hit_test`].
const HIT_TEST_STEPS_PER_BLOCK: u32 = 8;

/// Read-only occupancy queries against a block grid.
///
/// The movement resolver only needs to know which coordinates are solid, so it
/// depends on this capability rather than on a concrete [`World`].
pub trait BlockOccupancy {
    /// Whether a block exists at `coord`.
    fn is_occupied(&self, coord: BlockCoordinate) -> bool;
}

/// The voxel world: block storage, sector index, and the shown/realised state
/// of every visible block.
///
/// # Type Parameters
/// - `B`: Renderer backend that realises block meshes
pub struct World<B: MeshBackend = MeshStore> {
    /// Every placed block.
    pub(super) blocks: HashMap<BlockCoordinate, BlockType>,
    /// Coordinates grouped by the sector they fall into.
    pub(super) sectors: HashMap<Sector, HashSet<BlockCoordinate>>,
    /// Blocks the engine has decided should be visible (logical Shown Set).
    pub(super) shown: HashMap<BlockCoordinate, BlockType>,
    /// Blocks whose mesh has actually been built (realised Shown Set).
    pub(super) realized: HashMap<BlockCoordinate, B::Handle>,
    /// Deferred mesh work.
    pub(super) queue: WorkQueue,
    pub(super) backend: B,
    pub(super) atlas: TextureAtlas,
    pub(super) sector_size: SectorSize,
    /// Sector pad around the player that is kept visible.
    pub(super) render_distance: i32,
    /// Wall-clock budget for one [`World::process_queue`] call.
    pub(super) queue_budget: Duration,
}

impl World<MeshStore> {
    /// Creates an empty world backed by an in-memory [`MeshStore`].
    ///
    /// # Errors
    /// Any [`ConfigError`] raised by validating `config`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        World::with_backend(config, MeshStore::new())
    }
}

impl<B: MeshBackend> World<B> {
    /// Creates an empty world that realises meshes through `backend`.
    ///
    /// # Errors
    /// Any [`ConfigError`] raised by validating `config`.
    pub fn with_backend(config: &EngineConfig, backend: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(World {
            blocks: HashMap::new(),
            sectors: HashMap::new(),
            shown: HashMap::new(),
            realized: HashMap::new(),
            queue: WorkQueue::new(),
            backend,
            atlas: TextureAtlas::new(config.texture_atlas_size)?,
            sector_size: SectorSize::new(config.sector_size)?,
            render_distance: config.render_distance as i32,
            queue_budget: config.queue_budget(),
        })
    }

    /// Block type stored at `coord`, or `None` for air.
    pub fn block_at(&self, coord: BlockCoordinate) -> Option<BlockType> {
        self.blocks.get(&coord).copied()
    }

    /// Number of placed blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is placed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Coordinates currently placed in `sector`.
    pub fn sector_blocks(&self, sector: &Sector) -> Option<&HashSet<BlockCoordinate>> {
        self.sectors.get(sector)
    }

    /// Number of sectors that hold at least one block.
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    /// The validated sector edge length.
    pub fn sector_size(&self) -> SectorSize {
        self.sector_size
    }

    /// Whether `coord` is in the logical Shown Set.
    pub fn is_shown(&self, coord: BlockCoordinate) -> bool {
        self.shown.contains_key(&coord)
    }

    /// Whether `coord` has a realised mesh.
    pub fn is_realized(&self, coord: BlockCoordinate) -> bool {
        self.realized.contains_key(&coord)
    }

    /// Coordinates in the logical Shown Set.
    pub fn shown_blocks(&self) -> impl Iterator<Item = &BlockCoordinate> {
        self.shown.keys()
    }

    /// Size of the logical Shown Set.
    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    /// Size of the realised Shown Set.
    pub fn realized_len(&self) -> usize {
        self.realized.len()
    }

    /// Realised mesh handle for `coord`.
    pub fn mesh_handle(&self, coord: BlockCoordinate) -> Option<&B::Handle> {
        self.realized.get(&coord)
    }

    /// Pending deferred mesh work.
    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    /// The renderer backend meshes are realised through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the block at `coord` touches air on at least one face.
    ///
    /// Does not require `coord` itself to be occupied.
    pub fn exposed(&self, coord: BlockCoordinate) -> bool {
        BlockSide::all()
            .iter()
            .any(|side| !self.blocks.contains_key(&(coord + side.normal())))
    }

    /// Places a block, replacing whatever was at `coord`.
    ///
    /// A replaced block is removed first, so neighbor visibility is rechecked
    /// rather than the type being silently overwritten.
    ///
    /// # Arguments
    /// * `coord` - Where to place the block
    /// * `block_type` - Material of the new block
    /// * `immediate` - If true, show the block (when exposed) and resync its
    ///   neighbors right away. If false the block is only stored, and becomes
    ///   visible when its sector is shown.
    pub fn add_block(
        &mut self,
        coord: BlockCoordinate,
        block_type: BlockType,
        immediate: bool,
    ) -> Result<(), WorldError> {
        if self.blocks.contains_key(&coord) {
            self.remove_block(coord, immediate)?;
        }
        self.blocks.insert(coord, block_type);
        self.sectors
            .entry(self.sector_size.sector_of(coord))
            .or_default()
            .insert(coord);

        if immediate {
            if self.exposed(coord) {
                self.mark_shown(coord, block_type, true);
            }
            self.check_neighbors(coord);
        }
        Ok(())
    }

    /// Removes the block at `coord`.
    ///
    /// A shown block is always hidden as part of its removal. With `immediate`
    /// its mesh is released right away and the six neighbors are resynced
    /// (removal can expose buried blocks); otherwise the release is queued.
    ///
    /// # Errors
    /// [`WorldError::BlockMissing`] if no block exists at `coord`.
    pub fn remove_block(&mut self, coord: BlockCoordinate, immediate: bool) -> Result<(), WorldError> {
        self.blocks
            .remove(&coord)
            .ok_or(WorldError::BlockMissing(coord))?;

        let sector = self.sector_size.sector_of(coord);
        if let Some(members) = self.sectors.get_mut(&sector) {
            members.remove(&coord);
            if members.is_empty() {
                self.sectors.remove(&sector);
            }
        }

        if self.shown.contains_key(&coord) {
            self.hide_block(coord, immediate)?;
        }
        if immediate {
            self.check_neighbors(coord);
        }
        Ok(())
    }

    /// Resyncs the shown state of the six blocks around `coord`.
    ///
    /// Each present neighbor is shown if it became exposed, or hidden if it
    /// became buried. Changes apply immediately.
    pub fn check_neighbors(&mut self, coord: BlockCoordinate) {
        for side in BlockSide::all() {
            let neighbor = coord + side.normal();
            let Some(block_type) = self.blocks.get(&neighbor).copied() else {
                continue;
            };
            let is_shown = self.shown.contains_key(&neighbor);
            if self.exposed(neighbor) {
                if !is_shown {
                    self.mark_shown(neighbor, block_type, true);
                }
            } else if is_shown {
                self.mark_hidden(neighbor, true);
            }
        }
    }

    /// Walks a line of sight looking for the first block it enters.
    ///
    /// The ray advances in `1 / 8` block steps from `position` along `vector`
    /// (expected to be a unit vector) for at most `max_distance` blocks. An
    /// empty world misses without walking the ray.
    ///
    /// # Returns
    /// `(Some(block), previous)` where `previous` is the last empty block
    /// visited before `block` (the placement target for a new block; `None`
    /// only when `position` starts inside `block`), or `(None, None)` if
    /// nothing is within reach.
    pub fn hit_test(
        &self,
        position: Point3<f32>,
        vector: Vector3<f32>,
        max_distance: u32,
    ) -> (Option<BlockCoordinate>, Option<BlockCoordinate>) {
        if self.blocks.is_empty() {
            return (None, None);
        }

        let step = vector / HIT_TEST_STEPS_PER_BLOCK as f32;
        let mut current = position;
        let mut previous: Option<BlockCoordinate> = None;

        let steps = u64::from(max_distance) * u64::from(HIT_TEST_STEPS_PER_BLOCK);
        for _ in 0..steps {
            let key = normalize(current);
            if previous != Some(key) && self.blocks.contains_key(&key) {
                return (Some(key), previous);
            }
            previous = Some(key);
            current += step;
        }
        (None, None)
    }
}

impl<B: MeshBackend> BlockOccupancy for World<B> {
    fn is_occupied(&self, coord: BlockCoordinate) -> bool {
        self.blocks.contains_key(&coord)
    }
}
