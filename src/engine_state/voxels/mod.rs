//! # Voxel World
//!
//! This module contains the world data and visibility engine: where blocks
//! are, which of them are drawn, and how changes to either are spread across
//! frames.
//!
//! ## Architecture
//!
//! * **Block**: block materials, faces and atlas tiles
//! * **Spatial**: continuous position → block coordinate → sector
//! * **World**: sparse block store plus the sector index
//! * **Visibility**: exposed-face culling, show/hide bookkeeping, sector
//!   transitions
//! * **World queue**: deferred mesh work drained under a frame budget
//! * **Generation**: flat seed world
//!
//! ## Data Flow
//!
//! 1. The player edits a block or crosses into a new sector
//! 2. The world updates the store and sector index together
//! 3. Visibility changes are applied immediately (edits) or queued (sectors)
//! 4. The queue is drained a little every frame, building or releasing meshes
//!
//! ## Threading
//!
//! Everything here runs on the single tick thread. The queue spreads cost over
//! frames; it is not a channel between threads.

pub mod block;
pub mod generation;
pub mod spatial;
pub mod visibility;
pub mod world;
pub mod world_queue;
