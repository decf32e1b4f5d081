//! # Spatial Mapping
//!
//! Converts continuous world positions into the integer keys the world is
//! indexed by:
//!
//! * [`normalize`] maps a position to the block it belongs to.
//! * [`SectorSize::sectorize`] maps a position to the coarse horizontal sector
//!   used to bound show/hide work around the player.
//!
//! ## Rounding
//!
//! Block centres sit on integer coordinates and a block spans `±0.5` around its
//! centre, so a position belongs to the nearest integer on each axis. Exact
//! ties (`x.5`) round half away from zero (`f32::round`), which keeps the
//! mapping symmetric about the origin.

use cgmath::Point3;

use crate::engine_state::engine_config::MAX_SECTOR_SIZE;
use crate::error::ConfigError;

/// Integer position of a single block. Unique key within the World Store.
pub type BlockCoordinate = Point3<i32>;

/// Coarse horizontal partition key. The `y` component is always zero.
pub type Sector = Point3<i32>;

/// Rounds a continuous position to the block coordinate it belongs to.
///
/// # Arguments
/// * `position` - Any position in world space
///
/// # Returns
/// The coordinate of the block whose unit cube contains `position`.
pub fn normalize(position: Point3<f32>) -> BlockCoordinate {
    Point3::new(
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    )
}

/// Edge length of a sector, in blocks. Always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorSize(i32);

impl SectorSize {
    /// Validates a sector edge length.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroSectorSize`] if `size` is zero, or
    /// [`ConfigError::OutOfRange`] if it exceeds [`MAX_SECTOR_SIZE`].
    pub fn new(size: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSectorSize);
        }
        if size > MAX_SECTOR_SIZE {
            return Err(ConfigError::OutOfRange {
                field: "sector_size",
                value: size.into(),
                max: MAX_SECTOR_SIZE.into(),
            });
        }
        Ok(SectorSize(size as i32))
    }

    /// The edge length in blocks.
    pub fn get(&self) -> i32 {
        self.0
    }

    /// Returns the sector a continuous position falls into.
    ///
    /// The position is first normalised to its block, then `x` and `z` are
    /// floor-divided by the sector size. The world is only partitioned
    /// horizontally, so `y` is always zero.
    pub fn sectorize(&self, position: Point3<f32>) -> Sector {
        self.sector_of(normalize(position))
    }

    /// Returns the sector a block coordinate belongs to.
    pub fn sector_of(&self, coord: BlockCoordinate) -> Sector {
        Point3::new(coord.x.div_euclid(self.0), 0, coord.z.div_euclid(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rounds_to_nearest_block() {
        assert_eq!(normalize(Point3::new(0.4, -0.4, 1.6)), Point3::new(0, 0, 2));
        assert_eq!(normalize(Point3::new(-1.6, 2.49, -0.51)), Point3::new(-2, 2, -1));
    }

    #[test]
    fn normalize_ties_round_away_from_zero() {
        assert_eq!(normalize(Point3::new(0.5, -0.5, 2.5)), Point3::new(1, -1, 3));
    }

    #[test]
    fn zero_sector_size_is_rejected() {
        assert!(matches!(SectorSize::new(0), Err(ConfigError::ZeroSectorSize)));
    }

    #[test]
    fn sector_size_beyond_i32_is_rejected() {
        assert!(matches!(
            SectorSize::new(u32::MAX),
            Err(ConfigError::OutOfRange { field: "sector_size", .. })
        ));
        assert_eq!(SectorSize::new(MAX_SECTOR_SIZE).unwrap().get(), 4096);
    }

    #[test]
    fn sectorize_floors_negative_coordinates() {
        let size = SectorSize::new(16).unwrap();
        assert_eq!(size.sectorize(Point3::new(0.0, 40.0, 15.0)), Point3::new(0, 0, 0));
        assert_eq!(size.sectorize(Point3::new(16.0, -3.0, 0.0)), Point3::new(1, 0, 0));
        assert_eq!(size.sectorize(Point3::new(-1.0, 0.0, -16.0)), Point3::new(-1, 0, -1));
        assert_eq!(size.sectorize(Point3::new(-0.4, 0.0, -17.0)), Point3::new(0, 0, -2));
    }

    #[test]
    fn sectorize_is_stable() {
        let size = SectorSize::new(16).unwrap();
        let position = Point3::new(-37.25, 12.5, 101.75);
        assert_eq!(size.sectorize(position), size.sectorize(position));
        assert_eq!(size.sectorize(position).y, 0);
    }
}
