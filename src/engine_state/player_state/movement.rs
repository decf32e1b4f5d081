//! # Movement Vectors
//!
//! Converts look angles and strafe intent into direction vectors.
//!
//! Angles are in degrees. A yaw of `0°` looks down negative Z, and yaw grows
//! clockwise when seen from above, so `90°` looks down positive X. Pitch is
//! positive when looking up.

use cgmath::{Angle, Deg, Vector3};

/// Which way the player wants to move relative to where it is looking.
///
/// Each component is `-1`, `0` or `1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrafeIntent {
    /// `1` forward, `-1` backward
    pub forward: i8,
    /// `1` right, `-1` left
    pub lateral: i8,
}

impl StrafeIntent {
    /// Builds an intent from the four movement keys.
    pub fn from_keys(forward: bool, backward: bool, left: bool, right: bool) -> Self {
        StrafeIntent {
            forward: forward as i8 - backward as i8,
            lateral: right as i8 - left as i8,
        }
    }

    /// Whether no movement is requested.
    pub fn is_idle(&self) -> bool {
        self.forward == 0 && self.lateral == 0
    }
}

/// Unit vector pointing where the player is looking.
///
/// # Arguments
/// * `yaw` - Horizontal look angle
/// * `pitch` - Vertical look angle, `-90°..=90°`
pub fn sight_vector(yaw: Deg<f32>, pitch: Deg<f32>) -> Vector3<f32> {
    let m = pitch.cos();
    let heading = yaw - Deg(90.0);
    Vector3::new(heading.cos() * m, pitch.sin(), heading.sin() * m)
}

/// Direction the player moves in, or the zero vector when idle.
///
/// Walking always stays in the horizontal plane. Flying follows the pitch
/// while moving straight forward or backward; any sideways component keeps
/// flight level.
///
/// # Returns
/// A unit vector, or `(0, 0, 0)` if `strafe` is idle.
pub fn motion_vector(
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    strafe: StrafeIntent,
    flying: bool,
) -> Vector3<f32> {
    if strafe.is_idle() {
        return Vector3::new(0.0, 0.0, 0.0);
    }

    let offset = Deg::atan2(-(strafe.forward as f32), strafe.lateral as f32);
    let heading = yaw + offset;

    if !flying {
        return Vector3::new(heading.cos(), 0.0, heading.sin());
    }

    let (mut m, mut dy) = (pitch.cos(), pitch.sin());
    if strafe.lateral != 0 {
        m = 1.0;
        dy = 0.0;
    }
    if strafe.forward < 0 {
        dy = -dy;
    }
    Vector3::new(heading.cos() * m, dy, heading.sin() * m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const EPSILON: f32 = 1e-5;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn idle_strafe_is_zero_in_every_mode() {
        for flying in [false, true] {
            for (yaw, pitch) in [(0.0, 0.0), (37.0, -80.0), (-200.0, 45.0)] {
                assert_eq!(
                    motion_vector(Deg(yaw), Deg(pitch), StrafeIntent::default(), flying),
                    Vector3::new(0.0, 0.0, 0.0)
                );
            }
        }
    }

    #[test]
    fn sight_vector_is_unit_length() {
        for (yaw, pitch) in [(0.0, 0.0), (90.0, 30.0), (-45.0, -90.0), (720.0, 89.0)] {
            let sight = sight_vector(Deg(yaw), Deg(pitch));
            assert!((sight.magnitude() - 1.0).abs() < EPSILON);
        }
        assert_close(sight_vector(Deg(0.0), Deg(0.0)), Vector3::new(0.0, 0.0, -1.0));
        assert_close(sight_vector(Deg(90.0), Deg(0.0)), Vector3::new(1.0, 0.0, 0.0));
        assert_close(sight_vector(Deg(0.0), Deg(90.0)), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn walking_forward_follows_sight_but_stays_level() {
        let forward = StrafeIntent::from_keys(true, false, false, false);
        let motion = motion_vector(Deg(30.0), Deg(60.0), forward, false);
        let sight = sight_vector(Deg(30.0), Deg(0.0));
        assert_close(motion, sight);
        assert_eq!(motion.y, 0.0);
    }

    #[test]
    fn lateral_keys_move_perpendicular_to_sight() {
        let right = motion_vector(
            Deg(0.0),
            Deg(0.0),
            StrafeIntent::from_keys(false, false, false, true),
            false,
        );
        assert_close(right, Vector3::new(1.0, 0.0, 0.0));

        let back = motion_vector(
            Deg(0.0),
            Deg(0.0),
            StrafeIntent::from_keys(false, true, false, false),
            false,
        );
        assert_close(back, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn flying_follows_pitch() {
        let forward = StrafeIntent::from_keys(true, false, false, false);
        let motion = motion_vector(Deg(0.0), Deg(45.0), forward, true);
        assert_close(motion, sight_vector(Deg(0.0), Deg(45.0)));

        let backward = StrafeIntent::from_keys(false, true, false, false);
        let motion = motion_vector(Deg(0.0), Deg(45.0), backward, true);
        assert!(motion.y < 0.0);
        assert!(motion.z > 0.0);
        assert!((motion.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn flying_sideways_stays_level() {
        let diagonal = StrafeIntent::from_keys(true, false, true, false);
        let motion = motion_vector(Deg(0.0), Deg(70.0), diagonal, true);
        assert_eq!(motion.y, 0.0);
        assert!((motion.magnitude() - 1.0).abs() < EPSILON);
    }
}
