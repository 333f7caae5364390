//! Keyboard-driven camera state.
//!
//! The camera is a pair of vectors: a `position` the shader ray-marches or
//! projects from, and an `aim` point it looks toward. Movement is discrete
//! per-frame polling, not event-driven: a key held across frames contributes
//! one fixed step every frame it remains pressed, and releasing it stops
//! movement immediately. There is no momentum, collision, or acceleration.
//!
//! Coupling invariant: strafing (left/right) moves `position.x` and `aim.x`
//! by the same step, so `position.x - aim.x` never changes. Forward/back
//! move `position.z` only, walking the camera toward or away from its aim.

use glam::Vec3;

/// Distance moved along an axis per frame per held key.
pub const CAMERA_STEP: f32 = 0.1;

/// Camera start position: one unit behind the aim point along +z.
pub const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Camera start aim: the clip-space origin.
pub const START_AIM: Vec3 = Vec3::ZERO;

/// Instantaneous pressed state of the four movement keys, sampled once per
/// frame from the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraInput {
    /// Move toward the aim point (-z).
    pub forward: bool,
    /// Move away from the aim point (+z).
    pub back: bool,
    /// Strafe left (-x), carrying the aim along.
    pub left: bool,
    /// Strafe right (+x), carrying the aim along.
    pub right: bool,
}

/// Mutable camera state uploaded to the shader each frame as the
/// `POSITION` and `AIM` uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks toward.
    pub aim: Vec3,
}

impl Camera {
    /// Creates a camera at the start position, aimed at the origin.
    pub fn new() -> Self {
        Self {
            position: START_POSITION,
            aim: START_AIM,
        }
    }

    /// Applies one frame's worth of movement from the sampled key state.
    ///
    /// Opposite keys held together cancel out; each pressed key contributes
    /// exactly one [`CAMERA_STEP`] along its axis.
    pub fn apply(&mut self, input: CameraInput) {
        if input.forward {
            self.position.z -= CAMERA_STEP;
        }
        if input.back {
            self.position.z += CAMERA_STEP;
        }
        if input.left {
            self.position.x -= CAMERA_STEP;
            self.aim.x -= CAMERA_STEP;
        }
        if input.right {
            self.position.x += CAMERA_STEP;
            self.aim.x += CAMERA_STEP;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_starts_at_documented_state() {
        let camera = Camera::new();
        assert_eq!(camera.position, START_POSITION);
        assert_eq!(camera.aim, START_AIM);
    }

    #[test]
    fn idle_input_leaves_camera_unchanged() {
        let mut camera = Camera::new();
        camera.apply(CameraInput::default());
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn forward_moves_position_toward_aim() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            forward: true,
            ..Default::default()
        });
        assert_eq!(camera.position.z, START_POSITION.z - CAMERA_STEP);
        assert_eq!(camera.aim.z, START_AIM.z, "forward must not move the aim");
    }

    #[test]
    fn back_moves_position_away_from_aim() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            back: true,
            ..Default::default()
        });
        assert_eq!(camera.position.z, START_POSITION.z + CAMERA_STEP);
        assert_eq!(camera.aim.z, START_AIM.z, "back must not move the aim");
    }

    #[test]
    fn strafe_moves_position_and_aim_together() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            right: true,
            ..Default::default()
        });
        assert_eq!(camera.position.x, START_POSITION.x + CAMERA_STEP);
        assert_eq!(camera.aim.x, START_AIM.x + CAMERA_STEP);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            forward: true,
            back: true,
            left: true,
            right: true,
        });
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn held_key_accumulates_one_step_per_frame() {
        let mut camera = Camera::new();
        let held = CameraInput {
            forward: true,
            ..Default::default()
        };
        for _ in 0..10 {
            camera.apply(held);
        }
        let moved = START_POSITION.z - camera.position.z;
        assert!(
            (moved - 10.0 * CAMERA_STEP).abs() < 1e-6,
            "10 held frames should move 10 steps, moved {moved}"
        );
    }

    #[test]
    fn release_stops_movement_with_no_momentum() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            right: true,
            ..Default::default()
        });
        let after_press = camera;
        camera.apply(CameraInput::default());
        assert_eq!(camera, after_press);
    }

    #[test]
    fn y_axis_never_moves() {
        let mut camera = Camera::new();
        camera.apply(CameraInput {
            forward: true,
            back: false,
            left: true,
            right: false,
        });
        assert_eq!(camera.position.y, START_POSITION.y);
        assert_eq!(camera.aim.y, START_AIM.y);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = CameraInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(forward, back, left, right)| CameraInput {
                    forward,
                    back,
                    left,
                    right,
                },
            )
        }

        proptest! {
            // -- Horizontal look-offset is constant for any key sequence --

            #[test]
            fn x_offset_constant_for_any_key_sequence(
                inputs in proptest::collection::vec(arb_input(), 0..200)
            ) {
                let mut camera = Camera::new();
                let offset = camera.position.x - camera.aim.x;
                for (i, input) in inputs.iter().enumerate() {
                    camera.apply(*input);
                    let now = camera.position.x - camera.aim.x;
                    prop_assert!(
                        (now - offset).abs() < 1e-4,
                        "x offset drifted from {offset} to {now} at poll {i}"
                    );
                }
            }

            // -- position - aim changes only by z-key step deltas --

            #[test]
            fn offset_changes_only_through_z_keys(
                inputs in proptest::collection::vec(arb_input(), 0..200)
            ) {
                let mut camera = Camera::new();
                let mut expected_z = camera.position.z - camera.aim.z;
                for input in &inputs {
                    camera.apply(*input);
                    if input.forward {
                        expected_z -= CAMERA_STEP;
                    }
                    if input.back {
                        expected_z += CAMERA_STEP;
                    }
                }
                let offset = camera.position - camera.aim;
                prop_assert!(
                    (offset.x - (START_POSITION.x - START_AIM.x)).abs() < 1e-4,
                    "x offset moved: {}", offset.x
                );
                prop_assert!(
                    (offset.y - (START_POSITION.y - START_AIM.y)).abs() < 1e-4,
                    "y offset moved: {}", offset.y
                );
                prop_assert!(
                    (offset.z - expected_z).abs() < 1e-3,
                    "z offset {} != expected {expected_z}", offset.z
                );
            }
        }
    }
}
