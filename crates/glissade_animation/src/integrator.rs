//! Slider physics integration
//!
//! Frame-stepped (not time-stepped) integration used by the slider:
//!
//! ```text
//! velocity += accel
//! x        += velocity
//! velocity *= 1 - friction
//! accel     = 0
//! ```
//!
//! Forces are accumulated with [`Integrator::apply_force`] before each step.
//! The slider applies an attraction force toward the selected cell's target
//! so the motion behaves like a damped spring measured in frames.

/// Consecutive resting frames required before the motion counts as settled
pub const RESTING_FRAMES: u32 = 3;

/// Positions are compared at 1/100 px when detecting rest
const POSITION_PRECISION: f32 = 100.0;

/// Largest distance from an attraction target that still counts as rest
pub const REST_TOLERANCE: f32 = 1.0 / POSITION_PRECISION;

/// Position, velocity, and acceleration along the primary axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Integrator {
    x: f32,
    velocity: f32,
    accel: f32,
    resting_frames: u32,
}

impl Integrator {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            ..Default::default()
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// Move to a position directly, bypassing integration (used while dragging)
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Offset the position, e.g. by one content cycle when wrapping
    pub fn translate(&mut self, dx: f32) {
        self.x += dx;
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: f32) {
        self.accel += force;
    }

    /// Pull toward `target` proportionally to the offset error
    pub fn attract(&mut self, target: f32, attraction: f32) {
        self.apply_force((target - self.x) * attraction);
    }

    /// Integrate one frame with the given friction in (0, 1)
    pub fn integrate(&mut self, friction: f32) {
        self.velocity += self.accel;
        self.x += self.velocity;
        self.velocity *= 1.0 - friction;
        self.accel = 0.0;
    }

    /// Where the motion would come to rest with no further forces
    pub fn resting_position(&self, friction: f32) -> f32 {
        self.x + self.velocity / friction
    }

    /// Forget the resting streak (called when an animation starts)
    pub fn reset_resting(&mut self) {
        self.resting_frames = 0;
    }

    pub fn resting_frames(&self) -> u32 {
        self.resting_frames
    }

    /// Update the resting streak after a step
    ///
    /// A frame rests when the pointer is up and the rounded position did not
    /// change. When pulled toward `target` the position must also be within
    /// [`REST_TOLERANCE`] of it, unless the step could no longer move it at
    /// all; a damped swing stalls at its turning points well short of the
    /// target. Returns true once [`RESTING_FRAMES`] consecutive frames rested,
    /// leaving the position exactly on `target`.
    pub fn settle(&mut self, previous_x: f32, pointer_down: bool, target: Option<f32>) -> bool {
        let unchanged = (self.x * POSITION_PRECISION).round()
            == (previous_x * POSITION_PRECISION).round();
        let at_target = target.map_or(true, |target| {
            (self.x - target).abs() < REST_TOLERANCE || self.x == previous_x
        });
        if !pointer_down && unchanged && at_target {
            self.resting_frames += 1;
        } else {
            self.resting_frames = 0;
        }

        let settled = self.resting_frames >= RESTING_FRAMES;
        if settled {
            if let Some(target) = target {
                self.x = target;
                self.velocity = 0.0;
            }
        }
        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTRACTION: f32 = 0.025;
    const FRICTION: f32 = 0.28;

    /// Step until settled, returning the frame count
    fn run_to_rest(integrator: &mut Integrator, target: f32, max_frames: u32) -> Option<u32> {
        for frame in 1..=max_frames {
            let previous = integrator.x();
            integrator.attract(target, ATTRACTION);
            integrator.integrate(FRICTION);
            if integrator.settle(previous, false, Some(target)) {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn test_integrate_order() {
        let mut integrator = Integrator::new(10.0);
        integrator.apply_force(2.0);
        integrator.integrate(0.5);

        // velocity = 2, x = 12, then velocity halved
        assert_eq!(integrator.x(), 12.0);
        assert_eq!(integrator.velocity(), 1.0);

        // Acceleration is consumed by the step
        integrator.integrate(0.5);
        assert_eq!(integrator.x(), 13.0);
        assert_eq!(integrator.velocity(), 0.5);
    }

    #[test]
    fn test_converges_from_any_offset() {
        for start in [-2_000.0, -333.3, -1.0, 0.5, 250.0, 4_000.0] {
            let mut integrator = Integrator::new(start);
            let frames = run_to_rest(&mut integrator, 0.0, 1_000);

            assert!(frames.is_some(), "did not settle from {}", start);
            assert!(
                integrator.x().abs() < REST_TOLERANCE,
                "settled at {} from {}",
                integrator.x(),
                start
            );
        }
    }

    #[test]
    fn test_settle_requires_consecutive_frames() {
        let mut integrator = Integrator::new(5.0);

        assert!(!integrator.settle(5.0, false, None));
        assert!(!integrator.settle(5.0, false, None));
        // Movement breaks the streak
        integrator.set_x(6.0);
        assert!(!integrator.settle(5.0, false, None));
        assert_eq!(integrator.resting_frames(), 0);

        assert!(!integrator.settle(6.0, false, None));
        assert!(!integrator.settle(6.0, false, None));
        assert!(integrator.settle(6.0, false, None));
    }

    #[test]
    fn test_pointer_down_never_rests() {
        let mut integrator = Integrator::new(0.0);
        for _ in 0..10 {
            assert!(!integrator.settle(0.0, true, Some(0.0)));
        }
    }

    #[test]
    fn test_sub_rounding_motion_counts_as_rest() {
        let mut integrator = Integrator::new(100.0);
        integrator.set_x(100.001);
        integrator.settle(100.0, false, None);
        assert_eq!(integrator.resting_frames(), 1);
    }

    #[test]
    fn test_turning_point_short_of_target_is_not_rest() {
        // Rounded position is stable, but 0.1px away from the target
        let mut integrator = Integrator::new(-0.1);
        for _ in 0..RESTING_FRAMES {
            assert!(!integrator.settle(-0.1001, false, Some(0.0)));
        }
        assert_eq!(integrator.resting_frames(), 0);
    }

    #[test]
    fn test_settling_snaps_onto_target() {
        let mut integrator = Integrator::new(-0.004);
        integrator.set_velocity(0.0001);
        let settled = (0..RESTING_FRAMES).fold(false, |_, _| {
            integrator.settle(-0.004, false, Some(0.0))
        });

        assert!(settled);
        assert_eq!(integrator.x(), 0.0);
        assert_eq!(integrator.velocity(), 0.0);
    }

    #[test]
    fn test_long_jump_settles_on_target() {
        let mut integrator = Integrator::new(0.0);
        let target = -4_100.0;

        assert!(run_to_rest(&mut integrator, target, 2_000).is_some());
        assert_eq!(integrator.x(), target);
    }

    #[test]
    fn test_resting_position_projection() {
        let mut integrator = Integrator::new(0.0);
        integrator.set_velocity(10.0);

        let projected = integrator.resting_position(0.5);
        assert_eq!(projected, 20.0);

        // Free gliding ends near the projection
        for _ in 0..200 {
            integrator.integrate(0.5);
        }
        assert!((integrator.x() - projected).abs() < 1e-3);
    }
}
