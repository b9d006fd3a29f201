use std::time::Duration;

/// the fixed simulation step, one 60 Hz frame
pub const FRAME: Duration = Duration::from_nanos(16_666_667);

/// elapsed time beyond this many frames is dropped instead of simulated
const MAX_CATCH_UP_FRAMES: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    /// the spring snaps to its target once both the distance and the velocity are below this
    pub precision: f32,
}

impl SpringConfig {
    /// critically damped enough to never overshoot
    pub const NO_WOBBLE: Self = Self::new(170.0, 26.0);

    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            precision: 0.01,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::NO_WOBBLE
    }
}

/// a damped spring pulling a single value toward its target
///
/// time is consumed in whole [`FRAME`]s; [`Spring::value`] interpolates toward the next frame by
/// however much time is left over, so the output stays smooth at any refresh rate
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    target: f32,
    position: f32,
    velocity: f32,
    /// time not yet consumed by a whole frame
    leftover: Duration,
}

impl Spring {
    /// a spring resting at `value`
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            config,
            target: value,
            position: value,
            velocity: 0.0,
            leftover: Duration::ZERO,
        }
    }

    /// retargets the spring, keeping its current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    pub fn value(&self) -> f32 {
        if self.is_at_rest() {
            return self.position;
        }

        let next = self.frames().next().unwrap_or(self.target);
        let completion = self.leftover.as_secs_f32() / FRAME.as_secs_f32();
        (next - self.position).mul_add(completion, self.position)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        if self.is_at_rest() {
            self.leftover = Duration::ZERO;
            return;
        }

        let total = (self.leftover + elapsed).min(FRAME * MAX_CATCH_UP_FRAMES);
        let frames = (total.as_nanos() / FRAME.as_nanos()) as u32;

        for _ in 0..frames {
            (self.position, self.velocity) = self.step(self.position, self.velocity);
        }

        self.leftover = total - FRAME * frames;
    }

    /// the lazy sequence of positions the spring passes through, one per frame, ending at rest
    pub fn frames(&self) -> Frames {
        Frames { spring: *self }
    }

    fn step(&self, position: f32, velocity: f32) -> (f32, f32) {
        let dt = FRAME.as_secs_f32();

        let spring_force = -self.config.stiffness * (position - self.target);
        let damper_force = -self.config.damping * velocity;

        let velocity = (spring_force + damper_force).mul_add(dt, velocity);
        let position = velocity.mul_add(dt, position);

        if velocity.abs() < self.config.precision
            && (position - self.target).abs() < self.config.precision
        {
            (self.target, 0.0)
        } else {
            (position, velocity)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Frames {
    spring: Spring,
}

impl Iterator for Frames {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.spring.is_at_rest() {
            return None;
        }

        let spring = &mut self.spring;
        (spring.position, spring.velocity) = spring.step(spring.position, spring.velocity);

        Some(spring.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spring_is_at_rest() {
        let spring = Spring::new(160.0, SpringConfig::default());
        assert!(spring.is_at_rest());
        assert_eq!(spring.frames().count(), 0);
        assert!((spring.value() - 160.0).abs() < f32::EPSILON);
    }

    #[test]
    fn frames_converge_to_target() {
        let mut spring = Spring::new(240.0, SpringConfig::default());
        spring.set_target(160.0);

        let frames: Vec<_> = spring.frames().collect();
        assert!(!frames.is_empty());
        assert!(frames.len() < 600);
        assert!((frames[frames.len() - 1] - 160.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_wobble_does_not_overshoot() {
        let mut spring = Spring::new(240.0, SpringConfig::NO_WOBBLE);
        spring.set_target(160.0);

        assert!(spring.frames().all(|x| x >= 160.0 - 0.01));
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut spring = Spring::new(0.0, SpringConfig::new(216.0, 17.0));
        spring.set_target(1.0);

        let peak = spring.frames().fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn zero_elapsed_changes_nothing() {
        let mut spring = Spring::new(0.0, SpringConfig::default());
        spring.set_target(1.0);
        spring.advance(Duration::ZERO);

        assert!(spring.value().abs() < f32::EPSILON);
        assert!(spring.velocity.abs() < f32::EPSILON);
    }

    #[test]
    fn advance_matches_frames() {
        let mut spring = Spring::new(0.0, SpringConfig::default());
        spring.set_target(1.0);

        let expected = spring.frames().nth(2).unwrap();
        spring.advance(FRAME * 3);

        assert!((spring.value() - expected).abs() < 1e-5);
    }

    #[test]
    fn partial_frames_interpolate() {
        let mut spring = Spring::new(0.0, SpringConfig::default());
        spring.set_target(1.0);

        let first = spring.frames().next().unwrap();
        spring.advance(FRAME / 2);

        let value = spring.value();
        assert!(value > 0.0);
        assert!(value < first);
    }

    #[test]
    fn long_pauses_are_capped() {
        let mut capped = Spring::new(0.0, SpringConfig::new(120.0, 14.0));
        capped.set_target(1.0);
        capped.advance(Duration::from_secs(60));

        let expected = capped.frames().next();
        let mut reference = Spring::new(0.0, SpringConfig::new(120.0, 14.0));
        reference.set_target(1.0);
        reference.advance(FRAME * MAX_CATCH_UP_FRAMES);

        assert!(!capped.is_at_rest());
        assert_eq!(expected, reference.frames().next());
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut spring = Spring::new(0.0, SpringConfig::new(180.0, 12.0));
        spring.set_target(1.0);
        spring.advance(FRAME * 5);

        let velocity = spring.velocity;
        spring.set_target(0.0);

        assert!(velocity > 0.0);
        assert!((spring.velocity - velocity).abs() < f32::EPSILON);
    }

    #[test]
    fn advancing_to_rest_snaps_to_target() {
        let mut spring = Spring::new(80.0, SpringConfig::new(210.0, 20.0));
        spring.set_target(160.0);

        for _ in 0..600 {
            spring.advance(FRAME);
        }

        assert!(spring.is_at_rest());
        assert!((spring.value() - 160.0).abs() < f32::EPSILON);
    }
}
