// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Spring easing for the sticker overlay.
//!
//! Values are polled each frame: call `tick(dt)` and then render with
//! `get()`.

/// Spring parameters. The defaults match a mass of 1 with stiffness 100
/// and damping 10, a soft spring with a little overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
        }
    }
}

/// An f32 that follows its target with spring physics.
#[derive(Debug, Clone)]
pub struct Spring {
    current: f32,
    target: f32,
    velocity: f32,
    config: SpringConfig,
}

impl Spring {
    const MAX_STEP: f32 = 1.0 / 120.0;

    pub fn new(initial: f32) -> Self {
        Self::with_config(initial, SpringConfig::default())
    }

    pub fn with_config(initial: f32, config: SpringConfig) -> Self {
        Self {
            current: initial,
            target: initial,
            velocity: 0.0,
            config,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance by `dt` seconds.
    ///
    /// Large frame gaps are split into fixed sub-steps so the integration
    /// stays stable.
    pub fn tick(&mut self, dt: f32) {
        let mut remaining = dt.clamp(0.0, 0.25);
        while remaining > 0.0 {
            let step = remaining.min(Self::MAX_STEP);
            let displacement = self.current - self.target;
            let acceleration =
                -self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += acceleration * step;
            self.current += self.velocity * step;
            remaining -= step;
        }

        // Snap to target if close enough
        if (self.current - self.target).abs() < 0.01 && self.velocity.abs() < 0.01 {
            self.current = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn get(&self) -> f32 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.current != self.target || self.velocity != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(40.0);
        spring.set_target(80.0);
        assert!(spring.is_animating());
        for _ in 0..600 {
            spring.tick(1.0 / 60.0);
        }
        assert_eq!(spring.get(), 80.0);
        assert!(!spring.is_animating());
    }

    #[test]
    fn test_spring_moves_toward_target() {
        let mut spring = Spring::new(0.0);
        spring.set_target(10.0);
        spring.tick(1.0 / 60.0);
        assert!(spring.get() > 0.0 && spring.get() < 10.0);
    }

    #[test]
    fn test_spring_at_rest_does_not_move() {
        let mut spring = Spring::new(3.0);
        spring.tick(0.05);
        assert_eq!(spring.get(), 3.0);
        assert!(!spring.is_animating());
    }
}
