// Character locomotion - ALL CHARACTERS SHARE THE SAME TUNING
// Speed comes from holding sprint, not from per-character stats

use crate::engine::input::InputSnapshot;
use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// Movement tuning, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStats {
    /// Velocity gained per second while a direction is held
    /// (z drives forward speed, y scales turning)
    pub acceleration: Vec3,
    /// Fraction of the current velocity removed per second (negative)
    pub deceleration: Vec3,
    /// Acceleration multiplier while sprinting
    pub sprint_multiplier: f32,
    /// Radians per second of turning, before scaling by `acceleration.y`
    pub turn_rate: f32,
}

/// The ONE movement tuning used by the character
pub const BASE_MOVEMENT: MovementStats = MovementStats {
    acceleration: Vec3::new(1.0, 0.25, 50.0),
    deceleration: Vec3::new(-0.0005, -0.0001, -5.0),
    sprint_multiplier: 2.0,
    turn_rate: 4.0 * PI,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_MOVEMENT
    }
}

/// Position, facing and velocity of the character in the XZ plane
///
/// Velocity is local: `z` is along the facing direction, `x` is sideways.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterMotion {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub stats: MovementStats,
}

impl Default for CharacterMotion {
    fn default() -> Self {
        Self::new(BASE_MOVEMENT)
    }
}

impl CharacterMotion {
    pub fn new(stats: MovementStats) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            stats,
        }
    }

    /// Unit vector the character is facing
    pub fn heading(&self) -> Vec3 {
        (self.rotation * Vec3::Z).normalize()
    }

    /// Current forward speed (negative when backing up)
    pub fn speed(&self) -> f32 {
        self.velocity.z
    }

    /// Integrate one step of movement
    ///
    /// While `attacking`, the character cannot accelerate but can still turn
    /// and coasts to a stop.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, attacking: bool) {
        let stats = self.stats;

        // Drag never reverses direction
        let mut drag = self.velocity * stats.deceleration * dt;
        drag.z = drag.z.signum() * drag.z.abs().min(self.velocity.z.abs());
        self.velocity += drag;

        let mut acceleration = stats.acceleration;
        if input.sprint {
            acceleration *= stats.sprint_multiplier;
        }
        if attacking {
            acceleration = Vec3::ZERO;
        }

        if input.forward {
            self.velocity.z += acceleration.z * dt;
        }
        if input.backward {
            self.velocity.z -= acceleration.z * dt;
        }

        // Turning ignores sprint and attack
        let turn = stats.turn_rate * stats.acceleration.y * dt;
        if input.left {
            self.rotation *= Quat::from_axis_angle(Vec3::Y, turn);
        }
        if input.right {
            self.rotation *= Quat::from_axis_angle(Vec3::Y, -turn);
        }
        self.rotation = self.rotation.normalize();

        let forward = self.heading() * self.velocity.z * dt;
        let sideways = (self.rotation * Vec3::X).normalize() * self.velocity.x * dt;
        self.position += forward + sideways;
    }
}
