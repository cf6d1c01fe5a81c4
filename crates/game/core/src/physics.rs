//! Planar rigid-body motion.
//!
//! [`Solid`] carries position, velocity, heading, angular velocity, mass and the
//! currently applied force. Integration is explicit: acceleration is derived
//! from `force / mass` and applied over the step.

use core::f64::consts::{PI, TAU};
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Two-dimensional vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector from a magnitude and an angle in radians.
    pub fn from_polar(modulus: f64, angle: f64) -> Self {
        Self::new(modulus * angle.cos(), modulus * angle.sin())
    }

    pub fn modulus(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector in radians, `0` for the zero vector.
    pub fn angle(self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).modulus()
    }

    /// Rescales the vector to the given magnitude, keeping its direction.
    pub fn with_modulus(self, modulus: f64) -> Self {
        Self::from_polar(modulus, self.angle())
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `reference` to `target`, in `(-π, π]`.
pub fn angle_diff(reference: f64, target: f64) -> f64 {
    let diff = (target - reference).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}

/// Physical body of a pilot or projectile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Force applied this step; reset by whoever steers the body.
    pub force: Vec2,
    /// Heading in radians, kept in `[0, 2π)`.
    pub dir: f64,
    /// Angular velocity in radians per second.
    pub dir_vel: f64,
    pub mass: f64,
}

impl Solid {
    pub fn new(mass: f64, dir: f64, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            force: Vec2::ZERO,
            dir: normalize_angle(dir),
            dir_vel: 0.0,
            mass,
        }
    }

    /// Integrates heading, velocity and position over `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.dir = normalize_angle(self.dir + self.dir_vel * dt);

        let accel = if self.mass > 0.0 {
            self.force * (1.0 / self.mass)
        } else {
            Vec2::ZERO
        };
        self.pos += self.vel * dt + accel * (0.5 * dt * dt);
        self.vel += accel * dt;
    }

    /// Clamps the speed to `max_speed`, keeping the direction of travel.
    pub fn limit_speed(&mut self, max_speed: f64) {
        if self.vel.modulus() > max_speed {
            self.vel = self.vel.with_modulus(max_speed.max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn angle_diff_takes_the_short_way_round() {
        assert!((angle_diff(0.0, PI / 2.0) - PI / 2.0).abs() < EPS);
        assert!((angle_diff(PI / 2.0, 0.0) + PI / 2.0).abs() < EPS);
        // 350° -> 10° is +20°, not -340°
        let diff = angle_diff(350f64.to_radians(), 10f64.to_radians());
        assert!((diff - 20f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn normalize_angle_wraps_negative_headings() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < EPS);
        assert!(normalize_angle(TAU).abs() < EPS);
    }

    #[test]
    fn update_applies_force_over_mass() {
        let mut solid = Solid::new(2.0, 0.0, Vec2::ZERO, Vec2::ZERO);
        solid.force = Vec2::new(4.0, 0.0);
        solid.update(1.0);
        assert!((solid.vel.x - 2.0).abs() < EPS);
        assert!((solid.pos.x - 1.0).abs() < EPS);
    }

    #[test]
    fn limit_speed_keeps_direction() {
        let mut solid = Solid::new(1.0, 0.0, Vec2::ZERO, Vec2::new(30.0, 40.0));
        solid.limit_speed(10.0);
        assert!((solid.vel.modulus() - 10.0).abs() < EPS);
        assert!((solid.vel.x - 6.0).abs() < EPS);
        assert!((solid.vel.y - 8.0).abs() < EPS);
    }
}
