//! Burst particles

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::renderer::{Color, Surface};

/// A glowing spark thrown out by an explosion
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1.0 at spawn, dead at <= 0
    pub alpha: f32,
    /// Per-update velocity multiplier
    pub friction: f32,
}

impl Particle {
    /// Spawn at `pos` with a random velocity, each axis uniform in
    /// `[-PARTICLE_SPEED, PARTICLE_SPEED)`
    pub fn new<R: Rng>(pos: Vec2, color: Color, rng: &mut R) -> Self {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
            rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
        );
        Self::with_velocity(pos, vel, color)
    }

    pub fn with_velocity(pos: Vec2, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            vel,
            color,
            alpha: 1.0,
            friction: PARTICLE_FRICTION,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Damp, move, fade
    pub fn update(&mut self) {
        self.vel *= self.friction;
        self.pos += self.vel;
        self.alpha -= FADE_STEP;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.set_global_alpha(self.alpha);
        surface.set_fill_color(self.color);
        surface.set_shadow(PARTICLE_GLOW, self.color);
        surface.fill_circle(self.pos, PARTICLE_RADIUS);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_velocity_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::new(Vec2::ZERO, PALETTE[0], &mut rng);
            assert!(p.vel.x >= -PARTICLE_SPEED && p.vel.x < PARTICLE_SPEED);
            assert!(p.vel.y >= -PARTICLE_SPEED && p.vel.y < PARTICLE_SPEED);
            assert_eq!(p.alpha, 1.0);
            assert_eq!(p.friction, 0.95);
        }
    }

    #[test]
    fn test_same_seed_same_velocities() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..10 {
            let pa = Particle::new(Vec2::ZERO, PALETTE[1], &mut a);
            let pb = Particle::new(Vec2::ZERO, PALETTE[1], &mut b);
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_update_moves_by_damped_velocity() {
        let mut p = Particle::with_velocity(Vec2::new(10.0, 10.0), Vec2::new(2.0, -4.0), PALETTE[2]);
        p.update();
        assert!((p.vel - Vec2::new(1.9, -3.8)).length() < 1e-6);
        assert!((p.pos - Vec2::new(11.9, 6.2)).length() < 1e-5);
        assert!((p.alpha - 0.985).abs() < 1e-6);
    }

    #[test]
    fn test_lifetime_is_about_67_updates() {
        let mut p = Particle::with_velocity(Vec2::ZERO, Vec2::ONE, PALETTE[0]);
        let mut updates = 0;
        while p.is_alive() {
            p.update();
            updates += 1;
        }
        assert!((66..=68).contains(&updates), "lived {} updates", updates);
    }

    #[test]
    fn test_draw_is_isolated_by_save_restore() {
        let mut s = RecordingSurface::new();
        let mut p = Particle::with_velocity(Vec2::new(5.0, 6.0), Vec2::ZERO, PALETTE[3]);
        p.alpha = 0.4;
        p.draw(&mut s);

        assert_eq!(s.save_depth(), 0);
        assert_eq!(s.state().alpha, 1.0);
        let (center, radius, state) = s.circles().next().unwrap();
        assert_eq!(*center, Vec2::new(5.0, 6.0));
        assert_eq!(radius, 2.5);
        assert_eq!(state.alpha, 0.4);
        assert_eq!(state.fill, PALETTE[3]);
        assert_eq!(state.shadow_blur, 15.0);
        assert_eq!(state.shadow_color, PALETTE[3]);
    }

    proptest::proptest! {
        #[test]
        fn prop_update_decays_alpha_and_speed(
            vx in -7.5f32..7.5,
            vy in -7.5f32..7.5,
            alpha in 0.001f32..1.0,
        ) {
            let mut p = Particle::with_velocity(Vec2::new(100.0, 100.0), Vec2::new(vx, vy), PALETTE[0]);
            p.alpha = alpha;
            let speed_old = p.speed();

            p.update();

            proptest::prop_assert_eq!(p.alpha, alpha - 0.015);
            proptest::prop_assert!((p.speed() - speed_old * 0.95).abs() <= 1e-5 * speed_old.max(1.0));
        }
    }
}
