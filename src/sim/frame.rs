//! Per-frame driver
//!
//! Called once per display frame by the host with the elapsed time since the
//! show started. Paints one frame and advances every live entity by one step.

use super::launch::SlotAction;
use super::state::Show;
use crate::audio::ToneGenerator;
use crate::consts::*;
use crate::renderer::{Color, Surface};

/// Summary of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Explosions triggered this frame
    pub bursts: usize,
    /// Particles still live after culling
    pub particles: usize,
    /// Flashes still live after culling
    pub flashes: usize,
}

/// Render and advance the show by one frame
pub fn frame<S, T>(show: &mut Show, elapsed_ms: f64, surface: &mut S, tone: &mut T) -> FrameReport
where
    S: Surface + ?Sized,
    T: ToneGenerator + ?Sized,
{
    let viewport = show.viewport();
    let mut report = FrameReport::default();

    // Translucent veil instead of a clear leaves fading trails
    surface.set_fill_color(Color::BLACK.with_alpha(TRAIL_FADE_ALPHA));
    surface.fill_rect(
        0.0,
        0.0,
        viewport.width() as f32,
        viewport.height() as f32,
    );

    let slot_count = show.slots.len();
    for i in 0..slot_count {
        let action = show.slots[i].advance(elapsed_ms, &viewport, slot_count, show.trigger);
        match action {
            SlotAction::None => {}
            SlotAction::Rocket(pos) => {
                surface.set_fill_color(Color::WHITE);
                surface.fill_circle(pos, ROCKET_RADIUS);
            }
            SlotAction::Burst(pos) => {
                show.explode(pos, i, tone);
                report.bursts += 1;
            }
        }
    }

    show.particles.retain_mut(|p| {
        if !p.is_alive() {
            return false;
        }
        p.update();
        if !p.is_alive() {
            return false;
        }
        p.draw(surface);
        true
    });

    show.flashes.retain_mut(|f| f.step(surface));

    report.particles = show.particles.len();
    report.flashes = show.flashes.len();
    report
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::audio::{OfflineTone, SilentTone};
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::settings::TriggerMode;
    use crate::sim::flash::Flash;
    use crate::sim::particle::Particle;
    use crate::viewport::Viewport;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn show(trigger: TriggerMode) -> Show {
        Show::new(2026, Viewport::new(1000, 800), trigger)
    }

    /// Particle circles drawn (rockets use a smaller radius)
    fn sparks(surface: &RecordingSurface) -> usize {
        surface
            .circles()
            .filter(|(_, radius, _)| *radius == PARTICLE_RADIUS)
            .count()
    }

    #[test]
    fn test_frame_starts_with_trail_veil() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        frame(&mut s, 0.0, &mut surface, &mut SilentTone);

        match &surface.commands()[0] {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                state,
            } => {
                assert_eq!((*x, *y, *width, *height), (0.0, 0.0, 1000.0, 800.0));
                assert_eq!(state.fill, Color::BLACK.with_alpha(0.2));
                assert_eq!(state.alpha, 1.0);
            }
            other => panic!("expected veil rect, got {:?}", other),
        }
    }

    #[test]
    fn test_only_slot_zero_rocket_at_start() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        let report = frame(&mut s, 0.0, &mut surface, &mut SilentTone);

        assert_eq!(report, FrameReport::default());
        let rockets: Vec<_> = surface.circles().collect();
        assert_eq!(rockets.len(), 1);
        let (center, radius, state) = rockets[0];
        assert_eq!(*center, Vec2::new(200.0, 800.0));
        assert_eq!(radius, 2.0);
        assert_eq!(state.fill, Color::WHITE);
    }

    #[test]
    fn test_burst_at_800ms() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        let mut tone = OfflineTone::new(8_000, 1.0);
        let report = frame(&mut s, 800.0, &mut surface, &mut tone);

        assert_eq!(report.bursts, 1);
        assert_eq!(report.particles, 80);
        assert_eq!(report.flashes, 1);
        assert_eq!(tone.plays(), 1);

        let apex = Vec2::new(200.0, 800.0 * 0.35);
        let flash = &s.flashes[0];
        assert_eq!(flash.pos, apex);
        assert_eq!(flash.glyph, '2');
        assert_eq!(flash.color, PALETTE[0]);

        // New particles are stepped and drawn in the frame they spawn
        assert!(s.particles.iter().all(|p| (p.alpha - 0.985).abs() < 1e-6));
        assert_eq!(sparks(&surface), 80);
        let (text, pos, _) = surface.texts().next().unwrap();
        assert_eq!(text, "2");
        assert_eq!(*pos, apex);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_faded_particles_removed_next_frame() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        for alpha in [0.015, 0.01, 0.0, -0.5] {
            let mut p = Particle::with_velocity(Vec2::new(1.0, 1.0), Vec2::ONE, PALETTE[0]);
            p.alpha = alpha;
            s.particles.push(p);
        }
        let mut survivor = Particle::with_velocity(Vec2::new(1.0, 1.0), Vec2::ONE, PALETTE[1]);
        survivor.alpha = 0.5;
        s.particles.push(survivor);

        // 1.0s: no slot is in its trigger window
        let report = frame(&mut s, 1000.0, &mut surface, &mut SilentTone);
        assert_eq!(report.particles, 1);
        assert_eq!(s.particles[0].color, PALETTE[1]);
        // Removed particles are never drawn
        assert_eq!(sparks(&surface), 1);
    }

    #[test]
    fn test_removal_keeps_order_and_skips_nothing() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        for i in 0..6 {
            let mut p = Particle::with_velocity(Vec2::new(i as f32, 0.0), Vec2::ZERO, PALETTE[0]);
            // Every other particle is already dead
            p.alpha = if i % 2 == 0 { 0.0 } else { 1.0 };
            s.particles.push(p);
        }
        frame(&mut s, 1000.0, &mut surface, &mut SilentTone);

        let xs: Vec<f32> = s.particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, [1.0, 3.0, 5.0]);
        assert!(s.particles.iter().all(|p| (p.alpha - 0.985).abs() < 1e-6));
    }

    #[test]
    fn test_flash_removed_when_faded() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        let mut f = Flash::new(Vec2::ZERO, '6', PALETTE[3]);
        f.alpha = 0.01;
        s.flashes.push(f);

        let report = frame(&mut s, 1000.0, &mut surface, &mut SilentTone);
        assert_eq!(report.flashes, 0);
        // Drawn one last time before removal
        assert_eq!(surface.texts().count(), 1);
    }

    #[test]
    fn test_burst_fades_out_completely() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        let mut tone = SilentTone;
        frame(&mut s, 800.0, &mut surface, &mut tone);
        assert_eq!(s.particles.len(), 80);

        // Between 0.83s and 1.5s no slot is in its trigger window
        let mut t = 840.0;
        let mut counts = Vec::new();
        while t < 1495.0 {
            counts.push(frame(&mut s, t, &mut surface, &mut tone).particles);
            t += 10.0;
        }
        assert!(counts.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*counts.last().unwrap(), 0);
        assert!(s.flashes.is_empty());
    }

    #[test]
    fn test_resize_moves_future_launches_only() {
        let mut s = show(TriggerMode::Window);
        let mut surface = RecordingSurface::new();
        let mut tone = SilentTone;
        frame(&mut s, 800.0, &mut surface, &mut tone);
        let flash_pos = s.flashes[0].pos;

        s.resize(500, 400);
        frame(&mut s, 820.0, &mut surface, &mut tone);
        // Old flash stays put; the repeat burst inside the window uses the new size
        assert_eq!(s.flashes[0].pos, flash_pos);
        assert_eq!(s.flashes[1].pos, Vec2::new(100.0, 400.0 * 0.35));
    }

    #[test]
    fn test_same_seed_reproduces_show() {
        let run = || {
            let mut s = show(TriggerMode::Window);
            let mut surface = RecordingSurface::new();
            let mut counts = Vec::new();
            for i in 0..600 {
                surface.clear();
                counts.push(frame(&mut s, i as f64 * FRAME_MS, &mut surface, &mut SilentTone).particles);
            }
            let positions: Vec<Vec2> = s.particles.iter().map(|p| p.pos).collect();
            (counts, positions)
        };

        let (counts_a, pos_a) = run();
        let (counts_b, pos_b) = run();
        assert_eq!(counts_a, counts_b);
        assert_eq!(pos_a, pos_b);
        assert!(counts_a.iter().any(|&c| c > 0));
    }

    #[test]
    fn test_crossing_mode_bursts_once_per_cycle_at_low_fps() {
        let mut s = show(TriggerMode::Crossing);
        let mut surface = RecordingSurface::new();
        let mut tone = OfflineTone::new(8_000, 1.0);

        // 4 fps for 10s: the 30ms window is mostly skipped, crossings are not
        let mut bursts = 0;
        for i in 0..40 {
            bursts += frame(&mut s, i as f64 * 250.0, &mut surface, &mut tone).bursts;
        }

        // Apex times up to 9.75s: slot i bursts at 0.8 + 0.7i + 2.5k
        let expected: usize = (0..4)
            .map(|i| {
                let first = 0.8 + 0.7 * i as f64;
                ((9.75 - first) / 2.5).floor() as usize + 1
            })
            .sum();
        assert_eq!(bursts, expected);
        assert_eq!(tone.plays(), expected);
    }
}
