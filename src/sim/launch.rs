//! Launch scheduling
//!
//! Each slot runs the same repeating cycle, offset in time by its index:
//! ascend for `ASCEND_DURATION` seconds, burst, then settle until the cycle
//! restarts. Everything here is a pure function of elapsed time, except the
//! previous-frame memory used by [`TriggerMode::Crossing`].

use glam::Vec2;

use crate::consts::*;
use crate::settings::TriggerMode;
use crate::viewport::Viewport;
use crate::wrap_cycle;

/// Where a slot is within its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Before the slot's first launch
    Idle,
    /// Rocket climbing toward the apex
    Ascending,
    /// Inside the burst trigger window
    Exploding,
    /// Burst consumed; waiting for the next cycle
    Settling,
}

impl SlotPhase {
    /// Classify a (non-negative) cycle time
    pub fn of(cycle: f64) -> Self {
        if cycle < ASCEND_DURATION {
            SlotPhase::Ascending
        } else if cycle < EXPLODE_WINDOW_END {
            SlotPhase::Exploding
        } else {
            SlotPhase::Settling
        }
    }
}

/// Seconds since `slot`'s schedule started (negative before its first launch)
#[inline]
pub fn local_time(elapsed_ms: f64, slot: usize) -> f64 {
    elapsed_ms / 1000.0 - slot as f64 * SLOT_OFFSET
}

/// Position within the current cycle, or `None` while the slot is idle
pub fn cycle_at(elapsed_ms: f64, slot: usize) -> Option<f64> {
    let t = local_time(elapsed_ms, slot);
    if t < 0.0 {
        None
    } else {
        Some(wrap_cycle(t, CYCLE_DURATION))
    }
}

/// Rocket position while ascending: bottom edge at cycle 0, apex at
/// `ASCEND_DURATION`
pub fn rocket_position(viewport: &Viewport, slot: usize, slot_count: usize, cycle: f64) -> Vec2 {
    let progress = (cycle / ASCEND_DURATION) as f32;
    let floor = viewport.floor_y();
    let apex = viewport.apex_y();
    Vec2::new(
        viewport.slot_x(slot, slot_count),
        floor - progress * (floor - apex),
    )
}

/// Where `slot`'s rocket bursts
pub fn burst_position(viewport: &Viewport, slot: usize, slot_count: usize) -> Vec2 {
    Vec2::new(viewport.slot_x(slot, slot_count), viewport.apex_y())
}

/// What a slot wants done this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotAction {
    None,
    /// Draw the rising rocket here
    Rocket(Vec2),
    /// Explode here
    Burst(Vec2),
}

/// Per-slot scheduler
#[derive(Debug, Clone)]
pub struct Slot {
    pub index: usize,
    /// Unwrapped local time seen on the previous frame (crossing mode only)
    prev_local: Option<f64>,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            prev_local: None,
        }
    }

    pub fn phase(&self, elapsed_ms: f64) -> SlotPhase {
        match cycle_at(elapsed_ms, self.index) {
            None => SlotPhase::Idle,
            Some(cycle) => SlotPhase::of(cycle),
        }
    }

    /// Advance to `elapsed_ms` and report this frame's action
    pub fn advance(
        &mut self,
        elapsed_ms: f64,
        viewport: &Viewport,
        slot_count: usize,
        mode: TriggerMode,
    ) -> SlotAction {
        let local = local_time(elapsed_ms, self.index);
        let prev_local = self.prev_local.replace(local);
        let Some(cycle) = cycle_at(elapsed_ms, self.index) else {
            return SlotAction::None;
        };

        let fire = match mode {
            TriggerMode::Window => SlotPhase::of(cycle) == SlotPhase::Exploding,
            TriggerMode::Crossing => match prev_local {
                Some(prev) => crossed_apex(prev, local),
                None => SlotPhase::of(cycle) == SlotPhase::Exploding,
            },
        };

        if fire {
            SlotAction::Burst(burst_position(viewport, self.index, slot_count))
        } else if SlotPhase::of(cycle) == SlotPhase::Ascending {
            SlotAction::Rocket(rocket_position(viewport, self.index, slot_count, cycle))
        } else {
            SlotAction::None
        }
    }
}

/// Index of the last apex at or before local time `t` (negative before the first)
#[inline]
fn apex_index(t: f64) -> f64 {
    ((t - ASCEND_DURATION) / CYCLE_DURATION).floor()
}

/// Whether any apex `ASCEND_DURATION + k * CYCLE_DURATION` lies in
/// `(prev, local]`. Several skipped apexes still count as one.
fn crossed_apex(prev: f64, local: f64) -> bool {
    apex_index(local) > apex_index(prev)
}
