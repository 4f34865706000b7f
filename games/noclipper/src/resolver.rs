//! Per-step game rules: pickups, hazards and the exit.

use hv_engine::Aabb;

use crate::level::LayerKind;
use crate::ports::CollisionQuery;
use crate::session::{ReloadPolicy, SessionState};

/// How the exit behaves at the end of the map list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRules {
    pub end_level: u32,
    pub hold_final_level: bool,
}

/// A level load the game loop must perform before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reload {
    pub level: u32,
    pub policy: ReloadPolicy,
}

/// What happened during one resolve pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub loot_collected: u32,
    pub keys_collected: u32,
    pub died: bool,
    pub reload: Option<Reload>,
}

impl Resolution {
    /// Whether any on-screen counter may have changed.
    pub fn counters_changed(&self) -> bool {
        self.loot_collected > 0 || self.keys_collected > 0 || self.died
    }
}

/// Apply pickups, hazards and the exit for a player occupying `player`.
///
/// Gold and keys are removed as they are collected, so each tile counts once.
/// A hazard ends the pass: the reload puts the player back at spawn, so the
/// exit is not checked in the same step.
pub fn resolve(
    world: &mut impl CollisionQuery,
    player: &Aabb,
    session: &mut SessionState,
    rules: ExitRules,
) -> Resolution {
    let mut out = Resolution::default();

    for id in world.overlapping(LayerKind::Gold, player) {
        world.remove(id);
        session.collect_loot();
        out.loot_collected += 1;
    }

    for id in world.overlapping(LayerKind::Key, player) {
        world.remove(id);
        session.collect_key();
        out.keys_collected += 1;
    }
    if out.loot_collected + out.keys_collected > 0 {
        log::debug!(
            "picked up {} loot, {} keys (loot {}, key {})",
            out.loot_collected,
            out.keys_collected,
            session.loot,
            session.key
        );
    }

    if !world.overlapping(LayerKind::Spike, player).is_empty() {
        session.record_death();
        out.died = true;
        out.reload = Some(Reload {
            level: session.level,
            policy: ReloadPolicy::AFTER_DEATH,
        });
        return out;
    }

    if !world.overlapping(LayerKind::Exit, player).is_empty() {
        let level = session.take_exit(rules.end_level, rules.hold_final_level);
        out.reload = Some(Reload {
            level,
            policy: ReloadPolicy::CONTINUE,
        });
    }

    out
}
