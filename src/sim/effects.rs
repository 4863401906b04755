//! Status effects, powerups, traps and contact damage
//!
//! Two independent guards protect the player:
//! - the shield absorbs one damaging event of any kind, then breaks
//! - the hazard-invulnerability timer only gates enemy contact damage
//!
//! Trap damage ignores the invulnerability timer entirely.

use super::level::{PowerupKind, TrapKind};
use super::state::{GameEvent, GameState, Player};
use crate::consts::*;

/// What happened to a damaging event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Nothing to apply
    None,
    /// The shield ate it
    Absorbed,
    /// Health went down by this much
    Taken(f32),
}

#[inline]
fn count_down(timer: &mut f32, dt: f32) {
    *timer = (*timer - dt).max(0.0);
}

/// Apply one damaging event, letting an active shield absorb it
pub fn apply_damage(player: &mut Player, amount: f32) -> DamageOutcome {
    if amount.is_nan() || amount <= 0.0 {
        return DamageOutcome::None;
    }
    if player.shield_timer > 0.0 {
        player.shield_timer = 0.0;
        player.hazard_invuln_timer = player.hazard_invuln_timer.max(SHIELD_BREAK_INVULN);
        return DamageOutcome::Absorbed;
    }
    let before = player.health;
    player.health = (player.health - amount).max(0.0);
    DamageOutcome::Taken(before - player.health)
}

fn report(state: &mut GameState, outcome: DamageOutcome, burst: bool) {
    match outcome {
        DamageOutcome::Absorbed => {
            log::debug!("Shield absorbed a hit");
            state.emit(GameEvent::ShieldAbsorbed);
        }
        DamageOutcome::Taken(amount) if burst => state.emit(GameEvent::PlayerHurt { amount }),
        _ => {}
    }
}

/// Count down the linear timers (speed, shield, invulnerability, fire cooldown)
pub fn tick_timers(player: &mut Player, dt: f32) {
    count_down(&mut player.speed_boost_timer, dt);
    count_down(&mut player.shield_timer, dt);
    count_down(&mut player.hazard_invuln_timer, dt);
    count_down(&mut player.fire_cooldown, dt);
}

/// Pick up every powerup touching the player
pub fn collect_powerups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();
    state.level.powerups.retain(|powerup| {
        if powerup.circle().overlaps_rect(&player_rect) {
            collected.push(powerup.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        let player = &mut state.player;
        match kind {
            PowerupKind::Speed => player.speed_boost_timer = SPEED_BOOST_DURATION,
            PowerupKind::Shield => player.shield_timer = SHIELD_DURATION,
            PowerupKind::Dash => player.dash_charges += 1,
            PowerupKind::Health => {
                player.health = (player.health + HEALTH_POWERUP_AMOUNT).min(player.max_health)
            }
        }
        log::debug!("Collected {:?} powerup", kind);
        state.score += SCORE_POWERUP;
        state.emit(GameEvent::PowerupCollected { kind });
    }
}

/// Apply trap zones under the player's center, then tick poison
pub fn apply_traps(state: &mut GameState, dt: f32) {
    let center = state.player.center();
    state.player.slow_factor = 1.0;
    state.player.on_fire = false;

    let touching: Vec<(TrapKind, f32)> = state
        .level
        .traps
        .iter()
        .filter(|trap| trap.rect.contains_point(center))
        .map(|trap| (trap.kind, trap.damage()))
        .collect();

    for (kind, damage) in touching {
        match kind {
            TrapKind::Glue => state.player.slow_factor = GLUE_SLOW_FACTOR,
            TrapKind::Fire => {
                state.player.on_fire = true;
                let outcome = apply_damage(&mut state.player, damage * dt);
                report(state, outcome, false);
            }
            TrapKind::Poison => {
                state.player.poison_timer = POISON_DURATION;
                state.player.poison_dps = damage;
            }
            TrapKind::Spike => {
                let outcome = apply_damage(&mut state.player, damage);
                report(state, outcome, true);
            }
        }
    }

    if state.player.poison_timer > 0.0 {
        let dps = state.player.poison_dps;
        let outcome = apply_damage(&mut state.player, dps * dt);
        report(state, outcome, false);
        count_down(&mut state.player.poison_timer, dt);
    }
}

/// Damage from touching enemies, gated by hazard invulnerability
pub fn enemy_contact(state: &mut GameState) {
    if state.player.hazard_invuln_timer > 0.0 {
        return;
    }
    let player_rect = state.player.rect();
    let touching = state
        .level
        .enemies
        .iter()
        .any(|enemy| enemy.rect().overlaps(&player_rect));
    if !touching {
        return;
    }

    let outcome = apply_damage(&mut state.player, ENEMY_CONTACT_DAMAGE);
    if let DamageOutcome::Taken(_) = outcome {
        state.player.hazard_invuln_timer = ENEMY_HIT_INVULN;
    }
    report(state, outcome, true);
}
