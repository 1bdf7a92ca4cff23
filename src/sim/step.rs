/// The step function: advances the world by one tick.
///
/// Processing order:
///   0. Score (every tick counts, including the losing one)
///   1. Lookahead check before the scroll (a jump may have moved the
///      player into the row of an obstacle about to be entered)
///   2. Scroll the grid one column left
///   3. Gravity (may crash into the floor)
///   4. Append the next column from the obstacle cadence
///   5. Lookahead check against the freshly scrolled grid
///
/// Jumps are not part of the step: the driver applies them through
/// `jump()` as it drains input signals, before calling `step()`.

use crate::domain::physics::{self, GravityOutcome};
use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState) -> Vec<GameEvent> {
    if world.phase != Phase::Running { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    world.score += 1;

    if resolve_collision(world, &mut events) { return events; }
    world.scene.shift_left();
    if resolve_gravity(world, &mut events) { return events; }
    resolve_spawn(world, &mut events);
    resolve_collision(world, &mut events);

    events
}

/// Apply a jump command: one row up, floored at the top.
pub fn jump(world: &mut WorldState) -> Option<GameEvent> {
    if world.phase != Phase::Running { return None; }
    physics::apply_jump(&mut world.player);
    Some(GameEvent::Jumped { row: world.player.row })
}

// ══════════════════════════════════════════════════════════════
// Resolution stages
// ══════════════════════════════════════════════════════════════

fn resolve_gravity(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let outcome = physics::gravity_tick(
        &mut world.player,
        world.rules.gravity_threshold,
        world.scene.height(),
    );
    match outcome {
        GravityOutcome::Accumulating => false,
        GravityOutcome::Fell => {
            events.push(GameEvent::PlayerFell { row: world.player.row });
            false
        }
        GravityOutcome::Pinned => {
            events.push(GameEvent::PlayerPinned { row: world.player.row });
            false
        }
        GravityOutcome::Crashed => {
            events.push(GameEvent::HitFloor);
            world.phase = Phase::Lost;
            true
        }
    }
}

fn resolve_spawn(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let kind = world.cadence.advance();
    if let Some(gap_center) = world.scene.append_column(kind, &mut world.rng) {
        events.push(GameEvent::ObstacleSpawned { gap_center });
    }
}

fn resolve_collision(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let row = world.player.row;
    if physics::check_obstacle_collision(world.scene.cells(), row) {
        events.push(GameEvent::HitObstacle { row });
        world.phase = Phase::Lost;
        return true;
    }
    false
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::sim::world::Rules;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> WorldState {
        WorldState::new(Rules::default(), "🐔", StdRng::seed_from_u64(11))
    }

    fn run(world: &mut WorldState, ticks: usize) -> Vec<GameEvent> {
        (0..ticks).flat_map(|_| step(world)).collect()
    }

    #[test]
    fn four_ticks_without_input_drop_one_row() {
        let mut w = world();
        assert_eq!(w.player.row, 5);
        run(&mut w, 3);
        assert_eq!(w.player.row, 5);
        let events = step(&mut w);
        assert_eq!(w.player.row, 6);
        assert!(events.contains(&GameEvent::PlayerFell { row: 6 }));
    }

    #[test]
    fn obstacle_in_lookahead_loses_in_one_tick() {
        let mut w = world();
        w.scene.set(w.player.row, 1, Cell::Obstacle);
        let events = step(&mut w);
        assert!(w.is_lost());
        assert_eq!(events, vec![GameEvent::HitObstacle { row: 5 }]);
    }

    #[test]
    fn obstacle_scrolling_into_lookahead_loses() {
        let mut w = world();
        w.scene.set(w.player.row, 2, Cell::Obstacle);
        step(&mut w);
        assert!(w.is_lost());
    }

    #[test]
    fn obstacle_in_other_row_is_harmless() {
        let mut w = world();
        w.scene.set(0, 1, Cell::Obstacle);
        w.scene.set(0, 2, Cell::Obstacle);
        step(&mut w);
        assert!(!w.is_lost());
    }

    #[test]
    fn pinned_at_floor_for_two_gravity_events_loses() {
        let mut w = world();
        w.player.row = 9;
        let events = run(&mut w, 4);
        assert!(events.contains(&GameEvent::PlayerPinned { row: 9 }));
        assert!(!w.is_lost());
        let events = run(&mut w, 4);
        assert_eq!(events.last(), Some(&GameEvent::HitFloor));
        assert!(w.is_lost());
    }

    #[test]
    fn free_fall_from_spawn_ends_on_the_floor() {
        let mut w = world();
        // 4 rows down (16 ticks), then two pinned events (8 ticks)
        let events = run(&mut w, 24);
        assert!(w.is_lost());
        assert!(events.iter().filter(|e| e.is_fatal()).count() == 1);
        assert_eq!(w.score, 24);
    }

    #[test]
    fn one_obstacle_spawned_per_spacing_window() {
        let mut w = world();
        w.player.row = 0;
        let mut spawned = 0;
        for _ in 0..17 * 3 {
            // Keep the player hovering near the top
            if w.player.gravity == 3 { jump(&mut w); }
            spawned += step(&mut w)
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
                .count();
        }
        assert_eq!(spawned, 3);
        assert!(w.scene.cells().iter().any(|r| r[59] == Cell::Obstacle));
    }

    #[test]
    fn jump_is_ignored_after_loss() {
        let mut w = world();
        w.phase = Phase::Lost;
        assert_eq!(jump(&mut w), None);
        assert_eq!(w.player.row, 5);
        assert!(step(&mut w).is_empty());
        assert_eq!(w.score, 0);
    }

    #[test]
    fn jump_into_obstacle_row_is_caught_before_scroll() {
        let mut w = world();
        // Obstacle one row above, already in the lookahead column
        w.scene.set(4, 1, Cell::Obstacle);
        assert!(!physics::check_obstacle_collision(w.scene.cells(), w.player.row));
        jump(&mut w);
        step(&mut w);
        assert!(w.is_lost());
    }

    #[test]
    fn score_bumps_every_tick() {
        let mut w = world();
        run(&mut w, 10);
        assert_eq!(w.score, 10);
        assert_eq!(w.displayed_score(), 0);
    }
}
