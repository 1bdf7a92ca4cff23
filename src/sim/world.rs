/// WorldState: the complete snapshot of a running game.
///
/// Owned by the game-loop thread once play starts. The input thread never
/// touches it directly; jumps arrive as signals drained at the start of
/// each tick.

use std::time::Duration;

use rand::rngs::StdRng;

use crate::config::GridConfig;
use crate::domain::entity::Player;
use super::scene::{ObstacleCadence, Scene};

/// Ticks between obstacle columns.
pub const OBSTACLE_SPACING: u32 = 17;
/// Ticks between automatic one-row descents.
pub const GRAVITY_THRESHOLD: u32 = 4;
/// Fixed interval between ticks.
pub const TICK_RATE: Duration = Duration::from_millis(200);

/// Fixed game rules for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    pub spacing: u32,
    pub gravity_threshold: u32,
    pub tick_rate: Duration,
}

impl Rules {
    pub fn from_grid(grid: &GridConfig) -> Self {
        Rules {
            width: grid.width,
            height: grid.height,
            ..Rules::default()
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            width: 60,
            height: 10,
            spacing: OBSTACLE_SPACING,
            gravity_threshold: GRAVITY_THRESHOLD,
            tick_rate: TICK_RATE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Lost,
}

pub struct WorldState {
    pub rules: Rules,
    pub scene: Scene,
    pub player: Player,
    pub cadence: ObstacleCadence,
    /// Ticks survived. Bumped once per tick.
    pub score: u64,
    pub phase: Phase,
    pub rng: StdRng,
}

impl WorldState {
    pub fn new(rules: Rules, glyph: &'static str, rng: StdRng) -> Self {
        WorldState {
            scene: Scene::new(rules.width, rules.height),
            player: Player::new(rules.height, glyph),
            cadence: ObstacleCadence::new(rules.spacing),
            score: 0,
            phase: Phase::Running,
            rules,
            rng,
        }
    }

    /// Back to a fresh run with the same rules and character.
    #[allow(dead_code)]
    pub fn restart(&mut self) {
        self.scene.initialize();
        self.player = Player::new(self.rules.height, self.player.glyph);
        self.cadence.reset();
        self.score = 0;
        self.phase = Phase::Running;
    }

    pub fn is_lost(&self) -> bool {
        self.phase == Phase::Lost
    }

    /// Obstacles passed. The first `width` ticks only scroll the initial
    /// empty buffer past the player, so they do not count.
    pub fn displayed_score(&self) -> u64 {
        self.score.saturating_sub(self.rules.width as u64) / u64::from(self.rules.spacing)
    }
}
