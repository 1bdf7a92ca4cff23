/// Vertical motion and collision queries.
///
/// ## Gravity
///
/// Gravity is discrete: every tick bumps the player's accumulator, and when
/// it reaches the threshold the player drops one row and the accumulator
/// resets. At the bottom row the player cannot drop further; instead the
/// row is remembered in `floor_mark`, and a later pinned event at the same
/// row crashes the run. The mark is never cleared, so touching the floor
/// once, jumping away and coming back crashes on the first pinned event.
///
/// ## Collision
///
/// The player is drawn at column 0 but collisions are tested one column
/// ahead (the lookahead column), which is the first real upcoming cell.

use super::cell::Cell;
use super::entity::Player;

/// Column tested for obstacles, one step ahead of the player.
pub const LOOKAHEAD_COL: usize = 1;

/// Result of one gravity tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GravityOutcome {
    /// Threshold not reached yet.
    Accumulating,
    /// Dropped one row.
    Fell,
    /// At the bottom row; position recorded for the next event.
    Pinned,
    /// Pinned at the same bottom row twice: the run is lost.
    Crashed,
}

/// Advance gravity by one tick for a grid `height` rows tall.
pub fn gravity_tick(player: &mut Player, threshold: u32, height: usize) -> GravityOutcome {
    player.gravity += 1;
    if player.gravity < threshold {
        return GravityOutcome::Accumulating;
    }
    player.gravity = 0;

    let bottom = height.saturating_sub(1);
    if player.row < bottom {
        player.row += 1;
        return GravityOutcome::Fell;
    }

    player.row = bottom;
    if player.floor_mark == Some(bottom) {
        GravityOutcome::Crashed
    } else {
        player.floor_mark = Some(bottom);
        GravityOutcome::Pinned
    }
}

/// Move up one row, floored at the top of the grid.
pub fn apply_jump(player: &mut Player) {
    player.row = player.row.saturating_sub(1);
}

/// Is there an obstacle in the lookahead column of the player's row?
pub fn check_obstacle_collision(cells: &[Vec<Cell>], row: usize) -> bool {
    cells
        .get(row)
        .and_then(|r| r.get(LOOKAHEAD_COL))
        .is_some_and(|c| c.is_solid())
}
