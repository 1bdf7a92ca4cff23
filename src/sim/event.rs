/// Events emitted during a simulation step.
/// The driver consumes these for logging.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Jumped { row: usize },
    PlayerFell { row: usize },
    PlayerPinned { row: usize },
    ObstacleSpawned { gap_center: usize },
    HitObstacle { row: usize },
    HitFloor,
}

impl GameEvent {
    /// Does this event end the run?
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameEvent::HitObstacle { .. } | GameEvent::HitFloor)
    }
}
