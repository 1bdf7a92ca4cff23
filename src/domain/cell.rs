/// Cell types of the scene grid.
/// Logic compares cells by variant; the glyph a cell is drawn with lives
/// in the renderer's palette, so cosmetic changes never affect collisions.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Background, // Open sky the player can fly through
    Obstacle,   // Pipe segment: entering it ends the run
    Player,     // Stamped at column 0 right before rendering
    Sky,        // Decorative strip above the grid
    Floor,      // Decorative strip below the grid
}

impl Cell {
    /// Does flying into this cell end the run?
    pub fn is_solid(self) -> bool {
        matches!(self, Cell::Obstacle)
    }

    /// Can the player occupy this cell?
    #[allow(dead_code)]
    pub fn is_passable(self) -> bool {
        !self.is_solid()
    }
}
