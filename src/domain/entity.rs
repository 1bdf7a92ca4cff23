/// Entities: the player and the preset characters it can be drawn as.

/// A selectable character from the character menu.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Character {
    pub name: &'static str,
    pub glyph: &'static str,
}

/// The five presets offered by the character menu, in menu order.
pub const CHARACTERS: [Character; 5] = [
    Character { name: "Old School", glyph: "🐔" },
    Character { name: "Mr. Frog", glyph: "🐸" },
    Character { name: "Miss Koala", glyph: "🐨" },
    Character { name: "Mr. Pig", glyph: "🐷" },
    Character { name: "Miss. Rabbit", glyph: "🐰" },
];

/// Look up a preset by zero-based index, falling back to the first one.
pub fn character(index: usize) -> Character {
    CHARACTERS.get(index).copied().unwrap_or(CHARACTERS[0])
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Row index in the grid, 0 = top. Always within [0, height-1].
    pub row: usize,
    /// Ticks accumulated towards the next one-row descent.
    pub gravity: u32,
    /// Row recorded the last time gravity found the player pinned at the
    /// bottom. Never cleared: a second pinned event at the same row crashes.
    pub floor_mark: Option<usize>,
    pub glyph: &'static str,
}

impl Player {
    /// Spawn in the middle of a grid `height` rows tall.
    pub fn new(height: usize, glyph: &'static str) -> Self {
        Player {
            row: height / 2,
            gravity: 0,
            floor_mark: None,
            glyph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_spawns_mid_grid() {
        let p = Player::new(10, "🐔");
        assert_eq!(p.row, 5);
        assert_eq!(p.gravity, 0);
        assert_eq!(p.floor_mark, None);
    }

    #[test]
    fn second_preset_is_the_frog() {
        assert_eq!(character(1).glyph, "🐸");
        assert_eq!(character(1).name, "Mr. Frog");
    }

    #[test]
    fn out_of_range_preset_falls_back() {
        assert_eq!(character(99), CHARACTERS[0]);
    }
}
