/// Pre-game menu state machine.
///
///   MainMenu        --1-->  Start
///   MainMenu        --2-->  CharacterSelect
///   CharacterSelect --1..5-> Start (with that character selected)
///   anything else   ------>  Invalid (screen unchanged, re-prompt)
///
/// Option 3 of the main menu (difficulty) is shown but not wired.

use crate::domain::entity::{self, Character};
use crate::ui::input::Command;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuState {
    MainMenu,
    CharacterSelect,
    Start,
    Invalid,
}

#[derive(Clone, Debug)]
pub struct Menu {
    /// Screen currently shown. Never `Invalid`.
    screen: MenuState,
    /// Zero-based index into `entity::CHARACTERS`.
    character: usize,
}

impl Menu {
    pub fn new(character: usize) -> Self {
        Menu {
            screen: MenuState::MainMenu,
            character: character.min(entity::CHARACTERS.len() - 1),
        }
    }

    pub fn screen(&self) -> MenuState { self.screen }
    pub fn character_index(&self) -> usize { self.character }
    pub fn character(&self) -> Character { entity::character(self.character) }

    /// Feed one command. Returns the resulting state; `Invalid` leaves the
    /// current screen untouched.
    pub fn handle(&mut self, cmd: Command) -> MenuState {
        let next = match (self.screen, cmd) {
            (MenuState::MainMenu, Command::Digit(1)) => MenuState::Start,
            (MenuState::MainMenu, Command::Digit(2)) => MenuState::CharacterSelect,
            (MenuState::CharacterSelect, Command::Digit(n @ 1..=5)) => {
                self.character = usize::from(n - 1);
                MenuState::Start
            }
            _ => MenuState::Invalid,
        };
        if next != MenuState::Invalid {
            self.screen = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::input::decode;

    #[test]
    fn one_starts_from_main_menu() {
        let mut m = Menu::new(0);
        assert_eq!(m.handle(decode(b'1')), MenuState::Start);
        assert_eq!(m.character().glyph, "🐔");
    }

    #[test]
    fn two_opens_character_select() {
        let mut m = Menu::new(0);
        assert_eq!(m.handle(decode(b'2')), MenuState::CharacterSelect);
        assert_eq!(m.screen(), MenuState::CharacterSelect);
    }

    #[test]
    fn character_select_picks_second_preset() {
        let mut m = Menu::new(0);
        m.handle(decode(b'2'));
        assert_eq!(m.handle(decode(50)), MenuState::Start);
        assert_eq!(m.character_index(), 1);
        assert_eq!(m.character().glyph, "🐸");
    }

    #[test]
    fn out_of_range_digit_is_invalid_and_keeps_screen() {
        let mut m = Menu::new(0);
        assert_eq!(m.handle(decode(57)), MenuState::Invalid);
        assert_eq!(m.screen(), MenuState::MainMenu);
    }

    #[test]
    fn difficulty_option_is_a_stub() {
        let mut m = Menu::new(0);
        assert_eq!(m.handle(decode(b'3')), MenuState::Invalid);
        assert_eq!(m.screen(), MenuState::MainMenu);
    }

    #[test]
    fn invalid_in_character_select_keeps_choice() {
        let mut m = Menu::new(3);
        m.handle(decode(b'2'));
        assert_eq!(m.handle(decode(b' ')), MenuState::Invalid);
        assert_eq!(m.screen(), MenuState::CharacterSelect);
        assert_eq!(m.character_index(), 3);
    }

    #[test]
    fn every_preset_is_reachable() {
        for (i, key) in (b'1'..=b'5').enumerate() {
            let mut m = Menu::new(0);
            m.handle(decode(b'2'));
            assert_eq!(m.handle(decode(key)), MenuState::Start);
            assert_eq!(m.character(), entity::CHARACTERS[i]);
        }
    }
}
