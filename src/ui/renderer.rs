/// Presentation layer: text frames and the sink that displays them.
///
/// How it works:
///   1. Composers turn game/menu state into a `Frame` (lines of styled text)
///   2. A `Screen` presents the frame; `TerminalScreen` batches all commands
///      with `queue!` and flushes once, so a frame is never half-written
///
/// Composers are pure apart from `render`, which stamps the player into the
/// grid before drawing it.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::config::GameConfig;
use crate::domain::cell::Cell;
use crate::domain::entity::{Character, CHARACTERS};
use crate::sim::world::WorldState;
use super::style::{Color256, Styler};

const MENU_INDENT: &str = "                                 ";
const TITLE_INDENT: &str = "                                               ";
const LIST_INDENT: &str = "                                             ";
const BANNER_INDENT: &str = "                                                 ";

// ── Frame ──

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
}

impl Frame {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self, n: usize) {
        for _ in 0..n {
            self.lines.push(String::new());
        }
    }

    #[allow(dead_code)]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

// ── Look: glyph lookup table + styling ──

/// Display glyphs for each `Cell` variant except the player, whose glyph
/// comes from the chosen character.
#[derive(Clone, Debug)]
pub struct Palette {
    pub background: String,
    pub obstacle: String,
    pub sky: String,
    pub floor: String,
}

impl Palette {
    pub fn glyph<'a>(&'a self, cell: Cell, player: &'a str) -> &'a str {
        match cell {
            Cell::Background => &self.background,
            Cell::Obstacle => &self.obstacle,
            Cell::Player => player,
            Cell::Sky => &self.sky,
            Cell::Floor => &self.floor,
        }
    }

    fn strip(&self, cells: &[Cell], player: &str) -> String {
        cells.iter().map(|&c| self.glyph(c, player)).collect()
    }
}

#[derive(Clone, Debug)]
pub struct Look {
    pub palette: Palette,
    pub style: Styler,
}

impl Look {
    pub fn from_config(config: &GameConfig) -> Self {
        Look {
            palette: Palette {
                background: config.glyphs.background.clone(),
                obstacle: config.glyphs.obstacle.clone(),
                sky: config.glyphs.sky.clone(),
                floor: config.glyphs.floor.clone(),
            },
            style: Styler::new(config.display.color),
        }
    }

    fn sky_row(&self, width: usize) -> String {
        self.palette.sky.repeat(width)
    }

    fn floor_row(&self, width: usize) -> String {
        self.palette.floor.repeat(width)
    }
}

// ── Compose: game ──

/// Stamp the player at (row, 0) and compose the play frame:
/// sky row, grid rows, floor row, score line.
pub fn render(world: &mut WorldState, look: &Look) -> Frame {
    let row = world.player.row;
    world.scene.set(row, 0, Cell::Player);

    let player = world.player.glyph;
    let scene = &world.scene;
    let mut frame = Frame::default();

    frame.push(look.palette.strip(scene.sky(), player));
    for cells in scene.cells() {
        frame.push(look.palette.strip(cells, player));
    }
    frame.push(look.palette.strip(scene.floor(), player));
    frame.push(score_line(world.displayed_score()));
    frame
}

pub fn score_line(score: u64) -> String {
    format!("|    SCORE: {score} |")
}

// ── Compose: menus ──

pub fn compose_main_menu(look: &Look, width: usize, current: Character, notice: Option<&str>) -> Frame {
    let st = &look.style;
    let mut f = Frame::default();
    f.push(look.sky_row(width));
    f.blank(1);
    f.push(st.bold(&format!("{BANNER_INDENT}FLAPPY BIRD")));
    f.push(st.bold(&format!("{TITLE_INDENT}TERMINAL EDITION")));
    f.blank(1);
    f.push(format!("{}          Current Character: {}", MENU_INDENT, current.glyph));
    f.blank(1);
    f.push(format!("{MENU_INDENT}     {}", st.bold(&st.underline("SELECT THE ACTION DESIRED:"))));
    f.push(format!("{MENU_INDENT}1: Start Game"));
    f.push(format!("{MENU_INDENT}2: Choose Character"));
    f.push(format!(
        "{MENU_INDENT}3: Set Game Difficulty Level {}",
        st.fg(&st.bold("🚧 IN DEVELOPMENT 🚧"), Color256::RED)
    ));
    push_notice(&mut f, look, notice);
    f.push(look.floor_row(width));
    f
}

pub fn compose_character_menu(look: &Look, width: usize, notice: Option<&str>) -> Frame {
    let mut f = Frame::default();
    f.push(look.sky_row(width));
    f.blank(2);
    f.push(format!("{TITLE_INDENT} CHOOSE CHARACTER"));
    f.blank(1);
    for (i, c) in CHARACTERS.iter().enumerate() {
        f.push(format!("{LIST_INDENT}{}: {} -> {}", i + 1, c.name, c.glyph));
    }
    f.blank(1);
    push_notice(&mut f, look, notice);
    f.push(look.floor_row(width));
    f
}

fn push_notice(f: &mut Frame, look: &Look, notice: Option<&str>) {
    match notice {
        Some(text) => f.push(format!("{MENU_INDENT}{}", look.style.fg(text, Color256::RED))),
        None => f.blank(1),
    }
}

// ── Compose: game over ──

pub fn compose_game_over(look: &Look, width: usize, score: u64) -> Frame {
    let st = &look.style;
    let mut f = Frame::default();
    f.push(look.sky_row(width));
    f.blank(4);
    f.push(format!("{BANNER_INDENT}{}", st.fg(&st.bold("GAME OVER"), Color256::RED)));
    f.blank(1);
    f.push(format!("{BANNER_INDENT}{}", score_line(score)));
    f.blank(1);
    f.push(format!("{TITLE_INDENT}press any key to exit"));
    f.blank(2);
    f.push(look.floor_row(width));
    f
}

// ── Screen: where frames go ──

pub trait Screen {
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Draws frames on the real terminal, top-left anchored, one flush per frame.
pub struct TerminalScreen {
    writer: BufWriter<Stdout>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        TerminalScreen {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        }
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TerminalScreen {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.writer, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in &frame.lines {
            // Raw mode: no implicit carriage return
            queue!(self.writer, Print(line), Print("\r\n"))?;
        }
        self.writer.flush()
    }
}
