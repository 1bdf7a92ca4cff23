/// Entry point: config, logging, terminal, then menu → play → farewell.

mod config;
mod domain;
mod game;
mod logging;
mod sim;
mod ui;

use std::io::{self, IsTerminal};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use config::GameConfig;
use sim::menu::Menu;
use sim::world::{Rules, WorldState};
use ui::input::TerminalKeys;
use ui::renderer::{Look, TerminalScreen};
use ui::sound::{Audio, Silent, SoundEngine};
use ui::style::{uncolorized, Color256};
use ui::terminal::Terminal;

fn main() {
    let config = GameConfig::load();
    let _log_guard = logging::init(&config.logging);
    info!(
        width = config.grid.width,
        height = config.grid.height,
        color = config.display.color,
        "starting flappy-term"
    );

    let mut terminal = Terminal::new();
    if let Err(e) = terminal.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = run(&config);

    if let Err(e) = terminal.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(Some(world)) => {
            let st = Look::from_config(&config).style;
            let banner = st.fg(&st.bold("GAME OVER"), Color256::RED);
            // Keep escapes out of pipes and files
            if io::stdout().is_terminal() {
                println!("{banner}");
            } else {
                println!("{}", uncolorized(&banner));
            }
            println!("Thanks for playing Flappy Bird: Terminal Edition!");
            println!("Final Score: {}", world.displayed_score());
        }
        Ok(None) => println!("Bye!"),
        Err(e) => {
            eprintln!("Game error: {e:#}");
        }
    }
}

fn run(config: &GameConfig) -> anyhow::Result<Option<WorldState>> {
    let look = Look::from_config(config);
    let mut keys = TerminalKeys;
    let mut screen = TerminalScreen::new();
    let mut menu = Menu::new(config.player.character);

    let Some(character) = game::run_menu(&mut keys, &mut screen, &look, config.grid.width, &mut menu)? else {
        return Ok(None);
    };

    let audio = open_audio(config);
    let world = WorldState::new(Rules::from_grid(&config.grid), character.glyph, StdRng::from_entropy());
    let world = game::play(world, look, &mut keys, audio.as_ref(), Box::new(TerminalScreen::new()))?;
    Ok(Some(world))
}

fn open_audio(config: &GameConfig) -> Box<dyn Audio> {
    if !config.audio.enabled {
        info!("audio disabled in config");
        return Box::new(Silent);
    }
    match SoundEngine::new(&config.audio, &config.search_dirs) {
        Some(engine) => Box::new(engine),
        None => {
            warn!("no audio output device, playing silently");
            Box::new(Silent)
        }
    }
}
