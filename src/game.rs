/// Game driver: the menu loop, then two threads of control during play.
///
///   - `game-loop` thread: owns the `WorldState`. Every tick it drains input
///     signals, steps the simulation, renders, then sleeps the tick interval.
///     It is the only writer of the world and the only renderer.
///   - calling thread: blocks on the keyboard, plays the jump sound and
///     forwards `Signal`s over a channel.
///
/// The loop publishes "run over" through an `AtomicBool`; the input side
/// checks it after each key, so after a loss the next key press exits.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context};
use tracing::{debug, info, trace};

use crate::domain::entity::Character;
use crate::sim::event::GameEvent;
use crate::sim::menu::{Menu, MenuState};
use crate::sim::step;
use crate::sim::world::WorldState;
use crate::ui::input::{decode, Command, KeySource};
use crate::ui::renderer::{self, Frame, Look, Screen};
use crate::ui::sound::{play_or_warn, Audio, Cue};

const WRONG_SELECTION: &str = "Wrong Selection";

/// Input → game loop messages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    Jump,
    Quit,
}

// ══════════════════════════════════════════════════════════════
// Menu
// ══════════════════════════════════════════════════════════════

/// Drive the menu until the player starts a run (`Some`) or quits (`None`).
pub fn run_menu(
    keys: &mut dyn KeySource,
    screen: &mut dyn Screen,
    look: &Look,
    width: usize,
    menu: &mut Menu,
) -> io::Result<Option<Character>> {
    screen.present(&menu_frame(look, width, menu, None))?;

    loop {
        let cmd = decode(keys.read_byte()?);
        if cmd == Command::Quit {
            info!("quit from menu");
            return Ok(None);
        }

        let frame = match menu.handle(cmd) {
            MenuState::Start => {
                info!(character = menu.character().name, index = menu.character_index(), "starting run");
                return Ok(Some(menu.character()));
            }
            MenuState::Invalid => {
                debug!(?cmd, screen = ?menu.screen(), "invalid menu selection");
                menu_frame(look, width, menu, Some(WRONG_SELECTION))
            }
            MenuState::MainMenu | MenuState::CharacterSelect => menu_frame(look, width, menu, None),
        };
        screen.present(&frame)?;
    }
}

fn menu_frame(look: &Look, width: usize, menu: &Menu, notice: Option<&str>) -> Frame {
    match menu.screen() {
        MenuState::CharacterSelect => renderer::compose_character_menu(look, width, notice),
        _ => renderer::compose_main_menu(look, width, menu.character(), notice),
    }
}

// ══════════════════════════════════════════════════════════════
// Play
// ══════════════════════════════════════════════════════════════

/// Run one game to completion and hand back the final world.
pub fn play(
    world: WorldState,
    look: Look,
    keys: &mut dyn KeySource,
    audio: &dyn Audio,
    mut screen: Box<dyn Screen + Send>,
) -> anyhow::Result<WorldState> {
    let (tx, rx) = mpsc::channel();
    let finished = Arc::new(AtomicBool::new(false));

    play_or_warn(audio, Cue::Background);

    let loop_finished = Arc::clone(&finished);
    let handle = thread::Builder::new()
        .name("game-loop".into())
        .spawn(move || run_game_loop(world, &look, screen.as_mut(), &rx, &loop_finished))
        .context("spawning game loop thread")?;

    let input = run_input_loop(keys, audio, &tx, &finished);

    // The loop may still be ticking if input ended on its own
    let _ = tx.send(Signal::Quit);
    let world = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?
        .context("rendering frame")?;
    input.context("reading keyboard")?;

    info!(score = world.displayed_score(), ticks = world.score, "run finished");
    Ok(world)
}

// ══════════════════════════════════════════════════════════════
// Game loop thread
// ══════════════════════════════════════════════════════════════

/// Tick until the run is lost or a quit arrives, then draw the game-over
/// frame. `finished` is raised on every exit path.
pub fn run_game_loop(
    mut world: WorldState,
    look: &Look,
    screen: &mut dyn Screen,
    signals: &Receiver<Signal>,
    finished: &AtomicBool,
) -> io::Result<WorldState> {
    let result = tick_until_over(&mut world, look, screen, signals);
    finished.store(true, Ordering::Release);
    result?;

    let frame = renderer::compose_game_over(look, world.scene.width(), world.displayed_score());
    screen.present(&frame)?;
    Ok(world)
}

fn tick_until_over(
    world: &mut WorldState,
    look: &Look,
    screen: &mut dyn Screen,
    signals: &Receiver<Signal>,
) -> io::Result<()> {
    loop {
        if !drain_signals(world, signals) {
            info!("quit requested");
            return Ok(());
        }

        let events = step::step(world);
        log_events(&events);
        if world.is_lost() {
            return Ok(());
        }

        let frame = renderer::render(world, look);
        screen.present(&frame)?;
        thread::sleep(world.rules.tick_rate);
    }
}

/// Apply every pending signal. Returns false once the loop should stop.
fn drain_signals(world: &mut WorldState, signals: &Receiver<Signal>) -> bool {
    loop {
        match signals.try_recv() {
            Ok(Signal::Jump) => {
                if let Some(event) = step::jump(world) {
                    trace!(?event);
                }
            }
            Ok(Signal::Quit) | Err(TryRecvError::Disconnected) => return false,
            Err(TryRecvError::Empty) => return true,
        }
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        if event.is_fatal() {
            info!(?event, "run lost");
        } else {
            debug!(?event);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Input (calling thread)
// ══════════════════════════════════════════════════════════════

/// Forward keys as signals until quit, loss, or a closed channel.
pub fn run_input_loop(
    keys: &mut dyn KeySource,
    audio: &dyn Audio,
    signals: &Sender<Signal>,
    finished: &AtomicBool,
) -> io::Result<()> {
    loop {
        let byte = keys.read_byte()?;
        if finished.load(Ordering::Acquire) {
            return Ok(());
        }

        match decode(byte) {
            Command::Jump => {
                play_or_warn(audio, Cue::Jump);
                if signals.send(Signal::Jump).is_err() {
                    return Ok(());
                }
            }
            Command::Quit => {
                let _ = signals.send(Signal::Quit);
                return Ok(());
            }
            other => trace!(?other, "ignored key"),
        }
    }
}
