/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
///
/// Timing and physics constants live in `sim::world::Rules`, not here:
/// difficulty is fixed.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub glyphs: GlyphConfig,
    pub player: PlayerConfig,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub logging: LoggingConfig,
    /// Directories searched for config and assets, in priority order.
    pub search_dirs: Vec<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug)]
pub struct GlyphConfig {
    pub background: String,
    pub obstacle: String,
    pub sky: String,
    pub floor: String,
}

#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Zero-based index into `domain::entity::CHARACTERS`.
    pub character: usize,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub color: bool,
}

#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub enabled: bool,
    pub assets_dir: PathBuf,
    pub extension: String,
    pub jump_volume: f32,
    pub music_volume: f32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
    pub dir: PathBuf,
    pub file: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    glyphs: TomlGlyphs,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    logging: TomlLogging,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGlyphs {
    #[serde(default = "default_background")]
    background: String,
    #[serde(default = "default_obstacle")]
    obstacle: String,
    #[serde(default = "default_sky")]
    sky: String,
    #[serde(default = "default_floor")]
    floor: String,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_character")]
    character: usize,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_true")]
    color: bool,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_assets_dir")]
    assets_dir: String,
    #[serde(default = "default_extension")]
    extension: String,
    #[serde(default = "default_jump_volume")]
    jump_volume: f32,
    #[serde(default = "default_music_volume")]
    music_volume: f32,
}

#[derive(Deserialize, Debug)]
struct TomlLogging {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default = "default_log_dir")]
    dir: String,
    #[serde(default = "default_log_file")]
    file: String,
}

// ── Defaults ──

pub const MIN_WIDTH: usize = 4;
pub const MIN_HEIGHT: usize = 3; // gap centre is drawn from [1, H-2]

fn default_width() -> usize { 60 }
fn default_height() -> usize { 10 }
fn default_background() -> String { "◾️".into() }
fn default_obstacle() -> String { "🟩".into() }
fn default_sky() -> String { "☁️ ".into() }
fn default_floor() -> String { "🌱".into() }
fn default_character() -> usize { 1 }
fn default_true() -> bool { true }
fn default_assets_dir() -> String { "assets".into() }
fn default_extension() -> String { "mp3".into() }
fn default_jump_volume() -> f32 { 0.5 }
fn default_music_volume() -> f32 { 1.0 }
fn default_log_level() -> String { "info".into() }
fn default_log_dir() -> String { "logs".into() }
fn default_log_file() -> String { "flappy-term.log".into() }

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid { width: default_width(), height: default_height() }
    }
}

impl Default for TomlGlyphs {
    fn default() -> Self {
        TomlGlyphs {
            background: default_background(),
            obstacle: default_obstacle(),
            sky: default_sky(),
            floor: default_floor(),
        }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer { character: default_character() }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { color: default_true() }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio {
            enabled: default_true(),
            assets_dir: default_assets_dir(),
            extension: default_extension(),
            jump_volume: default_jump_volume(),
            music_volume: default_music_volume(),
        }
    }
}

impl Default for TomlLogging {
    fn default() -> Self {
        TomlLogging {
            enabled: default_true(),
            level: default_log_level(),
            dir: default_log_dir(),
            file: default_log_file(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/flappy-term`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::resolve(toml_cfg, search_dirs, no_color)
    }

    /// Parse a config document directly. Used by tests and by `load`.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(Self::resolve(toml_cfg, vec![PathBuf::from(".")], false))
    }

    fn resolve(t: TomlConfig, search_dirs: Vec<PathBuf>, no_color: bool) -> Self {
        if t.grid.width < MIN_WIDTH || t.grid.height < MIN_HEIGHT {
            eprintln!(
                "Warning: grid {}x{} is too small, clamping to at least {MIN_WIDTH}x{MIN_HEIGHT}",
                t.grid.width, t.grid.height
            );
        }

        GameConfig {
            grid: GridConfig {
                width: t.grid.width.max(MIN_WIDTH),
                height: t.grid.height.max(MIN_HEIGHT),
            },
            glyphs: GlyphConfig {
                background: t.glyphs.background,
                obstacle: t.glyphs.obstacle,
                sky: t.glyphs.sky,
                floor: t.glyphs.floor,
            },
            player: PlayerConfig {
                // 1-based in the file, like the menu digits
                character: t.player.character.clamp(1, 5) - 1,
            },
            display: DisplayConfig {
                color: t.display.color && !no_color,
            },
            audio: AudioConfig {
                enabled: t.audio.enabled,
                assets_dir: PathBuf::from(t.audio.assets_dir),
                extension: t.audio.extension,
                jump_volume: t.audio.jump_volume.clamp(0.0, 1.0),
                music_volume: t.audio.music_volume.clamp(0.0, 1.0),
            },
            logging: LoggingConfig {
                enabled: t.logging.enabled,
                level: t.logging.level,
                dir: PathBuf::from(t.logging.dir),
                file: t.logging.file,
            },
            search_dirs,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::resolve(TomlConfig::default(), vec![PathBuf::from(".")], false)
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/flappy-term)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/flappy-term");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.grid, GridConfig { width: 60, height: 10 });
        assert_eq!(cfg.glyphs.obstacle, "🟩");
        assert_eq!(cfg.player.character, 0);
        assert!(cfg.display.color);
        assert!((cfg.audio.jump_volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(cfg.logging.file, "flappy-term.log");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[grid]\nwidth = 40\n\n[glyphs]\nfloor = \"#\"\n",
        )
        .unwrap();
        assert_eq!(cfg.grid, GridConfig { width: 40, height: 10 });
        assert_eq!(cfg.glyphs.floor, "#");
        assert_eq!(cfg.glyphs.sky, "☁️ ");
    }

    #[test]
    fn tiny_grid_is_clamped() {
        let cfg = GameConfig::from_toml_str("[grid]\nwidth = 1\nheight = 1\n").unwrap();
        assert_eq!(cfg.grid, GridConfig { width: MIN_WIDTH, height: MIN_HEIGHT });
    }

    #[test]
    fn character_is_one_based_and_clamped() {
        let cfg = GameConfig::from_toml_str("[player]\ncharacter = 3\n").unwrap();
        assert_eq!(cfg.player.character, 2);
        let cfg = GameConfig::from_toml_str("[player]\ncharacter = 42\n").unwrap();
        assert_eq!(cfg.player.character, 4);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(GameConfig::from_toml_str("[grid\nwidth = ").is_err());
    }
}
