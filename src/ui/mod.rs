pub mod input;
pub mod renderer;
pub mod sound;
pub mod style;
pub mod terminal;
