pub mod event;
pub mod menu;
pub mod scene;
pub mod step;
pub mod world;
