//! Declarative inputs: the sprite state graph and view settings.

pub mod settings;
pub mod sprite_graph;
