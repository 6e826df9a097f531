// Interactive layer: prompts, menus, tables and the first-run setup.

pub mod menu;
pub mod prompt;
pub mod render;
pub mod setup;
