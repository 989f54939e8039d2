//! Instruction handlers

pub mod admin;
pub mod player;

pub use admin::*;
pub use player::*;
