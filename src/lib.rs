//! Core of a top-down taxi game: entities, collisions, trips and the screen
//! state machine. Rendering and input are reached through the [`display`]
//! and [`input`] traits; [`terminal`] implements both for a crossterm host.

pub mod capability;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod level;
pub mod scores;
pub mod spawn;
pub mod terminal;
pub mod trip;
pub mod weather;
