//! **maze-core**: core types for grid mazes.
//!
//! This crate provides the foundational types shared by the maze crates:
//! the [`Cell`] coordinate, the occupancy [`Grid`], and the small
//! Elm-architecture application loop (screen buffer, input messages,
//! drivers) that front-ends are built on.

pub mod app;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod screen;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use geom::{Cell, OFFSETS_4};
pub use grid::{Grid, GridError};
pub use messages::{Key, Msg};
pub use screen::{Frame, Glyph, Screen};
pub use style::Color;
