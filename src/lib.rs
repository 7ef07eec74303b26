#![warn(missing_docs)]
//! Hexagonal tile editor.
//!
//! Pick a tile type and rotation, click grid cells to place or clear tiles.
//! The placement model ([`grid`], [`placement`], [`selection`]) is plain data
//! with pure transitions; [`editor`] draws it with Bevy and turns pointer,
//! keyboard and panel input into [`editor::EditorCommand`]s.

pub mod editor;
pub mod error;
pub mod grid;
pub mod math;
pub mod placement;
pub mod selection;
pub mod snapshot;

use bevy::prelude::*;

/// Application-wide editor state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum EditorState {
    /// Normal editing: pointer, keyboard and panel input are live.
    #[default]
    Editing,
    /// World inspector open (Tab to toggle); editor commands are dropped
    /// until editing resumes.
    Inspecting,
}
