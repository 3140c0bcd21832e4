//! Sketchboard relay server library.
//!
//! A stateless broadcast hub: it forwards drawing events between connected
//! participants and keeps a live participant counter. It never stores strokes.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod bootstrap;
