//! Tsumego trainer.
//!
//! The non-visual side of a problem trainer: a problem collection with
//! explicit ordering state, the random reorientation policy, and a player
//! session that walks a ranked move tree. Rendering stays with the caller.

pub mod collection;
pub mod config;
pub mod error;
pub mod orientation;
pub mod session;
