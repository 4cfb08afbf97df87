//! Player input: raw events become high-level actions.
//!
//! # Invariants
//! - The session consumes actions, never raw input events.
//! - Actions carry world or pixel positions; mapping to cells happens in the
//!   session, against the maze currently in play.

pub mod action;

pub use action::{Action, ParseActionError};
