//! Game session: one explicitly owned context for a running game.
//!
//! # Invariants
//! - The session exclusively owns the current maze; a reset replaces it
//!   wholesale and rebinds every collaborator to the new one.
//! - Paths are recomputed on cell or destination changes, never per tick.
//! - `TimeUp` is emitted at most once per session.
//! - A powerup is collected at most once and never outlives its maze.

mod config;
mod countdown;
mod powerup;
mod session;

pub use config::{ConfigError, GameConfig};
pub use countdown::Countdown;
pub use powerup::{Bonuses, Powerup, PowerupConfig, PowerupKind, Powerups};
pub use session::{GameSession, SessionError, SessionEvent};
