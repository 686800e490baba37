//! # Survsim - A Content-Driven Turn-Based Survival Simulation
//!
//! Survsim is a small turn-based survival game whose world is defined
//! entirely by hand-authored content files: items, monsters, and crafting
//! recipes are loaded from loosely formatted text records at start-up and
//! played through a line-oriented command interface.
//!
//! ## Features
//!
//! - **Tolerant Content Loading**: Hand-authored files are parsed with a
//!   forgiving record scanner; malformed or incomplete records are skipped,
//!   never fatal.
//! - **World/Player Inventory Split**: Item instances live in exactly one of
//!   two collections and move between them via take/drop and crafting.
//! - **Atomic Crafting**: Component consumption is all-or-nothing; a failed
//!   craft leaves the inventory exactly as it was.
//! - **Deterministic Combat**: Encounters resolve through an alternating
//!   damage loop that always terminates in a win or a loss.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use survsim::config::Config;
//! use survsim::game::{ContentPaths, ContentRegistry, GameSession};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("survsim.toml")?;
//!     let paths = ContentPaths::under(&config.game.content_dir);
//!     let registry = ContentRegistry::load(&paths);
//!     let mut session = GameSession::new(registry, config.game.player_hp);
//!
//!     let (lines, _quit) = survsim::game::handle_command(&mut session, "items");
//!     for line in lines {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - The game core: scanner, registry, inventory, crafting,
//!   combat, and the command/session layer
//! - [`config`] - Configuration management and validation
//! - [`logutil`] - Log sanitization helpers for raw content text

pub mod config;
pub mod game;
pub mod logutil;
