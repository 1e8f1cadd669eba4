//! # Questline - a single-player text adventure
//!
//! A small turn-based adventure played in the terminal: fight randomly generated
//! monsters, rest, buy gear at the shop, equip weapons and shields, and keep progress in a
//! per-character JSON save file.
//!
//! ## Features
//!
//! - **Combat**: Attack or flee, with weapon bonuses, gear wear and an instant-win Magic Potion.
//! - **Shop**: Fixed catalog; purchases are copied into the inventory.
//! - **Saves**: Atomic JSON writes under an advisory lock; a broken or missing save falls back to a new game.
//! - **Grid mode**: An ASCII overworld with a shop tile, an encounter tile and wandering monsters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questline::adventure::Session;
//! use questline::config::Config;
//! use questline::console::ConsoleIo;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("questline.toml")?;
//!     let mut session = Session::new("Aria", config.game)?;
//!     let (_, notice) = session.load();
//!     println!("{}", notice);
//!     session.run(&mut ConsoleIo::stdio(), &mut rand::thread_rng());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`adventure`] - Game rules, player state, persistence and the grid overworld
//! - [`config`] - Configuration loading and defaults
//! - [`console`] - Terminal input/output
//! - [`validation`] - Character name validation and log-safe escaping

pub mod adventure;
pub mod config;
pub mod console;
pub mod validation;
