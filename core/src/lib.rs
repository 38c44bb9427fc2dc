//! Board engine for a single-player mine deduction game.
//!
//! A [`Session`] starts [`Phase::Pending`] with no mines placed. The first
//! [`Session::reveal`] asks its [`BoardGenerator`] for a layout that keeps the
//! revealed cell safe, then play continues until every safe cell is revealed
//! or a mine is hit. Every move returns the cells it changed so a renderer can
//! repaint incrementally.

#![no_std]

extern crate alloc;

pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod config;
mod error;
mod generator;
mod session;
mod types;
