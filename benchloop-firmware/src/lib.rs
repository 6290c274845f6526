//! benchloop firmware support
//!
//! Shared pieces of the three firmware images: board constants generated
//! from `board.toml`, the concrete capability types of the RP2040 board,
//! and the embassy tasks that drive each control loop.
//!
//! Each image in `src/bin/` sets up its peripherals and spawns exactly one
//! loop task; images are alternatives, selected at flash time.

#![no_std]

pub mod board;
pub mod tasks;
