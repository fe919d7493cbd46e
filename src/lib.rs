//! Shark Runner - endless side-scroller game core with a terminal host.
//!
//! The core (`runner`, `player`, `horizon`, `entities`, `collision`, `meters`)
//! is a pure simulation driven by host timestamps and input events. It
//! publishes [`render::DrawCommand`]s and [`runner::RunnerEvent`]s; `ui` and
//! `input` adapt those to a terminal.

pub mod build_info;
pub mod collision;
pub mod core;
pub mod entities;
pub mod horizon;
pub mod input;
pub mod meters;
pub mod player;
pub mod render;
pub mod runner;
pub mod ui;
pub mod utils;
