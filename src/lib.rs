//! multivac-launch - front-end for launching Multivac sessions.
//!
//! The pieces are deliberately separate: [`form`] validates raw input,
//! [`dispatch`] sends one request to the upstream `/session` endpoint, and
//! [`launcher::submit`] wires the two together for whichever UI driver is
//! in use (the [`api`] web front-end or the CLI in `main.rs`).

pub mod api;
pub mod blur;
pub mod config;
pub mod dispatch;
pub mod form;
pub mod launcher;
pub mod surface;
