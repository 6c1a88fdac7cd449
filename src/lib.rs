//! Ponder is a terminal chat interface for supervisors that expose their
//! reasoning as a stream of intermediate "thought" steps.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the transcript and turn state machine, the
//!   producer-side turn pipeline, the action reducer, and configuration.
//! - [`supervisor`] defines the pluggable producer contract plus the built-in
//!   mock, a scripted replayer, and a bridge for blocking producers.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and execution used by the
//!   chat loop.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod cli;
pub mod commands;
pub mod core;
pub mod supervisor;
pub mod ui;
pub mod utils;
