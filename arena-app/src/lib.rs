//! # Vision Arena App
//!
//! Feature controllers for object removal, sketch-to-image and the GAN
//! playground, plus the terminal host used by the `vision-arena` binary.
//!
//! Each controller validates its inputs, calls the
//! [`Transport`](arena_client::Transport) and pushes results through a UI
//! hook trait from [`hooks`]. Failures come back as [`FeatureError`];
//! [`present`] turns them into alerts.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod console;
pub mod detect;
pub mod error;
pub mod gan;
pub mod hooks;
pub mod sketch;

pub use cli::{CliArgs, Command};
pub use console::{parse_strokes, ConsoleView, Stroke, PAD_RECT};
pub use detect::DetectController;
pub use error::{Feature, FeatureError, FeatureResult};
pub use gan::GanController;
pub use hooks::{present, Alerts, DetectView, GanView, SketchView};
pub use sketch::SketchController;
