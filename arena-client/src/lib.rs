//! # Vision Arena Client
//!
//! Talks to the feature backends, or stands in for them.
//!
//! The [`CapabilityProbe`] decides once whether a backend is reachable. The
//! resulting [`BackendMode`](arena_core::BackendMode) is injected into a
//! [`Transport`], whose per-feature operations either forward the request
//! verbatim or answer it with the [`Simulator`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod probe;
pub mod reply;
pub mod simulator;
pub mod transport;

pub use cancel::CancelSlot;
pub use config::{ClientConfig, Endpoint, DEFAULT_BACKEND_URL, DEFAULT_PROBE_TIMEOUT_MS};
pub use error::{ClientError, ClientResult};
pub use probe::CapabilityProbe;
pub use reply::Reply;
pub use simulator::{Simulator, GAN_IMAGE_SIZE};
pub use transport::{ImageUpload, SketchUpload, Transport};
