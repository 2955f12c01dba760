//! Command-line arguments for `vision-arena`.

use std::path::PathBuf;

use arena_client::{DEFAULT_BACKEND_URL, DEFAULT_PROBE_TIMEOUT_MS};
use clap::{Parser, Subcommand};

/// Command-line arguments for vision-arena.
#[derive(Debug, Clone, Parser)]
#[command(name = "vision-arena")]
#[command(about = "Drive the object removal, sketch and GAN backends, or simulate them offline")]
#[command(version)]
pub struct CliArgs {
    /// Backend base URL (e.g., <http://127.0.0.1:5000>)
    #[arg(long, env = "ARENA_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// How long to wait for the capability probe
    #[arg(long, env = "ARENA_PROBE_TIMEOUT_MS", default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub probe_timeout_ms: u64,

    /// Skip the probe and use the built-in simulator
    #[arg(long)]
    pub simulate: bool,

    /// Feature to run
    #[command(subcommand)]
    pub command: Command,
}

/// Features exposed on the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Report whether a backend is reachable
    Probe,

    /// Detect objects, then optionally remove some of them
    Detect {
        /// Image to analyse
        image: PathBuf,

        /// Write the annotated canvas here
        #[arg(long)]
        canvas_out: Option<PathBuf>,

        /// Detections to remove, by their listed number (e.g. 1,3)
        #[arg(long, value_delimiter = ',')]
        remove: Vec<usize>,

        /// Apply the edits and write the result here
        #[arg(long)]
        edited_out: Option<PathBuf>,
    },

    /// Generate an image from a sketch
    Sketch {
        /// JSON strokes to draw: `[[[x, y], ...], ...]`
        #[arg(long)]
        strokes: Option<PathBuf>,

        /// Classifier-free guidance scale
        #[arg(long, default_value = "3.0")]
        guidance_scale: String,

        /// Number of diffusion steps
        #[arg(long, default_value = "15")]
        num_steps: String,

        /// Write the generated image here
        #[arg(long)]
        out: PathBuf,
    },

    /// Sample the GAN
    Gan {
        /// Latent vector size
        #[arg(long, default_value = "16")]
        latent_dim: String,

        /// Noise scale
        #[arg(long, default_value = "1.0")]
        noise_scale: String,

        /// Write the generated image here
        #[arg(long)]
        out: PathBuf,
    },
}
