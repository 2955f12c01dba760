//! `vision-arena` command-line host.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use arena_app::{
    parse_strokes, present, CliArgs, Command, ConsoleView, DetectController, GanController,
    SketchController, Stroke, PAD_RECT,
};
use arena_client::{CapabilityProbe, ClientConfig, ImageUpload, Transport};
use arena_core::{BackendMode, SketchParams};
use arena_renderer::codec::{decode_base64, payload_from_data_uri};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,arena_app=debug,arena_client=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = CliArgs::parse();

    let config = ClientConfig::new(&args.backend_url)?
        .with_probe_timeout(Duration::from_millis(args.probe_timeout_ms));
    let http = config.http_client()?;

    let mode = if args.simulate {
        tracing::info!("Simulator forced from the command line");
        BackendMode::Simulated
    } else {
        CapabilityProbe::new(&config, http.clone())?.detect().await
    };
    let transport = Transport::with_client(mode, &config, http);

    let succeeded = match args.command {
        Command::Probe => {
            println!("{mode}");
            true
        }
        Command::Detect {
            image,
            canvas_out,
            remove,
            edited_out,
        } => {
            run_detect(
                transport,
                &image,
                canvas_out.as_deref(),
                remove,
                edited_out.as_deref(),
            )
            .await?
        }
        Command::Sketch {
            strokes,
            guidance_scale,
            num_steps,
            out,
        } => {
            let params = SketchParams {
                guidance_scale,
                num_steps,
            };
            run_sketch(transport, strokes.as_deref(), params, &out).await?
        }
        Command::Gan {
            latent_dim,
            noise_scale,
            out,
        } => {
            let view = ConsoleView::new().with_gan_fields(latent_dim, noise_scale);
            let controller = GanController::new(transport);
            let generated = present(&view, controller.generate(&view).await);
            if generated.is_some() {
                save_displayed(&view, &out).await?;
            }
            generated.is_some()
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_detect(
    transport: Transport,
    image: &Path,
    canvas_out: Option<&Path>,
    remove: Vec<usize>,
    edited_out: Option<&Path>,
) -> anyhow::Result<bool> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let file_name = image
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());

    let view = ConsoleView::new()
        .with_upload(ImageUpload::new(bytes, file_name))
        .with_removals(remove);
    let controller = DetectController::new(transport);

    if present(&view, controller.detect(&view).await).is_none() {
        return Ok(false);
    }

    if let Some(path) = canvas_out {
        let png = controller.canvas().snapshot().to_png()?;
        write_file(path, &png).await?;
    }

    if let Some(path) = edited_out {
        if present(&view, controller.apply_edits(&view).await).is_none() {
            return Ok(false);
        }
        save_displayed(&view, path).await?;
    }

    Ok(true)
}

async fn run_sketch(
    transport: Transport,
    strokes: Option<&Path>,
    params: SketchParams,
    out: &Path,
) -> anyhow::Result<bool> {
    let controller = SketchController::new(transport);

    if let Some(path) = strokes {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let strokes = parse_strokes(&json)
            .with_context(|| format!("Invalid strokes file {}", path.display()))?;
        let inked = strokes
            .iter()
            .flat_map(Stroke::pointer_events)
            .filter(|event| controller.handle_pointer(event, &PAD_RECT))
            .count();
        tracing::debug!("Replayed {} strokes ({inked} stamps)", strokes.len());
    }

    let view = ConsoleView::new().with_sketch_params(params);
    if present(&view, controller.generate(&view).await).is_none() {
        return Ok(false);
    }
    save_displayed(&view, out).await?;
    Ok(true)
}

/// Write the last image the view displayed, decoding its data URL.
async fn save_displayed(view: &ConsoleView, path: &Path) -> anyhow::Result<()> {
    let data_url = view
        .take_displayed()
        .context("No image was displayed")?;
    let bytes = decode_base64(&payload_from_data_uri(&data_url)?)?;
    write_file(path, &bytes).await
}

async fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
