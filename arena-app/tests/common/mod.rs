//! Shared helpers for controller integration tests.

#![allow(dead_code)]

use arena_client::{ClientConfig, ImageUpload, Transport};
use arena_core::BackendMode;
use arena_renderer::codec::{create_solid_color, encode_png};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A small opaque PNG upload.
pub fn png_upload(width: u32, height: u32) -> ImageUpload {
    let png = encode_png(&create_solid_color(width, height, [200, 40, 40, 255])).expect("png");
    ImageUpload::new(png, "photo.png")
}

/// A small opaque upload in a non-PNG container.
pub fn encoded_upload(
    width: u32,
    height: u32,
    format: image::ImageFormat,
    file_name: &str,
) -> ImageUpload {
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(create_solid_color(width, height, [30, 90, 160, 255]))
        .to_rgb8()
        .write_to(&mut bytes, format)
        .expect("encode");
    ImageUpload::new(bytes.into_inner(), file_name)
}

/// Transport decided by actually probing `server`.
pub async fn probed_transport(server: &MockServer) -> Transport {
    let config = ClientConfig::new(server.uri()).expect("config");
    Transport::connect(&config).await.expect("transport")
}

/// Transport forced to remote mode against `server`.
pub fn remote_transport(server: &MockServer) -> Transport {
    let config = ClientConfig::new(server.uri()).expect("config");
    Transport::new(BackendMode::Remote, &config).expect("transport")
}

/// Transport in simulated mode. The URL is never contacted.
pub fn simulated_transport() -> Transport {
    let config = ClientConfig::new("http://127.0.0.1:9").expect("config");
    Transport::new(BackendMode::Simulated, &config).expect("transport")
}

/// Make the probe fail so the session runs simulated.
pub async fn mount_failing_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}
