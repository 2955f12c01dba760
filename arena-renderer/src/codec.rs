//! Image codec utilities.
//!
//! Converts between raw raster bytes, base64 wire payloads, data URIs and
//! decoded RGBA images. Also builds the synthetic rasters the simulator
//! returns.

use std::io::Cursor;

use arena_core::ImagePayload;
use base64::Engine;
use image::RgbaImage;
use rand::Rng;

use crate::error::{RenderError, RenderResult};

/// Raster formats recognised from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// GIF (first frame is shown).
    Gif,
    /// Windows bitmap.
    Bmp,
    /// Unknown/other format.
    Unknown,
}

impl RasterFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        // GIF: GIF8
        if data.starts_with(b"GIF8") {
            return Self::Gif;
        }

        // BMP: BM
        if data.starts_with(b"BM") {
            return Self::Bmp;
        }

        Self::Unknown
    }

    /// MIME type for multipart uploads.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Encode raw bytes as a wire payload.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> ImagePayload {
    ImagePayload::new(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Decode a wire payload back into raw bytes.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64.
pub fn decode_base64(payload: &ImagePayload) -> RenderResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(payload.as_str())
        .map_err(|e| RenderError::Base64(e.to_string()))
}

/// Decode raster bytes (any supported format) into RGBA.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> RenderResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Decode a base64 wire payload into RGBA.
///
/// # Errors
///
/// Returns an error if the payload is not base64 or not an image.
pub fn decode_payload(payload: &ImagePayload) -> RenderResult<RgbaImage> {
    decode_image(&decode_base64(payload)?)
}

/// Encode an RGBA image as PNG bytes.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_png(img: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Extract the payload from a data URI.
///
/// Supports base64 URIs like `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns an error if the URI is malformed or not base64-encoded.
pub fn payload_from_data_uri(uri: &str) -> RenderResult<ImagePayload> {
    let uri_data = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::DataUri("Not a data URI".to_string()))?;

    // Find the comma separating metadata from data
    let (metadata, encoded_data) = uri_data
        .split_once(',')
        .ok_or_else(|| RenderError::DataUri("missing comma".to_string()))?;

    if !metadata.ends_with(";base64") {
        return Err(RenderError::DataUri(format!(
            "expected base64 encoding, got '{metadata}'"
        )));
    }

    Ok(ImagePayload::new(encoded_data))
}

/// Create a solid color image.
#[must_use]
pub fn create_solid_color(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba(rgba))
}

/// Create an opaque image of independent uniform random channels.
///
/// Each of R, G and B is drawn from `0..255`; alpha is always 255.
#[must_use]
pub fn create_noise(width: u32, height: u32) -> RgbaImage {
    let mut rng = rand::rng();
    RgbaImage::from_fn(width, height, |_, _| {
        image::Rgba([
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
            255,
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 red pixel
    const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn test_format_detection_from_magic_bytes() {
        assert_eq!(
            RasterFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            RasterFormat::Png
        );
        assert_eq!(
            RasterFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            RasterFormat::Jpeg
        );
        assert_eq!(
            RasterFormat::from_magic_bytes(b"RIFF\x00\x00\x00\x00WEBP"),
            RasterFormat::WebP
        );
        assert_eq!(RasterFormat::from_magic_bytes(b"GIF89a"), RasterFormat::Gif);
        assert_eq!(RasterFormat::from_magic_bytes(b"BM\x00\x00"), RasterFormat::Bmp);
        assert_eq!(RasterFormat::from_magic_bytes(b"GIF"), RasterFormat::Unknown);
        assert_eq!(RasterFormat::Gif.mime(), "image/gif");
        assert_eq!(RasterFormat::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_decodes_non_png_uploads() {
        let source = create_solid_color(3, 2, [10, 200, 30, 255]);
        for format in [
            image::ImageFormat::Gif,
            image::ImageFormat::Bmp,
            image::ImageFormat::WebP,
            image::ImageFormat::Jpeg,
        ] {
            let mut bytes = Cursor::new(Vec::new());
            image::DynamicImage::ImageRgba8(source.clone())
                .to_rgb8()
                .write_to(&mut bytes, format)
                .expect("encode");
            let decoded = decode_image(bytes.get_ref()).expect("decode");
            assert_eq!(decoded.dimensions(), (3, 2), "{format:?}");
        }
    }

    #[test]
    fn test_decode_payload() {
        let img = decode_payload(&ImagePayload::new(PNG_BASE64)).expect("decode");
        assert_eq!(img.dimensions(), (1, 1));
    }

    #[test]
    fn test_base64_preserves_bytes() {
        let bytes = b"\x89PNG not really".to_vec();
        let payload = encode_base64(&bytes);
        assert_eq!(decode_base64(&payload).expect("decode"), bytes);
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_base64(&ImagePayload::new("***")).unwrap_err();
        assert!(matches!(err, RenderError::Base64(_)));
    }

    #[test]
    fn test_encode_png_has_signature() {
        let png = encode_png(&create_solid_color(4, 3, [255, 255, 255, 255])).expect("png");
        assert_eq!(RasterFormat::from_magic_bytes(&png), RasterFormat::Png);
        let back = decode_image(&png).expect("decode");
        assert_eq!(back.dimensions(), (4, 3));
    }

    #[test]
    fn test_data_uri_parsing() {
        let data_uri = format!("data:image/png;base64,{PNG_BASE64}");
        let payload = payload_from_data_uri(&data_uri).expect("payload");
        assert_eq!(payload.as_str(), PNG_BASE64);
        assert_eq!(payload.to_data_url(), data_uri);
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(payload_from_data_uri("not a data uri").is_err());
        assert!(payload_from_data_uri("data:image/png").is_err()); // Missing comma
        assert!(payload_from_data_uri("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_noise_is_opaque() {
        let img = create_noise(16, 16);
        assert_eq!(img.dimensions(), (16, 16));
        assert!(img.pixels().all(|p| p.0[3] == 255));
        assert!(img.pixels().all(|p| p.0[..3].iter().all(|&c| c < 255)));
    }
}
