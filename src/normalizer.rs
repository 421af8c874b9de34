//! Image normalization before an image is embedded in a prompt.
//!
//! Uploaded photos are routinely several megabytes; inlined as base64 they blow past
//! the model's context limit. The normalizer shrinks them to at most
//! [`MAX_WIDTH`] pixels wide and re-encodes them as JPEG at [`JPEG_QUALITY`].

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageResult};
use tracing::{debug, instrument, warn};

/// Widest image sent to the model; narrower images are never upscaled.
pub const MAX_WIDTH: u32 = 800;

/// Lossy quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 70;

const COMPRESSED_MIME: &str = "image/jpeg";
const UNKNOWN_MIME: &str = "application/octet-stream";

/// An uploaded image as received at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Consume the payload and produce the data URI for the prompt.
    pub fn normalize(self) -> EncodedImage {
        normalize(&self.mime_type, &self.bytes)
    }
}

/// A `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    uri: String,
}

impl EncodedImage {
    /// Wrap bytes as-is, without decoding them.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            UNKNOWN_MIME
        } else {
            mime_type.trim()
        };
        Self {
            uri: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// MIME type declared in the URI
    pub fn mime_type(&self) -> &str {
        self.uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(UNKNOWN_MIME)
    }

    /// Base64 payload after the comma
    pub fn payload(&self) -> &str {
        self.uri.split_once(',').map(|(_, data)| data).unwrap_or_default()
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Resize and recompress an image, falling back to the original bytes.
///
/// Never fails: if the bytes can't be decoded or re-encoded, the original bytes are
/// wrapped with the declared `mime_type` instead.
#[instrument(skip(bytes), fields(input_len = bytes.len()))]
pub fn normalize(mime_type: &str, bytes: &[u8]) -> EncodedImage {
    match compress(bytes) {
        Ok(compressed) => {
            debug!(
                output_len = compressed.len(),
                "Image recompressed for prompt"
            );
            EncodedImage::from_bytes(COMPRESSED_MIME, &compressed)
        }
        Err(e) => {
            warn!(error = %e, "Image recompression failed, sending original bytes");
            EncodedImage::from_bytes(mime_type, bytes)
        }
    }
}

fn compress(bytes: &[u8]) -> ImageResult<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)?;

    let resized = if decoded.width() > MAX_WIDTH {
        let scaled = u64::from(decoded.height()) * u64::from(MAX_WIDTH);
        let height = (scaled / u64::from(decoded.width())).max(1);
        let height = u32::try_from(height).unwrap_or(u32::MAX);
        decoded.resize_exact(MAX_WIDTH, height, FilterType::Triangle)
    } else {
        decoded
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), format)
            .expect("test image should encode");
        buf
    }

    fn decode_uri(encoded: &EncodedImage) -> DynamicImage {
        let bytes = STANDARD
            .decode(encoded.payload())
            .expect("payload should be base64");
        image::load_from_memory(&bytes).expect("payload should be an image")
    }

    #[test]
    fn test_wide_image_is_downscaled_preserving_aspect() {
        let wide = RgbImage::from_pixel(1600, 900, Rgb([200, 30, 30]));
        let png = encode(DynamicImage::ImageRgb8(wide), ImageFormat::Png);

        let encoded = normalize("image/png", &png);
        assert_eq!(encoded.mime_type(), "image/jpeg");
        assert!(encoded.as_str().starts_with("data:image/jpeg;base64,"));

        let round_trip = decode_uri(&encoded);
        assert_eq!(round_trip.width(), 800);
        assert_eq!(round_trip.height(), 450);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let small = RgbImage::from_pixel(500, 500, Rgb([10, 120, 40]));
        let jpeg = encode(DynamicImage::ImageRgb8(small), ImageFormat::Jpeg);

        let encoded = normalize("image/jpeg", &jpeg);
        let round_trip = decode_uri(&encoded);
        assert_eq!((round_trip.width(), round_trip.height()), (500, 500));
    }

    #[test]
    fn test_alpha_is_dropped_for_jpeg() {
        let rgba = RgbaImage::from_pixel(64, 32, Rgba([0, 0, 255, 128]));
        let png = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

        let encoded = normalize("image/png", &png);
        assert_eq!(encoded.mime_type(), "image/jpeg");
        assert_eq!(decode_uri(&encoded).width(), 64);
    }

    #[test]
    fn test_corrupt_bytes_fall_back_to_original() {
        let garbage = b"definitely not a png".to_vec();
        let encoded = normalize("image/png", &garbage);

        assert_eq!(encoded.mime_type(), "image/png");
        assert_eq!(
            encoded.as_str(),
            format!("data:image/png;base64,{}", STANDARD.encode(&garbage))
        );
    }

    #[test]
    fn test_empty_input_and_mime_still_produce_uri() {
        let encoded = normalize("", &[]);
        assert_eq!(encoded.as_str(), "data:application/octet-stream;base64,");
        assert_eq!(encoded.payload(), "");
    }

    #[test]
    fn test_payload_normalize_consumes_payload() {
        let payload = ImagePayload::new("image/webp", b"RIFF....".to_vec());
        let encoded = payload.normalize();
        assert_eq!(encoded.mime_type(), "image/webp");
    }
}
