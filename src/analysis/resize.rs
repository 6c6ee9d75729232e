use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Maximum width of a stored upload; taller-than-wide images keep their
/// aspect ratio and only the width is capped
const MAX_WIDTH: u32 = 800;

/// JPEG re-encode quality for uploads (matches the original catalog assets)
const JPEG_QUALITY: u8 = 70;

/// Downscale and re-encode an uploaded image.
///
/// The result is a JPEG no wider than 800px - small enough to store inline
/// in the catalog and to send to the classifier without blowing up the
/// request payload.
pub fn compress_upload(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > MAX_WIDTH {
        let scaled = (img.height() as f64 * MAX_WIDTH as f64 / img.width() as f64).round();
        img.resize_exact(MAX_WIDTH, (scaled as u32).max(1), FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;
    Ok(out)
}

/// Wrap JPEG bytes into a self-contained data URI for storage
pub fn to_data_uri(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

/// The base64 payload of a data URI, or None for remote URLs
pub fn data_uri_payload(image_url: &str) -> Option<&str> {
    if !image_url.starts_with("data:") {
        return None;
    }
    image_url.split_once(',').map(|(_, payload)| payload)
}

/// Decode the inline image bytes of a data URI, if there are any
pub fn data_uri_bytes(image_url: &str) -> Option<Vec<u8>> {
    let payload = data_uri_payload(image_url)?;
    STANDARD.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 40, 40]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_wide_image_is_capped_at_max_width() {
        let jpeg = compress_upload(&png_bytes(1600, 400)).unwrap();

        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 200);
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        let jpeg = compress_upload(&png_bytes(300, 500)).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 500));
    }

    #[test]
    fn test_garbage_input_is_an_error() {
        assert!(compress_upload(b"not an image").is_err());
    }

    #[test]
    fn test_data_uri_round_trip() {
        let jpeg = compress_upload(&png_bytes(64, 64)).unwrap();
        let uri = to_data_uri(&jpeg);

        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(data_uri_bytes(&uri).unwrap(), jpeg);
    }

    #[test]
    fn test_remote_url_has_no_payload() {
        assert_eq!(data_uri_payload("https://example.com/a.jpg"), None);
        assert_eq!(data_uri_bytes("https://example.com/a.jpg"), None);
    }
}
