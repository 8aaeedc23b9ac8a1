//! Pure frame encoding — functional core.
//!
//! This module has zero infrastructure dependencies.
//! It takes pixel data in, returns encoded text out.

use super::CaptureError;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Encode an image as PNG and base64 the bytes.
///
/// The output is what the Analysis Service accepts as `base64Input`.
pub fn png_base64(image: &DynamicImage) -> Result<String, CaptureError> {
    let mut png_bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(STANDARD.encode(&png_bytes))
}
