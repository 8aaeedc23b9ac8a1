//! Screen capture domain — public API.
//!
//! This module owns all screen capture functionality.
//! External code should only use the public functions exported here.

mod encode;
mod screenshot;

pub use encode::png_base64;
pub use screenshot::monitor_nearest;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

/// One encoded frame, tagged with the moment it was taken.
///
/// The base64 PNG is the payload the view previews and the analysis
/// pipeline submits; the timestamp ties the payload to a single trigger.
#[derive(Debug, Clone, Serialize)]
pub struct Capture {
    pub png_base64: String,
    pub captured_at: DateTime<Utc>,
}

/// Thread-safe slot for the most recent capture.
/// Replaced on every trigger; the previous frame is discarded.
pub struct CaptureState {
    pub last: Mutex<Option<Capture>>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

/// Grab one frame of the display nearest the given overlay position.
///
/// Resolves the monitor, captures at native resolution, PNG-encodes and
/// base64s the result. The timestamp is taken after the frame lands, so it
/// always refers to the frame actually delivered.
pub fn capture_display(x: i32, y: i32) -> Result<Capture, CaptureError> {
    let start = std::time::Instant::now();

    let monitor = monitor_nearest(x, y)?;
    let frame = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    let capture_ms = start.elapsed().as_millis();
    log::info!(
        "[CAPTURE] Grabbed {}x{} frame in {}ms",
        frame.width(),
        frame.height(),
        capture_ms
    );

    let png_base64 = png_base64(&image::DynamicImage::ImageRgba8(frame))?;
    log::info!(
        "[CAPTURE] Encoded in {}ms ({} base64 chars)",
        start.elapsed().as_millis() - capture_ms,
        png_base64.len()
    );

    Ok(Capture {
        png_base64,
        captured_at: Utc::now(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No overlay window — nothing to capture")]
    NoOverlayWindow,

    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No display source found")]
    NoDisplaySource,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}
