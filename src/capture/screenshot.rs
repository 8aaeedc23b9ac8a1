//! Monitor resolution using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS.

use super::CaptureError;
use xcap::Monitor;

/// Find the monitor containing the given point (the overlay window's
/// outer position), so the capture covers the display the user is
/// actually working on.
///
/// Falls back to the primary monitor, then the first enumerated one,
/// when the point lands outside every display (mid-drag, for example).
pub fn monitor_nearest(x: i32, y: i32) -> Result<Monitor, CaptureError> {
    if let Ok(monitor) = Monitor::from_point(x, y) {
        return Ok(monitor);
    }

    let monitors =
        Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

    monitors
        .into_iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| {
            // Fallback: if no monitor reports as primary, use the first one
            let all = Monitor::all().ok()?;
            all.into_iter().next()
        })
        .ok_or(CaptureError::NoDisplaySource)
}
