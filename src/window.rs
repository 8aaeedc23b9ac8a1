//! Overlay window construction and movement.
//!
//! The overlay is frameless, transparent, always on top, excluded from
//! screen sharing (content protection), and visible on every workspace.
//! Opacity is applied by the view from the saved setting.

use tauri::{AppHandle, Manager, PhysicalPosition, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

pub const OVERLAY_LABEL: &str = "main";

const OVERLAY_WIDTH: f64 = 728.0;
const OVERLAY_HEIGHT: f64 = 300.0;

/// Pixels per arrow-key nudge.
const NUDGE_STEP: i32 = 10;

/// Build the overlay window. Called once at startup.
pub fn build_overlay(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    let window = WebviewWindowBuilder::new(app, OVERLAY_LABEL, WebviewUrl::App("index.html".into()))
        .title("SnapSolve")
        .inner_size(OVERLAY_WIDTH, OVERLAY_HEIGHT)
        .decorations(false)
        .transparent(true)
        .always_on_top(true)
        .skip_taskbar(true)
        .resizable(true)
        .content_protected(true)
        .visible_on_all_workspaces(true)
        .build()?;

    Ok(window)
}

pub fn overlay(app: &AppHandle) -> Option<WebviewWindow> {
    app.get_webview_window(OVERLAY_LABEL)
}

/// Show/hide toggle for the primary hotkey.
pub fn toggle_visibility(window: &WebviewWindow) {
    match window.is_visible() {
        Ok(true) => {
            if let Err(e) = window.hide() {
                log::error!("[WINDOW] Failed to hide overlay: {}", e);
            }
        }
        Ok(false) => {
            if let Err(e) = window.show() {
                log::error!("[WINDOW] Failed to show overlay: {}", e);
            }
        }
        Err(e) => log::error!("[WINDOW] Failed to query visibility: {}", e),
    }
}

/// Move the overlay by one nudge step in the given direction.
pub fn nudge(window: &WebviewWindow, dx: i32, dy: i32) {
    let Ok(pos) = window.outer_position() else {
        return;
    };
    let target = PhysicalPosition::new(pos.x + dx * NUDGE_STEP, pos.y + dy * NUDGE_STEP);
    if let Err(e) = window.set_position(target) {
        log::error!("[WINDOW] Failed to move overlay: {}", e);
    }
}
