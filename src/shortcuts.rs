//! Global shortcut registration — the capture trigger surface.
//!
//! CmdOrCtrl+B toggles the overlay, CmdOrCtrl+H captures and analyzes,
//! arrow keys nudge the window, CmdOrCtrl+R resets the session. All of
//! these fire while an analysis is in flight; none of them wait on it.

use crate::{window, AppContext};
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_global_shortcut::{
    Code, GlobalShortcutExt, Modifiers, Shortcut, ShortcutState,
};

#[cfg(target_os = "macos")]
const PRIMARY_MOD: Modifiers = Modifiers::SUPER;
#[cfg(not(target_os = "macos"))]
const PRIMARY_MOD: Modifiers = Modifiers::CONTROL;

pub fn register(app: &AppHandle) -> Result<(), Box<dyn std::error::Error>> {
    on_press(app, Code::KeyB, |app| {
        if let Some(win) = window::overlay(app) {
            window::toggle_visibility(&win);
        }
    })?;

    on_press(app, Code::KeyH, |app| {
        log::info!("[CAPTURE] Hotkey fired");
        crate::capture_and_analyze(app);
    })?;

    on_press(app, Code::ArrowLeft, |app| nudge_overlay(app, -1, 0))?;
    on_press(app, Code::ArrowRight, |app| nudge_overlay(app, 1, 0))?;
    on_press(app, Code::ArrowUp, |app| nudge_overlay(app, 0, -1))?;
    on_press(app, Code::ArrowDown, |app| nudge_overlay(app, 0, 1))?;

    on_press(app, Code::KeyR, |app| {
        let ctx = app.state::<Arc<AppContext>>();
        ctx.results.clear();
        let _ = app.emit("session-reset", ());
    })?;

    Ok(())
}

/// Bind `PRIMARY_MOD + code` to an action, firing on key press only.
fn on_press(
    app: &AppHandle,
    code: Code,
    action: impl Fn(&AppHandle) + Send + Sync + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let shortcut = Shortcut::new(Some(PRIMARY_MOD), code);
    app.global_shortcut()
        .on_shortcut(shortcut, move |app, _shortcut, event| {
            if event.state() == ShortcutState::Pressed {
                action(app);
            }
        })?;
    Ok(())
}

fn nudge_overlay(app: &AppHandle, dx: i32, dy: i32) {
    if let Some(win) = window::overlay(app) {
        window::nudge(&win, dx, dy);
    }
}
