//! SnapSolve — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - Overlay window + global shortcuts (window.rs, shortcuts.rs)
//! - Screen capture domain (capture/)
//! - Analysis pipeline (analysis/)
//! - Embedded Analysis Service (server/)

pub mod analysis;
pub mod capture;
pub mod server;
pub mod settings;

mod shortcuts;
mod window;

use analysis::{Analysis, AnalysisClient, ResultStore};
use capture::{Capture, CaptureError, CaptureState};
use settings::SettingsStore;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, State};

/// Everything the pipeline needs, owned in one place instead of ambient
/// globals. Commands and background tasks share it through an `Arc`.
pub struct AppContext {
    pub settings: SettingsStore,
    pub results: ResultStore,
    pub client: AnalysisClient,
    pub capture: CaptureState,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            settings: SettingsStore::open(SettingsStore::default_path()),
            results: ResultStore::open(ResultStore::default_path()),
            client: AnalysisClient::from_env(),
            capture: CaptureState::new(),
        }
    }
}

/// Grab one frame of the display under the overlay and hand it to the view.
///
/// The frame lands in the capture slot and goes out as a
/// `screenshot-complete` event before analysis starts.
fn trigger_capture(app: &AppHandle) -> Result<Capture, CaptureError> {
    let win = window::overlay(app).ok_or(CaptureError::NoOverlayWindow)?;
    let pos = win
        .outer_position()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    let captured = capture::capture_display(pos.x, pos.y)?;

    let ctx = app.state::<Arc<AppContext>>();
    *ctx.capture.last.lock().unwrap() = Some(captured.clone());

    let _ = app.emit("screenshot-complete", &captured);
    Ok(captured)
}

/// Run the analysis off the main thread; shortcuts and window movement
/// stay responsive while the request is in flight.
///
/// A new capture fired before this resolves simply runs alongside it —
/// each success replaces the current result on arrival, so the last one
/// to resolve wins. Failures leave the previous result in place.
fn spawn_analysis(app: &AppHandle, base64_input: String) {
    let ctx = app.state::<Arc<AppContext>>().inner().clone();
    let app = app.clone();

    tauri::async_runtime::spawn(async move {
        let api_key = ctx.settings.api_key();
        match analysis::submit(&ctx.client, &ctx.results, &api_key, &base64_input).await {
            Ok(result) => {
                let _ = app.emit("analysis-complete", &result);
            }
            Err(e) => {
                log::error!("[ANALYZE] {}", e);
                let _ = app.emit("analysis-error", e.to_string());
            }
        }
    });
}

/// Full capture-to-render cycle, used by the hotkey and the view button.
pub(crate) fn capture_and_analyze(app: &AppHandle) {
    match trigger_capture(app) {
        Ok(captured) => spawn_analysis(app, captured.png_base64),
        Err(e) => {
            log::error!("[CAPTURE] {}", e);
            let _ = app.emit("capture-error", e.to_string());
        }
    }
}

/// Tauri command: capture now and kick off analysis.
/// Returns the capture so the view can preview it immediately.
#[tauri::command]
fn take_screenshot(app: AppHandle) -> Result<Capture, String> {
    let captured = trigger_capture(&app).map_err(|e| e.to_string())?;
    spawn_analysis(&app, captured.png_base64.clone());
    Ok(captured)
}

/// Tauri command: analyze an already-encoded image (re-run or pasted input).
#[tauri::command]
async fn analyze_image(
    app: AppHandle,
    ctx: State<'_, Arc<AppContext>>,
    base64_input: String,
) -> Result<Analysis, String> {
    let api_key = ctx.settings.api_key();
    let result = analysis::submit(&ctx.client, &ctx.results, &api_key, &base64_input)
        .await
        .map_err(|e| e.to_string())?;
    let _ = app.emit("analysis-complete", &result);
    Ok(result)
}

/// Tauri command: the persisted result, if any, for view reloads.
#[tauri::command]
fn get_last_analysis(ctx: State<'_, Arc<AppContext>>) -> Option<Analysis> {
    ctx.results.current()
}

/// Tauri command: the most recent capture, for the preview after a reload.
#[tauri::command]
fn get_last_capture(ctx: State<'_, Arc<AppContext>>) -> Option<Capture> {
    ctx.capture.last.lock().unwrap().clone()
}

#[tauri::command]
fn get_opacity(ctx: State<'_, Arc<AppContext>>) -> f64 {
    ctx.settings.opacity()
}

/// Tauri command: persist a new opacity and tell the view to apply it.
/// Returns the clamped value actually stored.
#[tauri::command]
fn set_opacity(
    app: AppHandle,
    ctx: State<'_, Arc<AppContext>>,
    value: f64,
) -> Result<f64, String> {
    let stored = ctx.settings.set_opacity(value).map_err(|e| e.to_string())?;
    let _ = app.emit("opacity-changed", stored);
    Ok(stored)
}

#[tauri::command]
fn get_api_key(ctx: State<'_, Arc<AppContext>>) -> String {
    ctx.settings.api_key()
}

#[tauri::command]
fn set_api_key(ctx: State<'_, Arc<AppContext>>, key: String) -> Result<(), String> {
    ctx.settings.set_api_key(key).map_err(|e| e.to_string())
}

/// Tauri command: copy the current solution to the system clipboard.
#[tauri::command]
fn copy_solution(ctx: State<'_, Arc<AppContext>>) -> Result<(), String> {
    let current = ctx
        .results
        .current()
        .ok_or("No solution to copy — capture first")?;

    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard
        .set_text(current.solution)
        .map_err(|e| e.to_string())
}

/// Tauri command: drop the current result and start over.
#[tauri::command]
fn reset_session(app: AppHandle, ctx: State<'_, Arc<AppContext>>) -> Result<(), String> {
    ctx.results.clear();
    app.emit("session-reset", ()).map_err(|e| e.to_string())
}

/// Entry point — called by the Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    dotenvy::dotenv().ok();
    env_logger::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .manage(Arc::new(AppContext::new()))
        .invoke_handler(tauri::generate_handler![
            take_screenshot,
            analyze_image,
            get_last_analysis,
            get_last_capture,
            get_opacity,
            set_opacity,
            get_api_key,
            set_api_key,
            copy_solution,
            reset_session,
        ])
        .setup(|app| {
            log::info!("SnapSolve starting up");

            window::build_overlay(app.handle())?;
            shortcuts::register(app.handle())?;

            // Embedded Analysis Service — same code the standalone
            // `analysis-server` binary runs.
            let port = server::port_from_env();
            tauri::async_runtime::spawn(server::run(
                port,
                server::ModelProvider::from_env(),
            ));

            log::info!("Overlay ready — analysis service on port {}", port);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running SnapSolve");
}
