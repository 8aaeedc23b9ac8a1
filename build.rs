//! Build script for the SnapSolve Tauri app.
//!
//! Nothing platform-specific here — just the Tauri code generation step.

fn main() {
    tauri_build::build();
}
