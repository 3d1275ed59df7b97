//! Build script for framezone.
//!
//! Prints short notes about enabled integrations.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_BEVY");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PARKING_LOT");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_TRACY");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DIAGNOSTICS");

    let bevy_enabled = env::var("CARGO_FEATURE_BEVY").is_ok();
    let tracy_enabled = env::var("CARGO_FEATURE_TRACY").is_ok();
    let diagnostics_enabled = env::var("CARGO_FEATURE_DIAGNOSTICS").is_ok();
    let parking_lot_enabled = env::var("CARGO_FEATURE_PARKING_LOT").is_ok();

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let is_release = profile == "release";

    if bevy_enabled {
        emit_info("Bevy integration enabled");
        emit_note("Add the plugin to your App:");
        emit_note("  app.add_plugins(framezone::bevy::FrameZonePlugin::default())");
    }

    if tracy_enabled {
        emit_info("Tracy integration enabled: frame boundaries are forwarded as frame marks");
    }

    if diagnostics_enabled && is_release {
        emit_info("Diagnostics are printed to stderr in release builds");
    }

    if is_release && !parking_lot_enabled {
        emit_note("Tip: enable 'parking_lot' for a faster name-table lock:");
        emit_note("  framezone = { version = \"0.1\", features = [\"parking_lot\"] }");
    }

    if env::var("TARGET").map(|t| t.contains("wasm")).unwrap_or(false) {
        emit_note("WebAssembly target: only one thread can record zones");
    }
}

fn emit_info(msg: &str) {
    println!("cargo:warning=[framezone] {}", msg);
}

fn emit_note(msg: &str) {
    println!("cargo:warning=[framezone]    {}", msg);
}
