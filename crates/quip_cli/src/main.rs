//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quip_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // The interactive phrase-generator CLI lives outside this repo; this
    // probe only validates core crate wiring.
    println!("quip_core ping={}", quip_core::ping());
    println!("quip_core version={}", quip_core::core_version());
}
