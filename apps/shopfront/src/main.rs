//! # Shopfront Entry Point
//!
//! The binary is a shell around [`shopfront::run`]; all setup lives in
//! lib.rs so tests can drive the same wiring.

fn main() {
    if let Err(err) = shopfront::run() {
        eprintln!("shopfront failed to start: {err}");
        std::process::exit(1);
    }
}
