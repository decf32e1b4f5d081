//! # Voxel Sandbox Entry Point
//!
//! Calls into the library's `run()`, which runs a headless session.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_sandbox::run();
}
