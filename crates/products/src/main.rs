//! # Products Server
//!
//! A thin binary over the `productsapp` library: the CLI in `src/cli/`
//! resolves configuration and logging, then either serves the HTTP API or
//! initializes the product document.
//!
//! ## Workspace Structure
//!
//! - `crates/productsapp/`: repository, query engine, storage, and the axum
//!   router
//! - `crates/products/`: this binary
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/products/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - config + logging setup, command dispatch (mod.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  productsapp::http → ProductRepository → FsBackend          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
