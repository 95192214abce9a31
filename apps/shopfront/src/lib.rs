//! # Shopfront Application
//!
//! The single-page shop: a hash-routed controller over a cart, three
//! views, and a header, with a JSON file standing in for localStorage.
//!
//! ## Module Organization
//! ```text
//! shopfront/
//! ├── lib.rs          ◄─── You are here (setup & event loop)
//! ├── app.rs          ◄─── App controller (selection state machine)
//! ├── cart.rs         ◄─── SharedCart (cart + store + notifier wiring)
//! ├── host.rs         ◄─── Host environment (hash, toasts, document)
//! ├── header.rs       ◄─── Header controller (tabs + badge)
//! ├── commands.rs     ◄─── Parsed user-interaction surface
//! ├── error.rs        ◄─── Setup error type
//! └── views/
//!     ├── mod.rs      ◄─── View trait
//!     ├── shop.rs     ◄─── Catalog listing
//!     ├── cart.rs     ◄─── Cart lines and totals
//!     └── payment.rs  ◄─── Amount due
//! ```
//!
//! ## Startup Sequence
//! ```text
//! 1. Initialize logging (tracing-subscriber, RUST_LOG override)
//! 2. Resolve the store path (SHOPFRONT_STORE_PATH override, else the
//!    platform data dir)
//! 3. Open the JSON file store
//! 4. Build the terminal host and the App
//! 5. install() + run()  - #shop entry point, cart load, first render
//! 6. Drive the event loop from input lines until quit
//! ```

pub mod app;
pub mod cart;
pub mod commands;
pub mod error;
pub mod header;
pub mod host;
pub mod views;

use std::cell::RefCell;
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::rc::Rc;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_core::catalog::demo_catalog;
use shopfront_store::{JsonFileStore, KeyValueStore};

pub use app::{App, Selection};
pub use error::SetupError;

use commands::{Command, Flow, HELP};
use host::{Host, TerminalHost};

/// Runs the interactive shop session.
pub fn run() -> Result<(), SetupError> {
    init_tracing();

    info!("Starting Shopfront");

    let store_path = resolve_store_path()?;
    info!(path = %store_path.display(), "store path determined");

    let storage: Rc<dyn KeyValueStore> = Rc::new(JsonFileStore::open(&store_path)?);
    let host: Rc<RefCell<dyn Host>> = Rc::new(RefCell::new(TerminalHost::new()));
    let catalog = demo_catalog();

    let mut app = App::new(Rc::clone(&host), storage);
    app.install();
    app.run();
    app.process_events();

    println!("{HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match commands::apply(&mut app, &host, &catalog, &command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => println!("  ! {err}"),
            },
            Err(err) => println!("  ! {err}"),
        }
        app.process_events();
    }

    app.uninstall();
    info!("session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=shopfront=trace` - trace for the app crates only
/// - Default: INFO overall, DEBUG for the shopfront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the store file path.
///
/// ## Resolution Order
/// 1. `SHOPFRONT_STORE_PATH` environment variable
/// 2. Platform data dir, e.g. `~/.local/share/shopfront/shopfront.json`
///    on Linux
fn resolve_store_path() -> Result<PathBuf, SetupError> {
    if let Ok(path) = env::var("SHOPFRONT_STORE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("dev", "shopfront", "shopfront")
        .ok_or(SetupError::NoDataDir)?;

    Ok(proj_dirs.data_dir().join("shopfront.json"))
}
