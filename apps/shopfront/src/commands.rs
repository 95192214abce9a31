//! # Commands
//!
//! The user-interaction surface: the page's click handlers, expressed as
//! parsed input lines driving the same wiring.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Command Flow                                     │
//! │                                                                         │
//! │  input line ──► Command::parse ──► apply                                │
//! │                                      │                                  │
//! │          navigation (shop/cart/pay/go) ──► host.navigate ──┐            │
//! │          cart ops (add/qty/rm/clear) ─────► SharedCart ────┤            │
//! │                                                            ▼            │
//! │                                            App::process_events          │
//! │                                            (routing + change relay)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Domain errors (unknown SKU, quantity limits) surface as messages to
//! the user; they never reach the controller's routing logic.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use shopfront_core::catalog::find_by_sku;
use shopfront_core::{CoreError, Product};

use crate::app::App;
use crate::host::Host;

/// Help text printed on startup and on `help`.
pub const HELP: &str = "\
commands:
  shop | cart | pay     switch view
  go <fragment>         navigate to an arbitrary hash fragment
  add <sku> [qty]       add a product to the cart
  qty <sku> <n>         set a line's quantity (0 removes)
  rm <sku>              remove a line
  clear                 empty the cart
  show                  re-render the visible views
  help                  show this text
  quit                  leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a hash fragment (the address-bar analog). Unknown
    /// fragments flow through the controller's no-op path.
    Go(String),
    Add { sku: String, quantity: i64 },
    SetQuantity { sku: String, quantity: i64 },
    Remove { sku: String },
    Clear,
    Show,
    Help,
    Quit,
}

/// Why an input line could not be parsed or applied.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid quantity")]
    BadQuantity(String),

    #[error(transparent)]
    Cart(#[from] CoreError),
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            // bare view names are navigation shortcuts
            "shop" | "cart" | "pay" => Command::Go(word.to_ascii_lowercase()),
            "go" => {
                let fragment = words.next().ok_or(CommandError::Usage("go <fragment>"))?;
                Command::Go(fragment.to_string())
            }
            "add" => {
                let sku = words.next().ok_or(CommandError::Usage("add <sku> [qty]"))?;
                let quantity = match words.next() {
                    Some(raw) => parse_quantity(raw)?,
                    None => 1,
                };
                Command::Add {
                    sku: sku.to_string(),
                    quantity,
                }
            }
            "qty" => {
                let sku = words.next().ok_or(CommandError::Usage("qty <sku> <n>"))?;
                let raw = words.next().ok_or(CommandError::Usage("qty <sku> <n>"))?;
                Command::SetQuantity {
                    sku: sku.to_string(),
                    quantity: parse_quantity(raw)?,
                }
            }
            "rm" | "remove" => {
                let sku = words.next().ok_or(CommandError::Usage("rm <sku>"))?;
                Command::Remove {
                    sku: sku.to_string(),
                }
            }
            "clear" => Command::Clear,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_quantity(raw: &str) -> Result<i64, CommandError> {
    raw.parse::<i64>()
        .map_err(|_| CommandError::BadQuantity(raw.to_string()))
}

/// Applies a parsed command to the running app.
///
/// Mutations and navigation only enqueue work; the caller drains it with
/// `App::process_events` afterwards, exactly like the host event loop.
pub fn apply(
    app: &mut App,
    host: &Rc<RefCell<dyn Host>>,
    catalog: &[Product],
    command: &Command,
) -> Result<Flow, CommandError> {
    debug!(?command, "applying command");

    match command {
        Command::Go(fragment) => {
            host.borrow_mut().navigate(fragment);
        }
        Command::Add { sku, quantity } => {
            let product =
                find_by_sku(catalog, sku).ok_or_else(|| CoreError::UnknownProduct(sku.clone()))?;
            app.cart().add(product, *quantity)?;
        }
        Command::SetQuantity { sku, quantity } => {
            app.cart().set_quantity(sku, *quantity)?;
        }
        Command::Remove { sku } => {
            app.cart().remove(sku)?;
        }
        Command::Clear => {
            app.cart().clear();
        }
        Command::Show => {
            app.render_visible();
        }
        Command::Help => {
            println!("{HELP}");
        }
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;
    use crate::views::View;
    use shopfront_core::catalog::demo_catalog;
    use shopfront_store::{KeyValueStore, MemoryStore};

    fn fixture() -> (App, Rc<RefCell<SimHost>>, Vec<Product>) {
        let sim = Rc::new(RefCell::new(SimHost::new()));
        let host: Rc<RefCell<dyn Host>> = sim.clone();
        let storage: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut app = App::new(host, storage);
        app.install();
        app.run();
        app.process_events();
        (app, sim, demo_catalog())
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("cart").unwrap(),
            Some(Command::Go("cart".to_string()))
        );
        assert_eq!(
            Command::parse("go checkout").unwrap(),
            Some(Command::Go("checkout".to_string()))
        );
        assert_eq!(
            Command::parse("add BEV-1").unwrap(),
            Some(Command::Add {
                sku: "BEV-1".to_string(),
                quantity: 1
            })
        );
        assert_eq!(
            Command::parse("add BEV-1 3").unwrap(),
            Some(Command::Add {
                sku: "BEV-1".to_string(),
                quantity: 3
            })
        );
        assert_eq!(
            Command::parse("qty BEV-1 0").unwrap(),
            Some(Command::SetQuantity {
                sku: "BEV-1".to_string(),
                quantity: 0
            })
        );
        assert_eq!(Command::parse("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(Command::parse("add"), Err(CommandError::Usage(_))));
        assert!(matches!(
            Command::parse("add BEV-1 lots"),
            Err(CommandError::BadQuantity(_))
        ));
        assert!(matches!(Command::parse("go"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_navigation_command_switches_views() {
        let (mut app, sim, catalog) = fixture();
        let host: Rc<RefCell<dyn Host>> = sim.clone();

        apply(&mut app, &host, &catalog, &Command::Go("cart".to_string())).unwrap();
        app.process_events();

        assert!(app.cart_view().visible());
        assert!(!app.shop_view().visible());
    }

    #[test]
    fn test_unknown_fragment_keeps_prior_view() {
        let (mut app, sim, catalog) = fixture();
        let host: Rc<RefCell<dyn Host>> = sim.clone();

        apply(
            &mut app,
            &host,
            &catalog,
            &Command::Go("checkout".to_string()),
        )
        .unwrap();
        app.process_events();

        // still on the shop from run()
        assert!(app.shop_view().visible());
    }

    #[test]
    fn test_add_command_updates_cart_and_toasts() {
        let (mut app, sim, catalog) = fixture();
        let host: Rc<RefCell<dyn Host>> = sim.clone();

        apply(
            &mut app,
            &host,
            &catalog,
            &Command::Add {
                sku: "BEV-1".to_string(),
                quantity: 2,
            },
        )
        .unwrap();
        app.process_events();

        assert_eq!(app.cart().count(), 2);
        assert_eq!(sim.borrow().toasts(), ["Cart updated"]);
    }

    #[test]
    fn test_add_unknown_sku_is_reported() {
        let (mut app, sim, catalog) = fixture();
        let host: Rc<RefCell<dyn Host>> = sim.clone();

        let err = apply(
            &mut app,
            &host,
            &catalog,
            &Command::Add {
                sku: "MISSING".to_string(),
                quantity: 1,
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Cart(CoreError::UnknownProduct(_))
        ));
        assert!(app.cart().is_empty());
    }

    #[test]
    fn test_quit_stops_flow() {
        let (mut app, sim, catalog) = fixture();
        let host: Rc<RefCell<dyn Host>> = sim.clone();

        let flow = apply(&mut app, &host, &catalog, &Command::Quit).unwrap();
        assert_eq!(flow, Flow::Quit);
    }
}
