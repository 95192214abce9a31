//! # Host Environment
//!
//! The app never reaches for ambient globals; everything the browser
//! would provide (location hash, hashchange events, the snackbar element,
//! the document to render into) is behind the [`Host`] trait and injected
//! at construction. Swapping in [`SimHost`] gives tests a fully
//! observable environment.
//!
//! ## Event Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Hash-Change Delivery                               │
//! │                                                                         │
//! │  navigate("cart")                                                       │
//! │       │                                                                 │
//! │       ├── location becomes  https://…/#cart                             │
//! │       │                                                                 │
//! │       └── HashChangeEvent ──► channel ──► App::process_events()         │
//! │                                                                         │
//! │  replace_hash("shop")                                                   │
//! │       │                                                                 │
//! │       └── location becomes  https://…/#shop   (NO event - replace       │
//! │                                                semantics)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers run to completion before the next event is dispatched; there
//! is exactly one subscriber (the controller) at a time.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

// =============================================================================
// Events
// =============================================================================

/// A navigation hash change, shaped like the browser event.
///
/// `new_url` may be absent; the controller treats that as "nothing to
/// route" and returns without effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChangeEvent {
    /// The location after the change, e.g. `https://shop.example/#cart`.
    pub new_url: Option<String>,

    /// The location before the change.
    pub old_url: Option<String>,
}

impl HashChangeEvent {
    pub fn new(new_url: impl Into<String>, old_url: impl Into<String>) -> Self {
        HashChangeEvent {
            new_url: Some(new_url.into()),
            old_url: Some(old_url.into()),
        }
    }
}

// =============================================================================
// Host Traits
// =============================================================================

/// A transient, non-blocking notification surface (the snackbar).
pub trait NotificationHost {
    /// Shows a toast message.
    fn show(&mut self, message: &str);
}

/// The injected host environment.
///
/// One implementation per runtime: [`TerminalHost`] for the interactive
/// binary, [`SimHost`] for tests and headless use.
pub trait Host {
    /// Current location, including any `#fragment`.
    fn location(&self) -> String;

    /// Rewrites the location fragment WITHOUT emitting a hash-change
    /// event (history-replace semantics). Used to establish the
    /// canonical entry point on startup.
    fn replace_hash(&mut self, fragment: &str);

    /// Rewrites the location fragment and emits a hash-change event to
    /// the subscriber, if any.
    fn navigate(&mut self, fragment: &str);

    /// Registers the (single) hash-change subscriber and returns the
    /// receiving end. A second subscription replaces the first.
    fn subscribe_hash_changes(&mut self) -> Receiver<HashChangeEvent>;

    /// Releases the hash-change subscription. Releasing when nothing is
    /// subscribed is a no-op, as in the browser listener model.
    fn unsubscribe_hash_changes(&mut self);

    /// The notification surface, when the host has one. `None` models a
    /// page without a snackbar element: toasts silently drop.
    fn notifications(&mut self) -> Option<&mut dyn NotificationHost>;

    /// Renders a view's frame into the named region of the document
    /// surface.
    fn present(&mut self, region: &str, frame: &str);
}

/// Replaces the `#fragment` of a location string.
fn with_fragment(location: &str, fragment: &str) -> String {
    let base = match location.find('#') {
        Some(index) => &location[..index],
        None => location,
    };
    format!("{base}#{fragment}")
}

// =============================================================================
// SimHost
// =============================================================================

/// Recording snackbar used by [`SimHost`].
#[derive(Debug, Default)]
pub struct RecordingSnackbar {
    messages: Vec<String>,
}

impl NotificationHost for RecordingSnackbar {
    fn show(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// In-memory host for tests and headless runs.
///
/// Records every presented frame and every toast so assertions can read
/// back exactly what the user would have seen.
#[derive(Debug)]
pub struct SimHost {
    location: String,
    subscriber: Option<Sender<HashChangeEvent>>,
    snackbar: Option<RecordingSnackbar>,
    frames: Vec<(String, String)>,
}

impl SimHost {
    /// A host with a notification surface.
    pub fn new() -> Self {
        SimHost {
            location: "https://shop.example/".to_string(),
            subscriber: None,
            snackbar: Some(RecordingSnackbar::default()),
            frames: Vec::new(),
        }
    }

    /// A host WITHOUT a notification surface; toasts become no-ops.
    pub fn without_notifications() -> Self {
        SimHost {
            snackbar: None,
            ..SimHost::new()
        }
    }

    /// Toasts shown so far (empty when the surface is absent).
    pub fn toasts(&self) -> &[String] {
        self.snackbar
            .as_ref()
            .map(|s| s.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Every `(region, frame)` presented so far, in order.
    pub fn frames(&self) -> &[(String, String)] {
        &self.frames
    }

    /// The most recent frame presented into `region`.
    pub fn last_frame(&self, region: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find(|(r, _)| r == region)
            .map(|(_, f)| f.as_str())
    }

    /// Number of times `region` has been presented.
    pub fn present_count(&self, region: &str) -> usize {
        self.frames.iter().filter(|(r, _)| r == region).count()
    }
}

impl Default for SimHost {
    fn default() -> Self {
        SimHost::new()
    }
}

impl Host for SimHost {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn replace_hash(&mut self, fragment: &str) {
        self.location = with_fragment(&self.location, fragment);
    }

    fn navigate(&mut self, fragment: &str) {
        let old_url = self.location.clone();
        self.location = with_fragment(&self.location, fragment);

        if let Some(subscriber) = &self.subscriber {
            let event = HashChangeEvent::new(self.location.clone(), old_url);
            if subscriber.send(event).is_err() {
                debug!("hash-change subscriber went away");
            }
        }
    }

    fn subscribe_hash_changes(&mut self) -> Receiver<HashChangeEvent> {
        let (tx, rx) = unbounded();
        self.subscriber = Some(tx);
        rx
    }

    fn unsubscribe_hash_changes(&mut self) {
        self.subscriber = None;
    }

    fn notifications(&mut self) -> Option<&mut dyn NotificationHost> {
        self.snackbar
            .as_mut()
            .map(|s| s as &mut dyn NotificationHost)
    }

    fn present(&mut self, region: &str, frame: &str) {
        self.frames.push((region.to_string(), frame.to_string()));
    }
}

// =============================================================================
// TerminalHost
// =============================================================================

/// Snackbar that prints toast lines to stdout.
#[derive(Debug, Default)]
pub struct TerminalSnackbar;

impl NotificationHost for TerminalSnackbar {
    fn show(&mut self, message: &str) {
        println!("  [toast] {message}");
    }
}

/// Host for the interactive binary: frames and toasts go to stdout.
#[derive(Debug)]
pub struct TerminalHost {
    location: String,
    subscriber: Option<Sender<HashChangeEvent>>,
    snackbar: TerminalSnackbar,
}

impl TerminalHost {
    pub fn new() -> Self {
        TerminalHost {
            location: "app://shopfront/".to_string(),
            subscriber: None,
            snackbar: TerminalSnackbar,
        }
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        TerminalHost::new()
    }
}

impl Host for TerminalHost {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn replace_hash(&mut self, fragment: &str) {
        self.location = with_fragment(&self.location, fragment);
    }

    fn navigate(&mut self, fragment: &str) {
        let old_url = self.location.clone();
        self.location = with_fragment(&self.location, fragment);

        if let Some(subscriber) = &self.subscriber {
            let event = HashChangeEvent::new(self.location.clone(), old_url);
            if subscriber.send(event).is_err() {
                debug!("hash-change subscriber went away");
            }
        }
    }

    fn subscribe_hash_changes(&mut self) -> Receiver<HashChangeEvent> {
        let (tx, rx) = unbounded();
        self.subscriber = Some(tx);
        rx
    }

    fn unsubscribe_hash_changes(&mut self) {
        self.subscriber = None;
    }

    fn notifications(&mut self) -> Option<&mut dyn NotificationHost> {
        Some(&mut self.snackbar)
    }

    fn present(&mut self, region: &str, frame: &str) {
        println!("--- {region} ---");
        println!("{frame}");
    }
}
