//! One-shot flash messages.
//!
//! Flash messages are written on one request, carried to the client in an
//! encrypted cookie, and consumed on the next request. Whether or not the
//! next request reads them, the cookie is cleared — a message survives
//! exactly one round trip.

use std::collections::BTreeMap;

/// Name of the cookie carrying the flash payload.
pub(crate) const COOKIE_NAME: &str = "wicket-flash";

/// The per-request flash store.
///
/// `incoming` holds messages set by the previous request; reads drain it.
/// `outgoing` collects messages for the next request and is turned into a
/// `Set-Cookie` header by the dispatcher.
#[derive(Default)]
pub struct Flash {
    incoming: BTreeMap<String, String>,
    outgoing: BTreeMap<String, String>,
    cookie_present: bool,
}

/// What the response must do to the flash cookie.
pub(crate) enum FlashChange {
    /// Set the cookie to the serialized outgoing messages.
    Set(String),
    /// Remove the cookie; the incoming messages are spent.
    Clear,
    /// Leave the cookie alone.
    None,
}

impl Flash {
    /// Install the messages decoded from the incoming cookie.
    pub(crate) fn load(&mut self, entries: BTreeMap<String, String>) {
        self.cookie_present = true;
        self.incoming = entries;
    }

    /// Takes the message stored under `name` by the previous request.
    pub fn get(&mut self, name: &str) -> Option<String> {
        self.incoming.remove(name)
    }

    /// Takes every incoming message.
    pub fn take_all(&mut self) -> BTreeMap<String, String> {
        std::mem::take(&mut self.incoming)
    }

    /// Stores a message for the next request.
    pub fn set(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.outgoing.insert(name.into(), message.into());
    }

    /// Returns `true` if no incoming messages remain.
    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }

    pub(crate) fn change(&self) -> FlashChange {
        if !self.outgoing.is_empty() {
            match serde_json::to_string(&self.outgoing) {
                Ok(payload) => FlashChange::Set(payload),
                Err(_) => FlashChange::None,
            }
        } else if self.cookie_present {
            FlashChange::Clear
        } else {
            FlashChange::None
        }
    }
}
