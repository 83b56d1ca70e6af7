//! The persisted cart slot.
//!
//! # Layout
//!
//! Version 1 (current):
//!
//! ```json
//! {"version":1,"revision":7,"items":[{"name":"Hoodie","price":35.0,"image":"h.png","quantity":2,"size":"M"}]}
//! ```
//!
//! Version 0 is a bare array of items with the same fields. It has no version
//! or revision and is still accepted on load.
//!
//! Loading never fails: a missing, unreadable or malformed slot produces an
//! empty cart. Records that break cart invariants are repaired (quantities
//! clamped, duplicates merged) or dropped (blank names, bad prices).

use falcons_nest_core::{ItemName, LineItem, Money, Quantity, Size};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{KeyValueStore, StorageError};
use crate::cart::CartStore;

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "falconsNestCart";

/// Layout version written by [`CartPersistence::save`].
pub const SCHEMA_VERSION: u32 = 1;

/// Reads and writes a [`CartStore`] under a single key.
///
/// Saves are serialized, and a snapshot whose revision is older than the last
/// one written is skipped. A save issued after mutation N can therefore never
/// be overwritten by a save issued after mutation N-1, even when both are in
/// flight at once.
#[derive(Debug)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
    last_written: Mutex<Option<u64>>,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Persist under [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// Persist under a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            last_written: Mutex::new(None),
        }
    }

    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the full cart to the slot, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or the backend write
    /// fails. The slot keeps its previous value in that case.
    #[instrument(skip_all, fields(key = %self.key, revision = cart.revision()))]
    pub async fn save(&self, cart: &CartStore) -> Result<(), StorageError> {
        let mut last_written = self.last_written.lock().await;
        if let Some(last) = (*last_written).filter(|&last| cart.revision() < last) {
            debug!(last, "Skipping stale cart snapshot");
            return Ok(());
        }

        let payload = encode(cart)?;
        self.store.set(&self.key, &payload).await?;
        *last_written = Some(cart.revision());
        debug!(lines = cart.len(), "Saved cart");
        Ok(())
    }

    /// Read the cart from the slot.
    ///
    /// Missing or malformed state yields an empty cart; the problem is logged
    /// and never returned.
    #[instrument(skip_all, fields(key = %self.key))]
    pub async fn load(&self) -> CartStore {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved cart, starting empty");
                return CartStore::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read saved cart, starting empty");
                return CartStore::new();
            }
        };

        match decode(&raw) {
            Ok(cart) => {
                let mut last_written = self.last_written.lock().await;
                *last_written = Some(last_written.unwrap_or(0).max(cart.revision()));
                debug!(lines = cart.len(), revision = cart.revision(), "Loaded saved cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Discarding malformed saved cart");
                CartStore::new()
            }
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    revision: u64,
    items: &'a [LineItem],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned {
        version: u32,
        #[serde(default)]
        revision: u64,
        items: Vec<StoredLine>,
    },
    Legacy(Vec<StoredLine>),
}

/// A saved line before validation. Every field is optional or loosely typed
/// because older pages wrote `null` for quantities they failed to parse.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    size: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported cart layout version {0}")]
    UnsupportedVersion(u32),
}

fn encode(cart: &CartStore) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        revision: cart.revision(),
        items: cart.items(),
    })
}

fn decode(raw: &str) -> Result<CartStore, DecodeError> {
    let (revision, lines) = match serde_json::from_str::<StoredCart>(raw)? {
        StoredCart::Versioned {
            version,
            revision,
            items,
        } => {
            if version > SCHEMA_VERSION {
                return Err(DecodeError::UnsupportedVersion(version));
            }
            (revision, items)
        }
        StoredCart::Legacy(items) => (0, items),
    };

    let saved_lines = lines.len();
    let items: Vec<LineItem> = lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| repair_line(index, line))
        .collect();
    let cart = CartStore::from_items(items, revision);

    if cart.len() < saved_lines {
        warn!(
            saved = saved_lines,
            kept = cart.len(),
            "Saved cart had invalid or duplicate lines"
        );
    }
    Ok(cart)
}

fn repair_line(index: usize, line: StoredLine) -> Option<LineItem> {
    let Some(name) = line.name.and_then(|n| ItemName::try_from(n).ok()) else {
        warn!(index, "Dropping saved cart line without a name");
        return None;
    };

    let unit_price = match line.price.map(Money::from_f64) {
        Some(Ok(price)) => price,
        Some(Err(e)) => {
            warn!(index, %name, error = %e, "Dropping saved cart line with invalid price");
            return None;
        }
        None => {
            warn!(index, %name, "Dropping saved cart line without a price");
            return None;
        }
    };

    let (quantity, corrected) = match line.quantity {
        Some(q) if q.is_finite() => {
            #[allow(clippy::cast_possible_truncation)] // Saturating cast, clamped right after
            let whole = q.trunc() as i64;
            let quantity = Quantity::clamped(whole);
            (quantity, i64::from(quantity.get()) != whole || q.fract().abs() > 0.0)
        }
        _ => (Quantity::ONE, true),
    };
    if corrected {
        warn!(index, %name, saved = ?line.quantity, %quantity, "Corrected saved cart quantity");
    }

    Some(LineItem::new(
        name,
        unit_price,
        line.image.unwrap_or_default(),
        Size::new(line.size.unwrap_or_default()),
        quantity,
    ))
}
