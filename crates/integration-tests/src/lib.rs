//! Integration tests for Falcons Nest.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p falcons-nest-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survives restarts through the file store
//! - `checkout_flow` - Browse, edit, check out, start over
//!
//! Each test gets its own temporary data directory, so tests run in parallel
//! without sharing a cart slot.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use falcons_nest_core::{ItemName, Money};
use falcons_nest_storefront::{CartPersistence, CartSession, FileStore, StoreConfig};
use tempfile::TempDir;

/// A scratch data directory and the config pointing at it.
pub struct TestContext {
    dir: TempDir,
    pub config: StoreConfig,
}

impl TestContext {
    /// Create a context with a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StoreConfig {
            data_dir: dir.path().to_path_buf(),
            ..StoreConfig::default()
        };
        Self { dir, config }
    }

    /// Root of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the saved cart file.
    #[must_use]
    pub fn slot_path(&self) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.json", self.config.cart_key))
    }

    /// Open a session the way the storefront does on page load.
    pub async fn open_session(&self) -> CartSession<FileStore> {
        let persistence =
            CartPersistence::with_key(self.config.file_store(), self.config.cart_key.clone());
        CartSession::open(persistence).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Product name fixture.
///
/// # Panics
///
/// Panics if `name` is blank.
#[must_use]
#[allow(clippy::expect_used)]
pub fn name(name: &str) -> ItemName {
    ItemName::parse(name).expect("fixture names are not blank")
}

/// Price fixture in whole dollars.
#[must_use]
pub const fn dollars(amount: u64) -> Money {
    Money::from_cents(amount * 100)
}
