//! Shared setup for the end-to-end suites: a shop whose JSON stores live in
//! a fresh temp directory, optionally pre-seeded with the demo catalog and
//! one registered user.

use std::path::PathBuf;

use tempfile::TempDir;

use coinop_cli::checkout;
use coinop_cli::seed;
use coinop_cli::store::Stores;
use coinop_common::user::User;

pub struct TestShop {
    /// Keeps the store directory alive for the duration of the test.
    pub dir: TempDir,
    pub stores: Stores,
}

impl TestShop {
    /// A shop with empty stores in a fresh temp directory.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let stores = Stores::json(dir.path());
        TestShop { dir, stores }
    }

    /// A shop with the demo catalog and one registered user.
    pub fn seeded() -> (Self, User) {
        let shop = Self::empty();
        seed::write_demo_catalog(&shop.stores).expect("seed catalog");
        let user = checkout::register_user(&shop.stores, "Ada Lovelace", "5551234")
            .expect("register user");
        (shop, user)
    }

    /// Path of one store file inside the shop's directory.
    pub fn store_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// A second `Stores` over the same directory, as a fresh process would
    /// build it.
    pub fn reopen(&self) -> Stores {
        Stores::json(self.dir.path())
    }
}
