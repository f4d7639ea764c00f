//! The purchase workflow: select a user, pick and customize a machine,
//! attach games, price, commit.
//!
//! The flow is encoded in types. A [`Checkout`] has a buyer but no machine;
//! [`Checkout::select_machine`] turns it into an [`Order`], and
//! [`Order::finalize`] consumes the order, so a purchase can neither skip a
//! step nor be committed twice.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use coinop_common::game::{Game, GameId};
use coinop_common::machine::{Machine, MachineId, Material};
use coinop_common::purchase::Purchase;
use coinop_common::user::{next_user_id, User, UserId};
use coinop_common::validate::ValidationError;

use crate::store::{StoreError, Stores};

/// Everything that can go wrong inside the shop workflow. All of it is
/// recoverable: the shell reports the error and returns to the menu.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no user with id {0}")]
    UnknownUser(UserId),
    #[error("no machine with code {0}")]
    UnknownMachine(MachineId),
    #[error("no game with code {0}")]
    UnknownGame(GameId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate and register a new user. Ids are assigned one past the highest
/// id in use, so they are never reassigned across restarts.
pub fn register_user(stores: &Stores, name: &str, phone: &str) -> Result<User, ShopError> {
    let mut users = stores.users.load()?;
    let user = User::new(next_user_id(&users), name, phone)?;
    users.push(user.clone());
    stores.users.save(&users)?;
    info!("registered user {} ({})", user.id, user.name);
    Ok(user)
}

/// A checkout with the buyer identified but no machine chosen yet.
pub struct Checkout<'a> {
    stores: &'a Stores,
    user: User,
}

impl<'a> Checkout<'a> {
    /// Start a checkout for an existing user. Nothing is written; an
    /// unknown id leaves every store untouched.
    pub fn begin(stores: &'a Stores, user_id: UserId) -> Result<Self, ShopError> {
        let user = stores
            .users
            .load()?
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or(ShopError::UnknownUser(user_id))?;
        Ok(Checkout { stores, user })
    }

    /// Pick a machine from the catalog. The order works on a copy of the
    /// template; the catalog entry itself is never modified.
    pub fn select_machine(self, code: &MachineId) -> Result<Order<'a>, ShopError> {
        let machine = self
            .stores
            .machines
            .load()?
            .into_iter()
            .find(|m| &m.id == code)
            .ok_or_else(|| ShopError::UnknownMachine(code.clone()))?;
        Ok(Order {
            stores: self.stores,
            user: self.user,
            machine,
        })
    }
}

/// A machine chosen and under customization. Consumed by [`Order::finalize`].
pub struct Order<'a> {
    stores: &'a Stores,
    user: User,
    machine: Machine,
}

impl Order<'_> {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Swap the material. The specs re-derive from the factory table for
    /// the machine's line rather than compounding on the current values.
    pub fn set_material(&mut self, material: Material) {
        self.machine.set_material(material);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.machine.color = color.into();
    }

    pub fn set_player_count(&mut self, player_count: u32) -> Result<(), ShopError> {
        if player_count == 0 {
            return Err(ValidationError::InvalidPlayerCount.into());
        }
        self.machine.player_count = player_count;
        Ok(())
    }

    /// Attach a catalog game by code and return its title. An unknown code
    /// leaves the order exactly as it was.
    pub fn attach_game(&mut self, code: &GameId) -> Result<String, ShopError> {
        let game: Game = self
            .stores
            .games
            .load()?
            .into_iter()
            .find(|g| &g.id == code)
            .ok_or_else(|| ShopError::UnknownGame(code.clone()))?;
        let title = game.title.clone();
        self.machine.add_game(game);
        Ok(title)
    }

    /// Current total: adjusted cabinet price plus each attached game's
    /// already-final price, once.
    pub fn total_price(&self) -> f64 {
        self.machine.total_price()
    }

    /// Commit the purchase: snapshot the configured machine, stamp it, and
    /// append it to the log. An order with no games is a valid purchase and
    /// records an empty `games_added` list.
    pub fn finalize(self, address: &str) -> Result<Purchase, ShopError> {
        let purchase = Purchase::new(self.user.id, address, &self.machine, Utc::now());
        self.stores.purchases.append(purchase.clone())?;
        info!(
            "recorded purchase of {} for user {} at {:.2}",
            self.machine.id, self.user.id, purchase.total_price
        );
        Ok(purchase)
    }
}

/// Leave a review on a catalog game. The reviewer must exist; the review
/// itself is appended unconditionally.
pub fn add_review(
    stores: &Stores,
    user_id: UserId,
    code: &GameId,
    text: &str,
) -> Result<(), ShopError> {
    if !stores.users.load()?.iter().any(|u| u.id == user_id) {
        return Err(ShopError::UnknownUser(user_id));
    }
    let mut games = stores.games.load()?;
    let game = games
        .iter_mut()
        .find(|g| &g.id == code)
        .ok_or_else(|| ShopError::UnknownGame(code.clone()))?;
    game.add_review(user_id, text);
    stores.games.save(&games)?;
    Ok(())
}

/// All purchases recorded for one user, oldest first.
pub fn purchase_history(stores: &Stores, user_id: UserId) -> Result<Vec<Purchase>, ShopError> {
    Ok(stores
        .purchases
        .load()?
        .into_iter()
        .filter(|p| p.user_id == user_id)
        .collect())
}
