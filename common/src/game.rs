use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Unique game code, as listed in the catalog.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GameId(pub String);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edition of a title. The high-definition cut carries a fixed 10% price
/// markup, folded in once when the game is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEdition {
    #[default]
    Standard,
    HighDefinition,
}

impl GameEdition {
    /// Multiplier applied to the base price at construction.
    pub fn price_markup(self) -> f64 {
        match self {
            GameEdition::Standard => 1.0,
            GameEdition::HighDefinition => 1.10,
        }
    }
}

/// A review left by a user. Append-only, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: UserId,
    pub text: String,
}

/// A catalog game.
///
/// `price` is final: for high-definition games it already includes the
/// edition markup, so downstream pricing must never re-apply it. The
/// creator/year fields only exist on newer catalog records; `edition`
/// defaults to standard for records that predate the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "game_id")]
    pub id: GameId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub edition: GameEdition,
    pub price: f64,
    #[serde(default)]
    pub storytelling_creator: Option<String>,
    #[serde(default)]
    pub graphics_creator: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Game {
    /// Create a game from a base price; the edition markup is folded into
    /// the stored price here and nowhere else.
    pub fn new(
        id: GameId,
        title: impl Into<String>,
        category: impl Into<String>,
        edition: GameEdition,
        base_price: f64,
    ) -> Self {
        Game {
            id,
            title: title.into(),
            category: category.into(),
            edition,
            price: base_price * edition.price_markup(),
            storytelling_creator: None,
            graphics_creator: None,
            year: None,
            reviews: Vec::new(),
        }
    }

    /// Attach the credits metadata carried by newer catalog records.
    pub fn with_credits(
        mut self,
        storytelling: impl Into<String>,
        graphics: impl Into<String>,
        year: u16,
    ) -> Self {
        self.storytelling_creator = Some(storytelling.into());
        self.graphics_creator = Some(graphics.into());
        self.year = Some(year);
        self
    }

    /// Append a review. Whether `user_id` names a real user is the caller's
    /// concern, not this entity's.
    pub fn add_review(&mut self, user_id: UserId, text: impl Into<String>) {
        self.reviews.push(Review {
            user_id,
            text: text.into(),
        });
    }
}
