//! Store-level behavior over real files: round-trip fidelity, tolerant
//! reads, full-overwrite writes.

use std::fs;

use coinop_cli_integration::harness::TestShop;
use coinop_common::game::{Game, GameEdition, GameId};
use coinop_common::machine::{Machine, MachineId, MachineKind, Material};
use coinop_common::user::{User, UserId};

#[test]
fn user_roundtrip_for_zero_one_and_many() {
    let shop = TestShop::empty();
    for n in [0u32, 1, 25] {
        let users: Vec<User> = (1..=n)
            .map(|i| User::new(UserId(i), "Ada", "5551234").unwrap())
            .collect();
        shop.stores.users.save(&users).unwrap();
        assert_eq!(shop.reopen().users.load().unwrap(), users);
    }
}

#[test]
fn machine_roundtrip_keeps_derived_specs_and_games() {
    let shop = TestShop::empty();
    let mut machine = Machine::new(
        MachineId("M1".into()),
        MachineKind::VirtualReality,
        Material::CarbonFiber,
        "white",
        1,
    );
    machine.add_game(Game::new(
        GameId("G1".into()),
        "Neon Drift",
        "racing",
        GameEdition::HighDefinition,
        50.0,
    ));
    shop.stores.machines.save(std::slice::from_ref(&machine)).unwrap();

    let loaded = shop.reopen().machines.load().unwrap();
    assert_eq!(loaded, vec![machine]);
}

#[test]
fn store_files_use_the_documented_field_names() {
    let (shop, _) = TestShop::seeded();
    let raw = fs::read_to_string(shop.store_path("machines.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    for key in [
        "machine_id",
        "type",
        "material",
        "color",
        "player_count",
        "dimensions",
        "weight",
        "power_consumption",
        "processor",
        "memory",
        "base_price",
        "games",
    ] {
        assert!(first.get(key).is_some(), "missing {key}:\n{first}");
    }

    let raw = fs::read_to_string(shop.store_path("users.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["id", "name", "phone"] {
        assert!(value[0].get(key).is_some(), "missing {key}");
    }
}

#[test]
fn absent_and_corrupt_stores_read_as_empty() {
    let shop = TestShop::empty();
    assert!(shop.stores.purchases.load().unwrap().is_empty());

    fs::write(shop.store_path("purchases.json"), "not json at all").unwrap();
    assert!(shop.stores.purchases.load().unwrap().is_empty());

    // A wrong-shape document is also tolerated on read.
    fs::write(shop.store_path("purchases.json"), "{\"a\": 1}").unwrap();
    assert!(shop.stores.purchases.load().unwrap().is_empty());
}

#[test]
fn games_store_accepts_previous_generation_records() {
    // Records written before the edition tag and credits existed.
    let shop = TestShop::empty();
    fs::write(
        shop.store_path("games.json"),
        r#"[
  {
    "game_id": "G1",
    "title": "Old Title",
    "category": "classic",
    "price": 10.0,
    "reviews": [{"user_id": 1, "text": "still fun"}]
  }
]"#,
    )
    .unwrap();

    let games = shop.stores.games.load().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].edition, GameEdition::Standard);
    assert_eq!(games[0].reviews[0].user_id, UserId(1));
}
