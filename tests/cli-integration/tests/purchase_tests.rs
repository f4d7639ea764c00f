//! End-to-end purchase flow over real JSON stores.

use chrono::Utc;
use coinop_cli::checkout::{self, Checkout, ShopError};
use coinop_cli_integration::harness::TestShop;
use coinop_common::game::GameId;
use coinop_common::machine::{MachineId, Material};
use coinop_common::user::UserId;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn full_purchase_lands_in_the_log_file() {
    let (shop, user) = TestShop::seeded();

    let mut order = Checkout::begin(&shop.stores, user.id)
        .unwrap()
        .select_machine(&MachineId("M1".into()))
        .unwrap();
    order.set_material(Material::Aluminum);
    order.set_color("green");
    order.set_player_count(4).unwrap();
    order.attach_game(&GameId("G2".into())).unwrap();
    order.attach_game(&GameId("G1".into())).unwrap();
    let purchase = order.finalize("12 Main St").unwrap();

    // M1 is a ClassicalArcade (base 600) in aluminum, G2 is the HD title at
    // a final 55.0 and G1 the standard one at 20.0.
    assert!(close(purchase.total_price, 660.0 + 55.0 + 20.0));
    assert_eq!(purchase.machine.material, Material::Aluminum);
    assert_eq!(purchase.machine.color, "green");
    assert_eq!(purchase.machine.player_count, 4);

    // The record survives a reopen, as a fresh process would see it.
    let reopened = shop.reopen();
    let log = reopened.purchases.load().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], purchase);
    assert!(log[0].purchase_date <= Utc::now());
    assert!(shop.store_path("purchases.json").exists());
}

#[test]
fn snapshot_is_immune_to_later_catalog_edits() {
    let (shop, user) = TestShop::seeded();

    let mut order = Checkout::begin(&shop.stores, user.id)
        .unwrap()
        .select_machine(&MachineId("M1".into()))
        .unwrap();
    order.attach_game(&GameId("G1".into())).unwrap();
    let purchase = order.finalize("12 Main St").unwrap();

    // Reprice and retitle the catalog game after the purchase.
    let mut games = shop.stores.games.load().unwrap();
    games[0].price = 999.0;
    games[0].title = "Renamed".into();
    shop.stores.games.save(&games).unwrap();

    let log = shop.reopen().purchases.load().unwrap();
    assert_eq!(log[0], purchase);
    assert_eq!(log[0].machine.games_added, vec!["Asteroid Run".to_string()]);
    assert!(close(log[0].total_price, purchase.total_price));
}

#[test]
fn zero_game_purchase_records_an_empty_list() {
    let (shop, user) = TestShop::seeded();
    let purchase = Checkout::begin(&shop.stores, user.id)
        .unwrap()
        .select_machine(&MachineId("M5".into()))
        .unwrap()
        .finalize("12 Main St")
        .unwrap();
    assert!(purchase.machine.games_added.is_empty());
    assert_eq!(shop.reopen().purchases.load().unwrap().len(), 1);
}

#[test]
fn unknown_ids_fail_without_touching_the_stores() {
    let (shop, user) = TestShop::seeded();

    assert!(matches!(
        Checkout::begin(&shop.stores, UserId(99)),
        Err(ShopError::UnknownUser(_))
    ));
    assert!(matches!(
        Checkout::begin(&shop.stores, user.id)
            .unwrap()
            .select_machine(&MachineId("M9".into())),
        Err(ShopError::UnknownMachine(_))
    ));

    assert!(!shop.store_path("purchases.json").exists());
    assert_eq!(shop.stores.users.load().unwrap().len(), 1);
    assert_eq!(shop.stores.machines.load().unwrap().len(), 5);
}

#[test]
fn purchases_accumulate_across_reopens() {
    let (shop, user) = TestShop::seeded();

    Checkout::begin(&shop.stores, user.id)
        .unwrap()
        .select_machine(&MachineId("M1".into()))
        .unwrap()
        .finalize("first")
        .unwrap();

    // A second session over the same directory appends, never truncates.
    let second = shop.reopen();
    Checkout::begin(&second, user.id)
        .unwrap()
        .select_machine(&MachineId("M2".into()))
        .unwrap()
        .finalize("second")
        .unwrap();

    let history = checkout::purchase_history(&shop.reopen(), user.id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].address, "first");
    assert_eq!(history[1].address, "second");
    assert!(history[0].purchase_date <= history[1].purchase_date);
}

#[test]
fn reviews_persist_into_the_games_store() {
    let (shop, user) = TestShop::seeded();
    checkout::add_review(&shop.stores, user.id, &GameId("G3".into()), "cozy").unwrap();

    let games = shop.reopen().games.load().unwrap();
    let game = games.iter().find(|g| g.id == GameId("G3".into())).unwrap();
    assert_eq!(game.reviews.len(), 1);
    assert_eq!(game.reviews[0].user_id, user.id);
    assert_eq!(game.reviews[0].text, "cozy");
}
