use questline::adventure::testing::ScriptedPrompter;
use questline::adventure::{
    buy, default_catalog, equip, format_catalog, visit_shop, wear_equipped, PlayerState,
    ShopOutcome, Wear,
};

#[test]
fn poor_player_cannot_buy_sword() {
    let catalog = default_catalog();
    let mut player = PlayerState::new(10, 30);
    let mut io = ScriptedPrompter::new(["1"]);
    let outcome = visit_shop(&mut player, &catalog, &mut io);
    assert!(matches!(outcome, ShopOutcome::NotEnoughGold { cost: 50, .. }));
    assert_eq!(player, PlayerState::new(10, 30));
    assert!(io.saw("Not enough gold to buy this item."));
}

#[test]
fn exact_gold_buys_and_empties_purse() {
    let catalog = default_catalog();
    let mut player = PlayerState::new(50, 30);
    assert!(matches!(
        buy(&mut player, &catalog, 0),
        ShopOutcome::Purchased { .. }
    ));
    assert_eq!(player.gold, 0);
    assert_eq!(player.inventory.len(), 1);
}

#[test]
fn purchase_is_a_copy_of_the_template() {
    let catalog = default_catalog();
    let mut player = PlayerState::new(500, 30);
    buy(&mut player, &catalog, 0);
    equip(&mut player, "Sword");
    wear_equipped(&mut player, Wear::Strike);
    assert_ne!(player.inventory[0], catalog[0]);
    assert_eq!(default_catalog()[0], catalog[0]);
}

#[test]
fn listing_is_one_based() {
    let listing = format_catalog(&default_catalog());
    let first = listing.lines().next().unwrap();
    assert_eq!(first, "1) Sword - Cost: 50 Gold");
    assert!(listing.contains("4) Magic Potion - Cost: 75 Gold"));
}
