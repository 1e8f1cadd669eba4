use questline::adventure::testing::ScriptedPrompter;
use questline::adventure::{
    attack_round, equip, fight_monster, find_magic_potion, random_monster, species_named, Effect,
    FightOutcome, Item, Monster, PlayerState, MAGIC_POTION,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn goblin() -> Monster {
    Monster {
        name: "A goblin".into(),
        description: "A lonely goblin that attacks quickly with a dagger.".into(),
        health: 40,
        power: 7,
        money: Some(33.75),
    }
}

#[test]
fn attack_and_counter_deltas() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut player = PlayerState::default();
    player.inventory.push(Item::weapon("Sword", 50, 5, 50).unwrap());
    equip(&mut player, "Sword");
    let monster = goblin();
    let mut monster_hp = 1_000;
    for _ in 0..20 {
        let hp_before = player.hp;
        let round = attack_round(&monster, monster_hp, &mut player, &mut rng);
        let dealt = monster_hp - round.monster_hp;
        assert!((6..=10).contains(&dealt), "1d5 + 5, got {}", dealt);
        assert_eq!(player.hp, hp_before - 7);
        monster_hp = round.monster_hp;
        player.hp = 30;
    }
}

#[test]
fn magic_potion_wins_once() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut player = PlayerState::default();
    player
        .inventory
        .push(Item::consumable(MAGIC_POTION, 75, Effect::Vanquish).unwrap());

    let mut io = ScriptedPrompter::new(["y"]);
    let outcome = fight_monster(&goblin(), &mut player, &mut io, &mut rng);
    assert_eq!(outcome, FightOutcome::PotionVictory { reward: 33 });
    assert_eq!(player.hp, 30);
    assert_eq!(player.gold, 133);
    assert!(player.inventory[0].is_consumed());
    assert!(find_magic_potion(&player).is_none());

    // No potion left: straight to the action prompt.
    let mut io = ScriptedPrompter::new(["2"]);
    let outcome = fight_monster(&goblin(), &mut player, &mut io, &mut rng);
    assert_eq!(outcome, FightOutcome::Fled);
    assert!(!io.saw("Magic Potion"));
}

#[test]
fn accepting_spends_every_magic_potion() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut player = PlayerState::default();
    for _ in 0..2 {
        player
            .inventory
            .push(Item::consumable(MAGIC_POTION, 75, Effect::Vanquish).unwrap());
    }
    let mut io = ScriptedPrompter::new(["Y"]);
    let outcome = fight_monster(&goblin(), &mut player, &mut io, &mut rng);
    assert!(matches!(outcome, FightOutcome::PotionVictory { .. }));
    assert!(player.inventory.iter().all(|i| i.is_consumed()));
    assert!(find_magic_potion(&player).is_none());

    // The next fight goes straight to the action prompt.
    let mut io = ScriptedPrompter::new(["y", "2"]);
    let outcome = fight_monster(&goblin(), &mut player, &mut io, &mut rng);
    assert_eq!(outcome, FightOutcome::Fled);
    assert!(!io.saw("Magic Potion"));
}

#[test]
fn fights_against_random_monsters_end() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..30 {
        let monster = random_monster(&mut rng);
        assert!(species_named(&monster.name).is_some());
        let mut player = PlayerState::default();
        let mut io = ScriptedPrompter::new(vec!["1"; 200]);
        let outcome = fight_monster(&monster, &mut player, &mut io, &mut rng);
        match outcome {
            FightOutcome::Victory { reward } => {
                assert!(player.hp > 0);
                assert_eq!(player.gold, 100 + reward);
            }
            FightOutcome::Defeat => assert_eq!(player.hp, 0),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn sword_breaks_mid_fight() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut player = PlayerState::new(0, 1_000);
    player.inventory.push(Item::weapon("Twig Sword", 1, 1, 2).unwrap());
    equip(&mut player, "Twig Sword");
    let monster = Monster {
        health: 500,
        power: 1,
        ..goblin()
    };
    let mut io = ScriptedPrompter::new(["1", "1", "1", "2"]);
    fight_monster(&monster, &mut player, &mut io, &mut rng);
    assert!(io.saw("Your Twig Sword breaks!"));
    assert!(player.inventory.is_empty());
    assert!(player.equipped_item().is_none());
}
