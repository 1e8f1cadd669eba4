use questline::adventure::testing::ScriptedPrompter;
use questline::adventure::{LoadSource, MenuChoice, Session, TurnResult};
use questline::config::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn settings(dir: &std::path::Path) -> GameConfig {
    GameConfig {
        save_dir: dir.to_string_lossy().into_owned(),
        ..GameConfig::default()
    }
}

#[test]
fn buy_equip_save_and_reload() {
    let tmp = tempdir().unwrap();
    let mut session = Session::new("Mira", settings(tmp.path())).unwrap();
    assert_eq!(session.load().0, LoadSource::NotFound);

    let mut rng = StdRng::seed_from_u64(11);
    // Shop -> Sword, Inventory -> equip Sword, Save and quit.
    let mut io = ScriptedPrompter::new(["3", "1", "4", "Sword", "5"]);
    assert_eq!(session.run(&mut io, &mut rng), TurnResult::Quit);
    assert_eq!(session.player.gold, 50);
    assert_eq!(session.player.weapon_bonus(), 5);

    let mut reloaded = Session::new("Mira", settings(tmp.path())).unwrap();
    let (source, notice) = reloaded.load();
    assert_eq!(source, LoadSource::Loaded);
    assert!(notice.starts_with("Game loaded from"));
    assert_eq!(reloaded.player, session.player);
}

#[test]
fn end_of_input_saves_and_quits() {
    let tmp = tempdir().unwrap();
    let mut session = Session::new("Mira", settings(tmp.path())).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut io = ScriptedPrompter::new(["2"]);
    assert_eq!(session.run(&mut io, &mut rng), TurnResult::Quit);
    assert!(session.save_path.exists());
}

#[test]
fn defeat_ends_the_game_without_saving() {
    let tmp = tempdir().unwrap();
    let mut session = Session::new("Mira", settings(tmp.path())).unwrap();
    session.player.hp = 1;
    let mut rng = StdRng::seed_from_u64(5);
    let mut io = ScriptedPrompter::new(vec!["1"; 50]);
    let mut result = TurnResult::Continue;
    // Every species hits for at least 2, so the first counter-attack is fatal.
    for _ in 0..20 {
        result = session.handle_choice(MenuChoice::Fight, &mut io, &mut rng);
        if result != TurnResult::Continue {
            break;
        }
    }
    assert_eq!(result, TurnResult::GameOver);
    assert_eq!(session.player.hp, 0);
    assert!(!session.save_path.exists());
}

#[test]
fn starting_stats_come_from_settings() {
    let tmp = tempdir().unwrap();
    let custom = GameConfig {
        starting_gold: 7,
        starting_hp: 9,
        ..settings(tmp.path())
    };
    let mut session = Session::new("Mira", custom).unwrap();
    session.load();
    assert_eq!(session.player.gold, 7);
    assert_eq!(session.player.hp, 9);
}
