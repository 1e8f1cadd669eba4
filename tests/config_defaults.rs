use questline::config::Config;
use tempfile::tempdir;

#[test]
fn load_reads_sections() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("questline.toml");
    std::fs::write(
        &path,
        r#"
[game]
save_dir = "/tmp/questline-saves"
heal_amount = 15

[grid]
size = 6
respawn_count = 3

[logging]
level = "debug"
"#,
    )
    .unwrap();
    let config = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.game.save_dir, "/tmp/questline-saves");
    assert_eq!(config.game.heal_amount, 15);
    assert_eq!(config.game.starting_gold, 100);
    assert_eq!(config.grid.size, 6);
    assert_eq!(config.grid.respawn_count, 3);
    assert_eq!(config.grid.wandering_monsters, 1);
    assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);
    assert_eq!(config.logging.file.as_deref(), Some("questline.log"));
}

#[test]
fn logging_section_keys_are_optional() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("questline.toml");
    std::fs::write(&path, "[logging]\nfile = \"q.log\"\n").unwrap();
    let config = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file.as_deref(), Some("q.log"));

    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
    let config = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.logging.level_filter(), log::LevelFilter::Warn);
    assert_eq!(config.logging.file.as_deref(), Some("questline.log"));

    std::fs::write(&path, "[logging]\nfile = \"\"\n").unwrap();
    let config = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.logging.log_file(), None);
}

#[test]
fn broken_toml_is_an_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("bad.toml");
    std::fs::write(&path, "[game\nsize = ").unwrap();
    assert!(Config::load(path.to_str().unwrap()).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(Config::load(tmp.path().join("nope.toml").to_str().unwrap()).is_err());
}
