use minefield::config::{MAX_HEIGHT, MAX_MINES_COUNT, MAX_WIDTH, MIN_HEIGHT, MIN_MINES_COUNT, MIN_WIDTH};
use minefield::{ConfigError, Error, GameConfig, GameMode, GameSession};

fn dims(c: &GameConfig) -> (usize, usize, usize) {
    (c.mines_count(), c.height(), c.width())
}

#[test]
fn presets_resolve_to_fixed_boards() {
    let easy = GameConfig::parse("easy", None, None, None).expect("easy");
    assert_eq!(dims(&easy), (10, 9, 9));
    let normal = GameConfig::parse("normal", None, None, None).expect("normal");
    assert_eq!(dims(&normal), (40, 16, 16));
    let hard = GameConfig::parse("hard", None, None, None).expect("hard");
    assert_eq!(dims(&hard), (99, 22, 22));
    assert_eq!(GameConfig::default(), easy);
    assert_eq!(GameMode::default(), GameMode::Easy);
}

#[test]
fn presets_ignore_custom_values() {
    let c = GameConfig::parse("normal", Some(5), Some(50), None).expect("normal");
    assert_eq!(dims(&c), (40, 16, 16));
}

#[test]
fn mode_names_are_case_insensitive() {
    assert_eq!("HARD".parse::<GameMode>(), Ok(GameMode::Hard));
    assert_eq!("Custom".parse::<GameMode>(), Ok(GameMode::Custom));
    assert_eq!(GameMode::Normal.to_string(), "normal");
}

#[test]
fn unknown_mode_is_rejected() {
    assert_eq!(GameConfig::parse("expert", None, None, None), Err(ConfigError::InvalidMode("expert".into())));
}

#[test]
fn custom_mode_reports_missing_fields() {
    let err = GameConfig::parse("custom", None, Some(9), Some(9)).unwrap_err();
    assert_eq!(err, ConfigError::MissingCustomFields(vec!["mines_count"]));
    let err = GameConfig::parse("custom", None, None, None).unwrap_err();
    assert_eq!(err, ConfigError::MissingCustomFields(vec!["mines_count", "height", "width"]));
}

#[test]
fn custom_mines_below_minimum() {
    let err = GameConfig::resolve(GameMode::Custom, Some(5), Some(9), Some(9)).unwrap_err();
    assert_eq!(err, ConfigError::MinesCountOutOfRange { value: 5, min: MIN_MINES_COUNT, max: MAX_MINES_COUNT });
}

#[test]
fn custom_mines_above_a_third_of_the_area() {
    let err = GameConfig::resolve(GameMode::Custom, Some(40), Some(10), Some(10)).unwrap_err();
    assert_eq!(err, ConfigError::MinesCountOutOfRange { value: 40, min: MIN_MINES_COUNT, max: 33 });
    assert!(GameConfig::resolve(GameMode::Custom, Some(33), Some(10), Some(10)).is_ok());
}

#[test]
fn custom_dimensions_are_bounded() {
    let err = GameConfig::resolve(GameMode::Custom, Some(10), Some(8), Some(9)).unwrap_err();
    assert_eq!(err, ConfigError::HeightOutOfRange { value: 8, min: MIN_HEIGHT, max: MAX_HEIGHT });
    let err = GameConfig::resolve(GameMode::Custom, Some(10), Some(9), Some(101)).unwrap_err();
    assert_eq!(err, ConfigError::WidthOutOfRange { value: 101, min: MIN_WIDTH, max: MAX_WIDTH });
    let err = GameConfig::resolve(GameMode::Custom, Some(201), Some(100), Some(100)).unwrap_err();
    assert!(matches!(err, ConfigError::MinesCountOutOfRange { value: 201, .. }));
}

#[test]
fn mines_are_checked_before_dimensions() {
    let err = GameConfig::resolve(GameMode::Custom, Some(5), Some(3), Some(3)).unwrap_err();
    assert!(matches!(err, ConfigError::MinesCountOutOfRange { .. }));
}

#[test]
fn config_errors_lift_into_session_errors() {
    let err: Error = GameConfig::parse("expert", None, None, None).unwrap_err().into();
    assert_eq!(err.to_string(), "invalid configuration: unknown game mode 'expert' (expected easy, normal, hard or custom)");
    let ok = GameConfig::parse("custom", Some(10), Some(9), Some(9)).expect("config");
    assert!(GameSession::new(ok).is_ok());
}
