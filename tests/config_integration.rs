//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use spacerocks::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SR_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SR_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("SR_GAME__LIVES", "7");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SR_GAME__LIVES");
    assert_eq!(config.game.lives, 7);
    assert_eq!(config.game.to_game_config().lives, 7);
}

#[test]
#[serial]
fn test_shipped_defaults_match_code_defaults() {
    let config = AppConfig::load_from("config").unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.game.to_game_config(), defaults.game.to_game_config());
    assert_eq!(
        config.particles.to_particle_config(),
        defaults.particles.to_particle_config()
    );
    assert_eq!(config.scene.layout_path, defaults.scene.layout_path);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.window.width, 600);
    assert_eq!(config.ballistics.speed, 2.0);
}
