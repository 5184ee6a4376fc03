use std::io::Write;

use firmdesk_lib::bootstrap::config::{resolve_config, CONFIG_ENV_VAR};
use serial_test::serial;

#[test]
#[serial]
fn test_env_var_selects_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[api]\nbase_url = \"https://crm.example.com/api\"\n")
        .unwrap();

    std::env::set_var(CONFIG_ENV_VAR, file.path());
    let config = resolve_config();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().api.base_url, "https://crm.example.com/api");
}

#[test]
#[serial]
fn test_env_var_pointing_nowhere_fails() {
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var(CONFIG_ENV_VAR, dir.path().join("missing.toml"));
    let config = resolve_config();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert!(config.is_err());
}
