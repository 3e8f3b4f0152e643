//! Tests for configuration loading: defaults, `${VAR}` substitution, and the
//! missing-file error.

use pubmeta_server::config::{get_config, ConfigError};
use std::{fs::File, io::Write};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.yml");
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn minimal_config_gets_the_documented_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
registry:
  base_url: "http://localhost:8000/api/v1"
  api_key: "secret"
"#,
    );

    let config = get_config(Some(path.as_str())).expect("config should load");

    assert!(config.extraction.base_url.is_none());
    assert_eq!(config.extraction.health_timeout_secs, 30);
    assert_eq!(config.extraction.generation_timeout_secs, 120);
    assert_eq!(config.audit.user_id, "pubmeta-server");
    assert_eq!(config.registry.api_key, "secret");
}

#[test]
fn environment_variables_are_substituted_into_the_yaml() {
    std::env::set_var("PUBMETA_TEST_REGISTRY_KEY", "from-the-environment");
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
extraction:
  base_url: "http://localhost:8100"
  generation_timeout_secs: 60
registry:
  base_url: "http://localhost:8000/api/v1"
  api_key: "${PUBMETA_TEST_REGISTRY_KEY}"
"#,
    );

    let config = get_config(Some(path.as_str())).expect("config should load");

    assert_eq!(config.registry.api_key, "from-the-environment");
    assert_eq!(
        config.extraction.base_url.as_deref(),
        Some("http://localhost:8100")
    );
    assert_eq!(config.extraction.generation_timeout_secs, 60);
}

#[test]
fn missing_config_file_is_reported_as_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.yml");

    let error = get_config(Some(path.to_str().unwrap())).unwrap_err();

    assert!(matches!(error, ConfigError::NotFound(_)));
}
