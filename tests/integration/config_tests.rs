use crossdupe::cli::OutputFormat;
use crossdupe::config::{Config, ConfigFileError};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

// Environment variables are process-wide
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_toml_file_overrides_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
recursive = true
io_threads = 2
output = "csv"
"#,
    );

    let config: Config = Config::figment(Some(&path)).extract().unwrap();

    assert!(config.recursive);
    assert_eq!(config.io_threads, 2);
    assert_eq!(config.output, OutputFormat::Csv);
    // Untouched keys keep their defaults
    assert!(!config.cross_tree_only);
    assert!(config.progress);
}

#[test]
fn test_env_overrides_toml_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "io_threads = 2\noutput = \"csv\"\n");

    std::env::set_var("CROSSDUPE_IO_THREADS", "16");
    std::env::set_var("CROSSDUPE_CROSS_TREE_ONLY", "true");

    let result: Result<Config, _> = Config::figment(Some(&path)).extract();

    std::env::remove_var("CROSSDUPE_IO_THREADS");
    std::env::remove_var("CROSSDUPE_CROSS_TREE_ONLY");

    let config = result.unwrap();
    assert_eq!(config.io_threads, 16);
    assert!(config.cross_tree_only);
    assert_eq!(config.output, OutputFormat::Csv);
}

#[test]
fn test_env_sets_output_format() {
    let _lock = ENV_MUTEX.lock().unwrap();
    std::env::set_var("CROSSDUPE_OUTPUT", "json");

    let result: Result<Config, _> = Config::figment(None).extract();

    std::env::remove_var("CROSSDUPE_OUTPUT");

    assert_eq!(result.unwrap().output, OutputFormat::Json);
}

#[test]
fn test_load_explicit_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Config::load(Some(&missing)).unwrap_err();

    assert!(matches!(err, ConfigFileError::NotFound(ref p) if p == &missing));
}

#[test]
fn test_load_explicit_invalid_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "io_threads = \"many\"\n");

    let err = Config::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ConfigFileError::Invalid(_)));
}

#[test]
fn test_load_explicit_valid_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "progress = false\n");

    let config = Config::load(Some(&path)).unwrap();

    assert!(!config.progress);
    assert_eq!(config.io_threads, 4);
}

#[test]
fn test_load_explicit_file_keeps_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "io_threads = 2\n");

    std::env::set_var("CROSSDUPE_IO_THREADS", "8");
    let result = Config::load(Some(&path));
    std::env::remove_var("CROSSDUPE_IO_THREADS");

    assert_eq!(result.unwrap().io_threads, 8);
}

#[test]
fn test_load_malformed_file_is_reported_despite_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "this is [not toml");

    std::env::set_var("CROSSDUPE_IO_THREADS", "8");
    let result = Config::load(Some(&path));
    std::env::remove_var("CROSSDUPE_IO_THREADS");

    assert!(matches!(result, Err(ConfigFileError::Invalid(_))));
}

#[test]
fn test_default_path_ends_with_config_toml() {
    if let Some(path) = Config::default_path() {
        assert!(path.ends_with("config.toml"));
        assert!(path.to_string_lossy().contains("crossdupe"));
    }
}
