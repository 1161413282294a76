use hhmm_calc::config::load_from_path;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_valid() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        [tape]
        enabled = false
        storage_key = "work_tape"

        [state]
        state_dir_override = "/tmp/hmc-state"

        [logging]
        filter = "hhmm_calc=debug"
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).expect("Failed to load valid config");

    assert!(!config.tape.enabled);
    assert_eq!(config.tape.storage_key, "work_tape");
    assert_eq!(
        config.state.state_dir_override.as_deref(),
        Some(std::path::Path::new("/tmp/hmc-state"))
    );
    assert_eq!(config.logging.filter, "hhmm_calc=debug");
}

#[test]
fn test_load_config_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();

    let config = load_from_path(temp_file.path()).expect("Empty config should use defaults");
    assert!(config.tape.enabled);
    assert_eq!(config.tape.storage_key, "timecalc_tape");
    assert_eq!(config.logging.filter, "warn");
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(dir.path().join("absent.toml")).unwrap();
    assert!(config.tape.enabled);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tape]\nenabled = false\n").unwrap();

    let config = load_from_path(temp_file.path()).unwrap();
    assert!(!config.tape.enabled);
    assert_eq!(config.tape.storage_key, "timecalc_tape");
}

#[test]
fn test_invalid_storage_key_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[tape]\nstorage_key = \"../elsewhere\"\n")
        .unwrap();

    let result = load_from_path(temp_file.path());
    assert!(result.is_err());
    assert!(
        format!("{:#}", result.unwrap_err()).contains("storage_key"),
        "error should name the bad key"
    );
}

#[test]
fn test_wrong_type_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[tape]\nenabled = \"sometimes\"\n")
        .unwrap();

    assert!(load_from_path(temp_file.path()).is_err());
}
