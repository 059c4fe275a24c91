//! Engines opened from a data directory with `datastorage.toml`.

use tempfile::TempDir;

use crate::common::*;
use datastorage::DataStorageConfig;

#[test]
fn open_creates_default_config() {
    let dir = TempDir::new().unwrap();
    let storage = DataStorage::open(dir.path()).unwrap();

    let written = std::fs::read_to_string(dir.path().join("datastorage.toml")).unwrap();
    assert_eq!(written, DataStorageConfig::default_toml());
    assert_eq!(storage.registry().len(), datastorage::BUILTIN_TAGS.len());
}

#[test]
fn open_honours_disabled_operations() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("datastorage.toml"),
        "disabled_operations = [\"left_shift\", \"right_shift\"]\n",
    )
    .unwrap();

    let storage = DataStorage::open(dir.path()).unwrap();
    assert!(!storage.registry().contains("left_shift"));
    let err = storage
        .set(&SetCommand::new("k", vec![op("right_shift", 1)]).with_default(8))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownOperation {
            operation: "right_shift".to_string()
        }
    );
}

#[test]
fn open_honours_operation_limit() {
    let dir = TempDir::new().unwrap();
    DataStorageConfig {
        max_operations: 1,
        ..DataStorageConfig::default()
    }
    .write_to_file(&dir.path().join("datastorage.toml"))
    .unwrap();

    let storage = DataStorage::open(dir.path()).unwrap();
    let err = storage
        .set(&SetCommand::new("k", vec![op("add", 1), op("add", 1)]).with_default(0))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCommand { .. }));
    assert_eq!(stored(&storage, "k"), None);
}

#[test]
fn open_rejects_unknown_disabled_operation() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("datastorage.toml"),
        "disabled_operations = [\"teleport\"]\n",
    )
    .unwrap();
    assert!(matches!(
        DataStorage::open(dir.path()).unwrap_err(),
        EngineError::Configuration { .. }
    ));
}
