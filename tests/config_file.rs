use {
    burn::config::Config,
    nn_pipeline::{
        defaults, ConfigError, ConfigKey, ConfigValue, ModelType, PipelineConfig, PoolingStyle,
        CONFIG_FILE_NAME,
    },
    std::{fs, path::PathBuf},
    tempfile::TempDir,
};

#[test]
fn json_round_trip_preserves_every_entry() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pipeline.json");

    let original = PipelineConfig::new()
        .with_model_type(ModelType::StackGatedCnn)
        .with_pooling_style(PoolingStyle::Avg)
        .with_learning_rate(1e-4)
        .with_pretrain_model_path(Some(PathBuf::from("models/bert-base-chinese")));
    original.save(&path).expect("Failed to save config");

    let loaded = PipelineConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(loaded, original);
    for key in ConfigKey::ALL {
        assert_eq!(loaded.get(key), original.get(key), "{key}");
    }
}

#[test]
fn json_uses_plain_names_and_numbers() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pipeline.json");
    defaults().save(&path).expect("Failed to save config");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["model_type"], "lstm");
    assert_eq!(json["pooling_style"], "max");
    assert_eq!(json["optimizer"], "adam");
    assert_eq!(json["kernel_size"], 3);
    assert_eq!(json["num_layers"], 2);
    assert_eq!(json["seed"], 987);
    assert_eq!(json["learning_rate"], 0.001);
    assert!(json["pretrain_model_path"].is_null());
}

#[test]
fn unknown_model_type_is_rejected_at_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pipeline.json");
    defaults().save(&path).expect("Failed to save config");

    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["model_type"] = "transformer".into();
    fs::write(&path, json.to_string()).unwrap();

    let err = PipelineConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Format(_)), "{err:?}");
}

#[test]
fn keys_outside_the_table_are_rejected_at_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pipeline.json");
    defaults().save(&path).expect("Failed to save config");

    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["hiden_size"] = 512.into();
    json["dropout"] = 0.5.into();
    fs::write(&path, json.to_string()).unwrap();

    let err = PipelineConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(_)), "{err:?}");
    let err = PipelineConfig::read_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(_)), "{err:?}");
}

#[test]
fn zero_batch_size_is_rejected_at_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pipeline.json");
    PipelineConfig::new()
        .with_batch_size(0)
        .save(&path)
        .expect("Failed to save config");

    let err = PipelineConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { key: "batch_size" }));
}

#[test]
fn missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = PipelineConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn stored_next_to_model_artifacts() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = dir.path().join("output").join("lstm");
    let config = PipelineConfig::new().with_model_path(model_path.clone());

    let written = config.save_to_model_dir().expect("Failed to store config");
    assert_eq!(written, model_path.join(CONFIG_FILE_NAME));
    assert!(model_path.is_dir());

    let loaded = PipelineConfig::load(&written).expect("Failed to load config");
    assert_eq!(loaded, config);
    assert_eq!(
        loaded.get(ConfigKey::ModelPath),
        ConfigValue::Path(model_path)
    );
}
