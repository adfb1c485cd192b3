use {
    crate::{
        choice::{ModelType, OptimizerKind, PoolingStyle},
        entry::{ConfigKey, ConfigValue},
        error::ConfigError,
    },
    burn::config::Config,
    serde_json::{Map, Value},
    std::{
        env,
        ffi::OsString,
        fmt::Display,
        fs,
        path::{Path, PathBuf},
        str::FromStr,
        sync::OnceLock,
    },
};

/// Environment variable consulted for the pretrained model directory.
pub const PRETRAIN_MODEL_PATH_ENV: &str = "NN_PIPELINE_PRETRAIN_MODEL_PATH";

/// File name used when the table is written next to the model artifacts.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Hyperparameters and paths for the text classification pipeline.
///
/// `PipelineConfig::new()` yields the reference table. Values can be changed
/// only while building (the generated `with_*` setters and
/// [`PipelineConfig::with_override`] take `self` by value).
#[derive(Debug, PartialEq, Config)]
pub struct PipelineConfig {
    /// Output directory for trained artifacts.
    #[config(default = "PathBuf::from(\"output\")")]
    pub model_path: PathBuf,
    #[config(default = "PathBuf::from(\"data/train_dataset.csv\")")]
    pub train_data_path: PathBuf,
    #[config(default = "PathBuf::from(\"data/test_dataset.csv\")")]
    pub valid_data_path: PathBuf,
    /// Character table, one token per line.
    #[config(default = "PathBuf::from(\"chars.txt\")")]
    pub vocab_path: PathBuf,
    #[config(default = "ModelType::Lstm")]
    pub model_type: ModelType,
    #[config(default = 30)]
    pub max_length: usize,
    #[config(default = 256)]
    pub hidden_size: usize,
    /// Only read by convolutional model types.
    #[config(default = 3)]
    pub kernel_size: usize,
    #[config(default = 2)]
    pub num_layers: usize,
    #[config(default = 15)]
    pub epoch: usize,
    #[config(default = 128)]
    pub batch_size: usize,
    #[config(default = "PoolingStyle::Max")]
    pub pooling_style: PoolingStyle,
    #[config(default = "OptimizerKind::Adam")]
    pub optimizer: OptimizerKind,
    #[config(default = "1e-3")]
    pub learning_rate: f64,
    /// Supplied from the command line or `NN_PIPELINE_PRETRAIN_MODEL_PATH`.
    pub pretrain_model_path: Option<PathBuf>,
    #[config(default = 987)]
    pub seed: u64,
}

/// The reference table, built on first use and shared for the rest of the process.
pub fn defaults() -> &'static PipelineConfig {
    static DEFAULTS: OnceLock<PipelineConfig> = OnceLock::new();
    DEFAULTS.get_or_init(PipelineConfig::new)
}

impl PipelineConfig {
    /// Load a table from a JSON file, resolve the pretrained model path the
    /// same way the command line does, and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = PipelineConfig::read_file(path)?.resolve_pretrain_model_path(None);
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file without validating its values. Keys outside the
    /// fixed key set are rejected.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = PipelineConfig::from_json(&content)?;
        log::debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let entries: Map<String, Value> =
            serde_json::from_str(content).map_err(|err| ConfigError::Format(err.to_string()))?;
        for key in entries.keys() {
            key.parse::<ConfigKey>()?;
        }
        serde_json::from_value(Value::Object(entries))
            .map_err(|err| ConfigError::Format(err.to_string()))
    }

    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        let int = |n: usize| ConfigValue::Integer(n as u64);
        match key {
            ConfigKey::ModelPath => ConfigValue::Path(self.model_path.clone()),
            ConfigKey::TrainDataPath => ConfigValue::Path(self.train_data_path.clone()),
            ConfigKey::ValidDataPath => ConfigValue::Path(self.valid_data_path.clone()),
            ConfigKey::VocabPath => ConfigValue::Path(self.vocab_path.clone()),
            ConfigKey::ModelType => ConfigValue::Choice(self.model_type.as_str()),
            ConfigKey::MaxLength => int(self.max_length),
            ConfigKey::HiddenSize => int(self.hidden_size),
            ConfigKey::KernelSize => int(self.kernel_size),
            ConfigKey::NumLayers => int(self.num_layers),
            ConfigKey::Epoch => int(self.epoch),
            ConfigKey::BatchSize => int(self.batch_size),
            ConfigKey::PoolingStyle => ConfigValue::Choice(self.pooling_style.as_str()),
            ConfigKey::Optimizer => ConfigValue::Choice(self.optimizer.as_str()),
            ConfigKey::LearningRate => ConfigValue::Float(self.learning_rate),
            ConfigKey::PretrainModelPath => match &self.pretrain_model_path {
                Some(path) => ConfigValue::Path(path.clone()),
                None => ConfigValue::Unset,
            },
            ConfigKey::Seed => ConfigValue::Integer(self.seed),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (ConfigKey, ConfigValue)> + '_ {
        ConfigKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Replace one field from its textual form.
    pub fn with_override(mut self, key: ConfigKey, raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        match key {
            ConfigKey::ModelPath => self.model_path = parse_path(key, raw)?,
            ConfigKey::TrainDataPath => self.train_data_path = parse_path(key, raw)?,
            ConfigKey::ValidDataPath => self.valid_data_path = parse_path(key, raw)?,
            ConfigKey::VocabPath => self.vocab_path = parse_path(key, raw)?,
            ConfigKey::ModelType => self.model_type = parse_field(key, raw)?,
            ConfigKey::MaxLength => self.max_length = parse_field(key, raw)?,
            ConfigKey::HiddenSize => self.hidden_size = parse_field(key, raw)?,
            ConfigKey::KernelSize => self.kernel_size = parse_field(key, raw)?,
            ConfigKey::NumLayers => self.num_layers = parse_field(key, raw)?,
            ConfigKey::Epoch => self.epoch = parse_field(key, raw)?,
            ConfigKey::BatchSize => self.batch_size = parse_field(key, raw)?,
            ConfigKey::PoolingStyle => self.pooling_style = parse_field(key, raw)?,
            ConfigKey::Optimizer => self.optimizer = parse_field(key, raw)?,
            ConfigKey::LearningRate => self.learning_rate = parse_field(key, raw)?,
            ConfigKey::PretrainModelPath => {
                self.pretrain_model_path = (!raw.is_empty()).then(|| PathBuf::from(raw))
            }
            ConfigKey::Seed => self.seed = parse_field(key, raw)?,
        }
        Ok(self)
    }

    /// Apply a `key=value` assignment, as given on the command line.
    pub fn with_assignment(self, assignment: &str) -> Result<Self, ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::UnknownKey(assignment.trim().to_owned()))?;
        let key = key.parse::<ConfigKey>()?;
        self.with_override(key, value)
    }

    /// Fill in `pretrain_model_path`: an explicit path wins, then the
    /// environment, then whatever the table already holds.
    pub fn resolve_pretrain_model_path(self, explicit: Option<PathBuf>) -> Self {
        self.pick_pretrain_model_path(explicit, env::var_os(PRETRAIN_MODEL_PATH_ENV))
    }

    fn pick_pretrain_model_path(
        mut self,
        explicit: Option<PathBuf>,
        from_env: Option<OsString>,
    ) -> Self {
        if let Some(path) = explicit {
            self.pretrain_model_path = Some(path);
        } else if let Some(path) = from_env.filter(|path| !path.is_empty()) {
            log::debug!("pretrained model path taken from {PRETRAIN_MODEL_PATH_ENV}");
            self.pretrain_model_path = Some(path.into());
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            (ConfigKey::ModelPath, &self.model_path),
            (ConfigKey::TrainDataPath, &self.train_data_path),
            (ConfigKey::ValidDataPath, &self.valid_data_path),
            (ConfigKey::VocabPath, &self.vocab_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.as_str(),
                    value: String::new(),
                    reason: "path is empty".into(),
                });
            }
        }
        for (key, value) in [
            (ConfigKey::MaxLength, self.max_length),
            (ConfigKey::HiddenSize, self.hidden_size),
            (ConfigKey::KernelSize, self.kernel_size),
            (ConfigKey::NumLayers, self.num_layers),
            (ConfigKey::Epoch, self.epoch),
            (ConfigKey::BatchSize, self.batch_size),
        ] {
            if value == 0 {
                return Err(ConfigError::NotPositive { key: key.as_str() });
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.model_type.uses_pretrained() && self.pretrain_model_path.is_none() {
            return Err(ConfigError::MissingPretrainedModel(self.model_type));
        }
        if !self.model_type.uses_convolution() {
            log::debug!(
                "kernel_size {} is ignored by model type {}",
                self.kernel_size,
                self.model_type
            );
        }
        Ok(())
    }

    /// Where [`PipelineConfig::save_to_model_dir`] writes the table.
    pub fn model_config_path(&self) -> PathBuf {
        self.model_path.join(CONFIG_FILE_NAME)
    }

    /// Create `model_path` if needed and store the table inside it.
    pub fn save_to_model_dir(&self) -> Result<PathBuf, ConfigError> {
        fs::create_dir_all(&self.model_path)?;
        let path = self.model_config_path();
        self.save(&path)?;
        log::info!("stored config to {path:?}");
        Ok(path)
    }
}

fn parse_path(key: ConfigKey, raw: &str) -> Result<PathBuf, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.as_str(),
            value: raw.to_owned(),
            reason: "path is empty".into(),
        });
    }
    Ok(PathBuf::from(raw))
}

fn parse_field<T>(key: ConfigKey, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key: key.as_str(),
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
