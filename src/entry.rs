use {
    crate::error::ConfigError,
    std::{fmt, path::PathBuf, str::FromStr},
};

/// Every key of the configuration table, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ModelPath,
    TrainDataPath,
    ValidDataPath,
    VocabPath,
    ModelType,
    MaxLength,
    HiddenSize,
    KernelSize,
    NumLayers,
    Epoch,
    BatchSize,
    PoolingStyle,
    Optimizer,
    LearningRate,
    PretrainModelPath,
    Seed,
}

/// Semantic type of a key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Path,
    OptionalPath,
    Choice,
    PositiveInteger,
    Integer,
    PositiveFloat,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 16] = [
        ConfigKey::ModelPath,
        ConfigKey::TrainDataPath,
        ConfigKey::ValidDataPath,
        ConfigKey::VocabPath,
        ConfigKey::ModelType,
        ConfigKey::MaxLength,
        ConfigKey::HiddenSize,
        ConfigKey::KernelSize,
        ConfigKey::NumLayers,
        ConfigKey::Epoch,
        ConfigKey::BatchSize,
        ConfigKey::PoolingStyle,
        ConfigKey::Optimizer,
        ConfigKey::LearningRate,
        ConfigKey::PretrainModelPath,
        ConfigKey::Seed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ModelPath => "model_path",
            ConfigKey::TrainDataPath => "train_data_path",
            ConfigKey::ValidDataPath => "valid_data_path",
            ConfigKey::VocabPath => "vocab_path",
            ConfigKey::ModelType => "model_type",
            ConfigKey::MaxLength => "max_length",
            ConfigKey::HiddenSize => "hidden_size",
            ConfigKey::KernelSize => "kernel_size",
            ConfigKey::NumLayers => "num_layers",
            ConfigKey::Epoch => "epoch",
            ConfigKey::BatchSize => "batch_size",
            ConfigKey::PoolingStyle => "pooling_style",
            ConfigKey::Optimizer => "optimizer",
            ConfigKey::LearningRate => "learning_rate",
            ConfigKey::PretrainModelPath => "pretrain_model_path",
            ConfigKey::Seed => "seed",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ConfigKey::ModelPath
            | ConfigKey::TrainDataPath
            | ConfigKey::ValidDataPath
            | ConfigKey::VocabPath => ValueKind::Path,
            ConfigKey::PretrainModelPath => ValueKind::OptionalPath,
            ConfigKey::ModelType | ConfigKey::PoolingStyle | ConfigKey::Optimizer => {
                ValueKind::Choice
            }
            ConfigKey::MaxLength
            | ConfigKey::HiddenSize
            | ConfigKey::KernelSize
            | ConfigKey::NumLayers
            | ConfigKey::Epoch
            | ConfigKey::BatchSize => ValueKind::PositiveInteger,
            ConfigKey::Seed => ValueKind::Integer,
            ConfigKey::LearningRate => ValueKind::PositiveFloat,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_owned()))
    }
}

/// A value read out of the table, tagged with its semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Path(PathBuf),
    /// An optional path that was never supplied.
    Unset,
    Choice(&'static str),
    Integer(u64),
    Float(f64),
}

impl ConfigValue {
    /// Whether this value is a legal inhabitant of `kind`.
    pub fn is_kind(&self, kind: ValueKind) -> bool {
        match (kind, self) {
            (ValueKind::Path, ConfigValue::Path(path)) => !path.as_os_str().is_empty(),
            (ValueKind::OptionalPath, ConfigValue::Path(_) | ConfigValue::Unset) => true,
            (ValueKind::Choice, ConfigValue::Choice(_)) => true,
            (ValueKind::PositiveInteger, ConfigValue::Integer(n)) => *n > 0,
            (ValueKind::Integer, ConfigValue::Integer(_)) => true,
            (ValueKind::PositiveFloat, ConfigValue::Float(x)) => x.is_finite() && *x > 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Path(path) => write!(f, "{}", path.display()),
            ConfigValue::Unset => f.write_str("<unset>"),
            ConfigValue::Choice(name) => f.write_str(name),
            ConfigValue::Integer(n) => write!(f, "{n}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
        }
    }
}
