use {crate::choice::ModelType, thiserror::Error};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown config key `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("`{key}` must be greater than zero")]
    NotPositive { key: &'static str },

    #[error("learning rate must be a positive finite number, got {0}")]
    InvalidLearningRate(f64),

    #[error("model type `{0}` needs a pretrained model path")]
    MissingPretrainedModel(ModelType),

    #[error("sweep axis `{0}` is empty")]
    EmptySweep(&'static str),

    #[error("malformed config file: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<burn::config::ConfigError> for ConfigError {
    fn from(err: burn::config::ConfigError) -> Self {
        ConfigError::Format(err.to_string())
    }
}
