use {
    clap::ValueEnum,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// Architecture selected by `model_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ModelType {
    FastText,
    Lstm,
    Gru,
    Rnn,
    Cnn,
    GatedCnn,
    StackGatedCnn,
    Rcnn,
    Bert,
    BertLstm,
    BertCnn,
    BertMidLayer,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::FastText => "fast_text",
            ModelType::Lstm => "lstm",
            ModelType::Gru => "gru",
            ModelType::Rnn => "rnn",
            ModelType::Cnn => "cnn",
            ModelType::GatedCnn => "gated_cnn",
            ModelType::StackGatedCnn => "stack_gated_cnn",
            ModelType::Rcnn => "rcnn",
            ModelType::Bert => "bert",
            ModelType::BertLstm => "bert_lstm",
            ModelType::BertCnn => "bert_cnn",
            ModelType::BertMidLayer => "bert_mid_layer",
        }
    }

    /// Whether `kernel_size` means anything for this architecture.
    pub fn uses_convolution(self) -> bool {
        matches!(
            self,
            ModelType::Cnn
                | ModelType::GatedCnn
                | ModelType::StackGatedCnn
                | ModelType::Rcnn
                | ModelType::BertCnn
        )
    }

    /// Bert-family models start from `pretrain_model_path`.
    pub fn uses_pretrained(self) -> bool {
        matches!(
            self,
            ModelType::Bert | ModelType::BertLstm | ModelType::BertCnn | ModelType::BertMidLayer
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum PoolingStyle {
    Max,
    Avg,
}

impl PoolingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolingStyle::Max => "max",
            PoolingStyle::Avg => "avg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum OptimizerKind {
    Adam,
    Sgd,
}

impl OptimizerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizerKind::Adam => "adam",
            OptimizerKind::Sgd => "sgd",
        }
    }
}

macro_rules! impl_choice {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::value_variants()
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s.trim())
                    .ok_or_else(|| {
                        let legal = <$ty>::value_variants()
                            .iter()
                            .map(|variant| variant.as_str())
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("expected one of: {legal}")
                    })
            }
        }
    )*};
}

impl_choice!(ModelType, PoolingStyle, OptimizerKind);
