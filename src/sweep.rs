use {
    crate::{
        choice::{ModelType, PoolingStyle},
        config::PipelineConfig,
        error::ConfigError,
    },
    burn::config::Config,
};

/// Axes of a hyperparameter grid, applied on top of a base table.
#[derive(Debug, PartialEq, Config)]
pub struct SweepConfig {
    #[config(default = "vec![ModelType::GatedCnn, ModelType::Bert, ModelType::Lstm]")]
    pub model_types: Vec<ModelType>,
    #[config(default = "vec![1e-3, 1e-4]")]
    pub learning_rates: Vec<f64>,
    #[config(default = "vec![128]")]
    pub hidden_sizes: Vec<usize>,
    #[config(default = "vec![64, 128]")]
    pub batch_sizes: Vec<usize>,
    #[config(default = "vec![PoolingStyle::Avg]")]
    pub pooling_styles: Vec<PoolingStyle>,
}

/// One point of the grid.
#[derive(Debug, Clone)]
pub struct SweepRun {
    pub name: String,
    pub config: PipelineConfig,
}

impl SweepConfig {
    /// The default grid, without bert-family model types when `base` has no
    /// pretrained model path to give them.
    pub fn for_base(base: &PipelineConfig) -> Self {
        let mut sweep = SweepConfig::new();
        if base.pretrain_model_path.is_none() {
            sweep.model_types.retain(|model_type| {
                let keep = !model_type.uses_pretrained();
                if !keep {
                    log::warn!("no pretrained model path, leaving {model_type} out of the sweep");
                }
                keep
            });
        }
        sweep
    }

    /// Number of runs, counting repeated axis values once.
    pub fn len(&self) -> usize {
        unique(&self.model_types).len()
            * unique(&self.learning_rates).len()
            * unique(&self.hidden_sizes).len()
            * unique(&self.batch_sizes).len()
            * unique(&self.pooling_styles).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cartesian product of every axis, model type varying slowest.
    ///
    /// Repeated axis values are dropped so run names stay distinct. Each run
    /// writes its artifacts to its own subdirectory of the base `model_path`.
    pub fn expand(&self, base: &PipelineConfig) -> Result<Vec<SweepRun>, ConfigError> {
        let model_types = unique(&self.model_types);
        let learning_rates = unique(&self.learning_rates);
        let hidden_sizes = unique(&self.hidden_sizes);
        let batch_sizes = unique(&self.batch_sizes);
        let pooling_styles = unique(&self.pooling_styles);
        for (axis, len) in [
            ("model_types", model_types.len()),
            ("learning_rates", learning_rates.len()),
            ("hidden_sizes", hidden_sizes.len()),
            ("batch_sizes", batch_sizes.len()),
            ("pooling_styles", pooling_styles.len()),
        ] {
            if len == 0 {
                return Err(ConfigError::EmptySweep(axis));
            }
        }

        let mut runs = Vec::with_capacity(self.len());
        for &model_type in &model_types {
            for &learning_rate in &learning_rates {
                for &hidden_size in &hidden_sizes {
                    for &batch_size in &batch_sizes {
                        for &pooling_style in &pooling_styles {
                            let name = format!(
                                "{model_type}_lr{learning_rate}_h{hidden_size}_b{batch_size}_{pooling_style}"
                            );
                            let config = base
                                .clone()
                                .with_model_type(model_type)
                                .with_learning_rate(learning_rate)
                                .with_hidden_size(hidden_size)
                                .with_batch_size(batch_size)
                                .with_pooling_style(pooling_style)
                                .with_model_path(base.model_path.join(&name));
                            runs.push(SweepRun { name, config });
                        }
                    }
                }
            }
        }
        log::debug!("expanded sweep into {} runs", runs.len());
        Ok(runs)
    }
}

/// First occurrence of each value, in order.
fn unique<T: Copy + PartialEq>(values: &[T]) -> Vec<T> {
    let mut seen = Vec::with_capacity(values.len());
    for &value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::Path};

    #[test]
    fn grid_size_is_product_of_axes() {
        let sweep = SweepConfig::new();
        let runs = sweep.expand(&PipelineConfig::new()).unwrap();
        assert_eq!(runs.len(), 3 * 2 * 2);
        assert_eq!(runs.len(), sweep.len());
    }

    #[test]
    fn runs_vary_only_swept_fields() {
        let base = PipelineConfig::new();
        let runs = SweepConfig::new()
            .with_model_types(vec![ModelType::Cnn])
            .with_learning_rates(vec![1e-2])
            .with_batch_sizes(vec![32])
            .expand(&base)
            .unwrap();
        let [run] = runs.as_slice() else {
            panic!("expected exactly one run, got {}", runs.len());
        };
        assert_eq!(run.name, "cnn_lr0.01_h128_b32_avg");
        assert_eq!(run.config.model_type, ModelType::Cnn);
        assert_eq!(run.config.batch_size, 32);
        assert_eq!(run.config.hidden_size, 128);
        assert_eq!(run.config.pooling_style, PoolingStyle::Avg);
        assert_eq!(run.config.epoch, base.epoch);
        assert_eq!(run.config.seed, base.seed);
        assert_eq!(
            run.config.model_path,
            Path::new("output").join("cnn_lr0.01_h128_b32_avg")
        );
    }

    #[test]
    fn repeated_axis_values_collapse() {
        let sweep = SweepConfig::new()
            .with_model_types(vec![ModelType::Lstm, ModelType::Lstm])
            .with_learning_rates(vec![0.001, 1e-3])
            .with_batch_sizes(vec![64]);
        let runs = sweep.expand(&PipelineConfig::new()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(sweep.len(), 1);
        assert_eq!(runs[0].name, "lstm_lr0.001_h128_b64_avg");
    }

    #[test]
    fn default_grid_skips_bert_without_pretrained_path() {
        let base = PipelineConfig::new();
        let sweep = SweepConfig::for_base(&base);
        assert_eq!(sweep.model_types, vec![ModelType::GatedCnn, ModelType::Lstm]);
        for run in sweep.expand(&base).unwrap() {
            assert!(run.config.validate().is_ok(), "{}", run.name);
        }

        let base = base.with_pretrain_model_path(Some("bert-base-chinese".into()));
        assert_eq!(SweepConfig::for_base(&base), SweepConfig::new());
    }

    #[test]
    fn empty_axis_is_rejected() {
        let err = SweepConfig::new()
            .with_hidden_sizes(Vec::new())
            .expand(&PipelineConfig::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptySweep("hidden_sizes")));
    }
}
