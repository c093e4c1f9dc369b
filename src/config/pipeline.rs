use crate::features::FeatureOptions;
use crate::gabor::FilterBankParams;
use crate::linalg::QrStrategy;
use crate::parallel::ParallelOptions;
use serde::Deserialize;

/// Every knob of the extract → reduce → classify pipeline.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub bank: FilterBankParams,
    pub features: FeatureOptions,
    pub pca: PcaParams,
    pub classifier: ClassifierParams,
    /// Fan-out over images during feature extraction.
    pub parallel: ParallelOptions,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PcaParams {
    /// Fraction of total variance the reduced basis must retain, in `(0, 1]`.
    pub variability_retained: f64,
}

impl Default for PcaParams {
    fn default() -> Self {
        Self {
            variability_retained: 0.95,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    pub qr_strategy: QrStrategy,
}
