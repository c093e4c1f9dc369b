use super::timing::TimingBreakdown;
use serde::Serialize;

/// Summary of one train-and-evaluate run, written by the demo binary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: InputDescriptor,
    pub bank: BankDescriptor,
    pub raw_features: usize,
    pub reduced_dimensions: usize,
    pub cumulative_variance: Vec<f64>,
    pub classes: Vec<ClassSummary>,
    pub training_accuracy: f64,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub images: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDescriptor {
    pub scales: usize,
    pub orientations: usize,
    pub kernel_size: [usize; 2],
    pub spectrum_size: [usize; 2],
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub label: i32,
    pub name: String,
    pub samples: usize,
    pub correct: usize,
}

impl PipelineReport {
    pub fn correct_total(&self) -> usize {
        self.classes.iter().map(|c| c.correct).sum()
    }
}
