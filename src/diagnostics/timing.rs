use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock duration of one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Ordered per-stage timings plus the end-to-end total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, recording its duration under `label`.
    pub fn time<R>(&mut self, label: impl Into<String>, f: impl FnOnce() -> R) -> R {
        let t0 = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(t0));
        out
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_stages_in_order() {
        let mut timing = TimingBreakdown::default();
        let v = timing.time("first", || 3);
        timing.push("second", 1.5);
        assert_eq!(v, 3);
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stages[0].label, "first");
        assert_eq!(timing.stage_ms("second"), Some(1.5));
        assert!(timing.stage_ms("missing").is_none());

        let json = serde_json::to_string(&timing).unwrap();
        assert!(json.contains("\"totalMs\""));
        assert!(json.contains("\"elapsedMs\""));
    }
}
