mod common;

use common::synthetic_image::{checkerboard, stripe_dataset};
use gabor_features::config::PipelineConfig;
use gabor_features::features::{extract_batch, FeatureOptions};
use gabor_features::gabor::{FilterBank, FilterBankParams};
use gabor_features::parallel::ParallelOptions;
use gabor_features::TrainedPipeline;
use std::f64::consts::PI;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config(size: usize) -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.bank = FilterBankParams::square(2, 4, size, PI / 2.0, 2.0 * PI);
    cfg.features = FeatureOptions {
        downsample: true,
        downsampling_ratio: 0.5,
        ..Default::default()
    };
    cfg.pca.variability_retained = 0.9;
    cfg
}

#[test]
fn stripe_textures_are_classified_by_orientation() {
    init_logger();
    let (train_images, train_labels) = stripe_dataset(24, 10, 17);
    let model = TrainedPipeline::train(&config(24), &train_images, &train_labels)
        .expect("training on stripe textures");

    let fitted = model.predict(&train_images).unwrap();
    assert_eq!(fitted.as_slice(), train_labels.as_slice());

    let (test_images, test_labels) = stripe_dataset(24, 10, 4242);
    let predicted = model.predict(&test_images).unwrap();
    let correct = predicted
        .iter()
        .zip(&test_labels)
        .filter(|(p, t)| p == t)
        .count();
    assert!(
        correct as f64 / test_labels.len() as f64 >= 0.9,
        "held-out accuracy {correct}/{}",
        test_labels.len()
    );

    let timing = model.timing();
    for stage in ["filter_bank", "features_pca", "train"] {
        assert!(timing.stage_ms(stage).is_some(), "missing stage {stage}");
    }
    assert!(timing.total_ms >= 0.0);
}

#[test]
fn feature_rows_have_documented_layout() {
    init_logger();
    let bank = FilterBank::<f64>::new(FilterBankParams::square(2, 4, 20, PI / 2.0, 2.0 * PI)).unwrap();
    let images = vec![checkerboard(20, 20, 4), checkerboard(20, 20, 5), checkerboard(20, 20, 2)];

    let plain = extract_batch(&bank, &images, &FeatureOptions::default(), ParallelOptions::default())
        .unwrap();
    assert_eq!(plain.shape(), (3, 8 * 400));

    let opts = FeatureOptions {
        downsample: true,
        downsampling_ratio: 0.25,
        zero_mean_unit_variance: true,
        ..Default::default()
    };
    let reduced = extract_batch(&bank, &images, &opts, ParallelOptions::disabled()).unwrap();
    assert_eq!(reduced.shape(), (3, 8 * 25));
    assert!(reduced.iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn mismatched_labels_are_rejected() {
    let (images, labels) = stripe_dataset(16, 3, 1);
    let err = TrainedPipeline::train(&config(16), &images, &labels[..4]).unwrap_err();
    assert!(matches!(err, gabor_features::FeatureError::DimensionMismatch(_)));
}
