use gabor_features::classify::Classifier;
use gabor_features::config::{self, DemoConfig};
use gabor_features::diagnostics::{
    BankDescriptor, ClassSummary, InputDescriptor, PipelineReport, StageTiming,
};
use gabor_features::image::io::{list_dir_images, load_grayscale_image, write_json_file};
use gabor_features::image::Image;
use gabor_features::scalar::to_f64;
use gabor_features::TrainedPipeline;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "gabor_demo".to_string());
    let config_path = args.next().map(PathBuf::from).ok_or_else(|| usage(&program))?;
    let config = config::load_config(&config_path)?;

    let t0 = Instant::now();
    let dataset = load_dataset(&config)?;
    let load_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let (width, height) = dataset
        .images
        .first()
        .map(|img| (img.w, img.h))
        .ok_or_else(|| format!("No images found under {}", config.dataset.root.display()))?;

    let model = TrainedPipeline::train(&config.pipeline, &dataset.images, &dataset.labels)
        .map_err(|e| format!("Training failed: {e}"))?;
    let t_predict = Instant::now();
    let predicted = model
        .predict(&dataset.images)
        .map_err(|e| format!("Prediction failed: {e}"))?;
    let predict_ms = t_predict.elapsed().as_secs_f64() * 1000.0;

    let classes = dataset
        .class_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let label = i as i32 + 1;
            let (mut samples, mut correct) = (0, 0);
            for (j, &l) in dataset.labels.iter().enumerate() {
                if l == label {
                    samples += 1;
                    correct += usize::from(predicted[j] == label);
                }
            }
            ClassSummary {
                label,
                name: name.clone(),
                samples,
                correct,
            }
        })
        .collect::<Vec<_>>();

    let feature_set = model.feature_set();
    let bank = feature_set.bank();
    let reduction = feature_set
        .reduction()
        .ok_or_else(|| "Feature set was not generated".to_string())?;
    let (kx, ky) = bank.kernel_size();
    let (sw, sh) = bank.spectrum_size();

    let mut timings = model.timing().clone();
    timings.stages.insert(0, StageTiming::new("load", load_ms));
    timings.push("predict", predict_ms);
    timings.total_ms += load_ms + predict_ms;

    let mut report = PipelineReport {
        input: InputDescriptor {
            images: dataset.images.len(),
            width,
            height,
        },
        bank: BankDescriptor {
            scales: bank.scales(),
            orientations: bank.orientations(),
            kernel_size: [kx, ky],
            spectrum_size: [sw, sh],
        },
        raw_features: reduction.mean.len(),
        reduced_dimensions: reduction.num_dimensions,
        cumulative_variance: reduction.cumulative_variance.iter().map(|&v| to_f64(v)).collect(),
        classes,
        training_accuracy: 0.0,
        timings,
    };
    report.training_accuracy = report.correct_total() as f64 / report.input.images as f64;

    print_text_summary(&report, model.classifier().is_trained());

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report).map_err(|e| format!("Failed to write report: {e}"))?;
        println!("\nJSON report written to {}", path.display());
    }
    Ok(())
}

struct Dataset {
    images: Vec<Image<f32>>,
    labels: Vec<i32>,
    class_names: Vec<String>,
}

fn load_dataset(config: &DemoConfig) -> Result<Dataset, String> {
    let root = &config.dataset.root;
    let mut class_dirs: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|e| format!("Failed to read dataset root {}: {e}", root.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    class_dirs.sort();

    let mut dataset = Dataset {
        images: Vec::new(),
        labels: Vec::new(),
        class_names: Vec::new(),
    };
    for (i, dir) in class_dirs.iter().enumerate() {
        let files = list_dir_images(dir, config.dataset.extension.as_deref())
            .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;
        for file in &files {
            dataset.images.push(load_image(file)?);
            dataset.labels.push(i as i32 + 1);
        }
        dataset.class_names.push(dir_name(dir));
    }
    Ok(dataset)
}

fn load_image(path: &Path) -> Result<Image<f32>, String> {
    load_grayscale_image(path).map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn print_text_summary(report: &PipelineReport, trained: bool) {
    println!("Gabor feature pipeline");
    println!(
        "  images: {} ({}x{})",
        report.input.images, report.input.width, report.input.height
    );
    println!(
        "  bank: {} scales x {} orientations, kernel {}x{}, spectrum {}x{}",
        report.bank.scales,
        report.bank.orientations,
        report.bank.kernel_size[0],
        report.bank.kernel_size[1],
        report.bank.spectrum_size[0],
        report.bank.spectrum_size[1]
    );
    println!(
        "  features: {} raw -> {} reduced",
        report.raw_features, report.reduced_dimensions
    );
    println!("  classifier trained: {trained}");
    for class in &report.classes {
        println!(
            "    [{}] {}: {}/{} correct",
            class.label, class.name, class.correct, class.samples
        );
    }
    println!("  training accuracy: {:.3}", report.training_accuracy);
    println!("Timings (total {:.3} ms)", report.timings.total_ms);
    for stage in &report.timings.stages {
        println!("    {:>14}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}
