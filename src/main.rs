//! attrisk: Employee Attrition Risk CLI
//!
//! Trains an attrition classifier from an HR dataset and scores single
//! employee records, either from flags or through an interactive form.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use attrisk::cli::{confirm_overwrite, run_prediction_form, Cli, Commands, PredictArgs, TrainArgs};
use attrisk::inference::{predict, InferenceContext};
use attrisk::model::{evaluate, train_test_split, ForestConfig, RandomForest};
use attrisk::pipeline::{
    load_dataset_with_progress, prepare_dataset, save_artifacts, save_dataset, ArtifactPaths,
    FeatureRow, ModelArtifact, ModelMetadata, PipelineOptions, TargetMapping,
};
use attrisk::report::{print_importance, print_prediction, TrainingSummary};
use attrisk::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning, TrainingCard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Train(args)) => run_train(args, &cli.models_dir),
        Some(Commands::Predict(args)) => run_predict(args, &cli.models_dir),
        Some(Commands::Importance) => run_importance(&cli.models_dir),
        None => {
            let context = load_context(&cli.models_dir)?;
            run_prediction_form(&context)
        }
    }
}

fn load_context(models_dir: &Path) -> Result<InferenceContext> {
    InferenceContext::load(models_dir).with_context(|| {
        format!(
            "Could not load artifacts from {}. Run `attrisk train -i <dataset>` first.",
            models_dir.display()
        )
    })
}

fn run_predict(args: &PredictArgs, models_dir: &Path) -> Result<()> {
    let context = load_context(models_dir)?;
    let record = args.to_record(&context);
    let prediction = predict(&context, &record)?;

    if args.json {
        let output = serde_json::json!({
            "record": record,
            "prediction": prediction,
            "displayed_probability": prediction.displayed_probability(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_prediction(&prediction);
    }
    Ok(())
}

fn run_importance(models_dir: &Path) -> Result<()> {
    let context = load_context(models_dir)?;
    print_importance(&context.feature_ranking());
    Ok(())
}

fn run_train(args: &TrainArgs, models_dir: &Path) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&TrainingCard {
        input: &args.input,
        models_dir,
        seed: args.seed,
        trees: args.trees as usize,
        max_depth: args.max_depth,
        test_fraction: args.test_fraction,
    });

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    // Step 2: Feature pipeline
    print_step_header(2, "Feature Pipeline");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding and scaling features...");
    let options = PipelineOptions {
        seed: args.seed,
        target_mapping: TargetMapping::new(args.event_value.clone(), args.non_event_value.clone()),
    };
    let prepared = prepare_dataset(&df, &options);
    spinner.finish_and_clear();
    let prepared = prepared?;
    print_success("Feature matrix built");
    print_count(
        "leaver(s)",
        prepared.leavers(),
        Some(&format!("of {} rows", prepared.features.len())),
    );
    print_warning(
        "WorkMode is drawn from the Attrition label, so its importance reflects that construction",
    );

    let mut summary = TrainingSummary::new(prepared.features.len(), prepared.leavers());
    summary.set_load_time(load_elapsed);
    let prepare_elapsed = step_start.elapsed();
    summary.set_prepare_time(prepare_elapsed);
    print_step_time(prepare_elapsed);

    // Step 3: Fit classifier
    print_step_header(3, "Fit Classifier");
    let step_start = Instant::now();
    let all_rows = prepared.features.rows();
    let (train_idx, test_idx) = train_test_split(all_rows.len(), args.test_fraction, args.seed);
    let take_rows = |idx: &[usize]| -> Vec<FeatureRow> { idx.iter().map(|&i| all_rows[i]).collect() };
    let take_target = |idx: &[usize]| -> Vec<u8> { idx.iter().map(|&i| prepared.target[i]).collect() };
    let (train_rows, train_target) = (take_rows(&train_idx), take_target(&train_idx));
    let (test_rows, test_target) = (take_rows(&test_idx), take_target(&test_idx));
    summary.set_split(train_rows.len(), test_rows.len());

    let config = ForestConfig {
        n_trees: args.trees as usize,
        max_depth: args.max_depth,
        min_samples_leaf: args.min_samples_leaf as usize,
        seed: args.seed,
        ..ForestConfig::default()
    };
    summary.trees = config.n_trees;

    let spinner = create_spinner(&format!(
        "Fitting {} trees on {} rows...",
        config.n_trees,
        train_rows.len()
    ));
    let forest = RandomForest::fit(&train_rows, &train_target, &config);
    let forest = match forest {
        Ok(f) => {
            finish_with_success(&spinner, "Random forest fitted");
            f
        }
        Err(e) => {
            finish_with_warning(&spinner, "Forest fit failed");
            return Err(e);
        }
    };

    let metrics = if test_rows.is_empty() {
        print_info("No holdout requested; reporting training metrics");
        evaluate(&forest, &train_rows, &train_target)
    } else {
        evaluate(&forest, &test_rows, &test_target)
    };
    summary.metrics = Some(metrics);
    let fit_elapsed = step_start.elapsed();
    summary.set_fit_time(fit_elapsed);
    print_step_time(fit_elapsed);

    // Step 4: Save artifacts
    print_step_header(4, "Save Artifacts");
    let step_start = Instant::now();

    if let Some(path) = &args.export_features {
        let mut features_df = prepared.features.to_dataframe(&prepared.target)?;
        save_dataset(&mut features_df, path)?;
        print_success(&format!("Feature matrix written to {}", path.display()));
        summary.exported_features = Some(path.clone());
    }

    let paths = ArtifactPaths::in_dir(models_dir);
    let existing = paths.existing();
    if !existing.is_empty() && !args.no_confirm && !confirm_overwrite(&existing)? {
        print_info("Existing artifacts left unchanged");
        return Ok(());
    }

    let spinner = create_spinner("Writing artifacts...");
    let model = ModelArtifact {
        metadata: ModelMetadata::new(args.seed, train_rows.len(), test_rows.len()),
        forest,
    };
    save_artifacts(models_dir, &model, &prepared.encoders, &prepared.scaler)?;
    finish_with_success(&spinner, &format!("Saved to {}", models_dir.display()));
    summary.artifacts_dir = Some(models_dir.to_path_buf());
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    summary.display();
    print_completion("attrisk training complete!");

    Ok(())
}
