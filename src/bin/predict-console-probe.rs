//! Headless probe: load model info, apply a preset and edits, then predict.
//!
//! Drives the same controller the desktop console uses, which makes it handy
//! for smoke-testing a deployment from a terminal.

use predict_console::config;
use predict_console::console::{ConsoleController, LoadOutcome, PredictionOutcome, ServiceHealth};
use predict_console::logging;
use predict_console::model_api::HttpModelService;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn main() {
    if let Err(err) = logging::init_stderr() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default, PartialEq)]
struct ProbeArgs {
    endpoint: Option<String>,
    preset: Option<String>,
    edits: Vec<(String, f64)>,
    health: bool,
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let endpoint = match args.endpoint.clone() {
        Some(endpoint) => {
            config::validate_endpoint(&endpoint).map_err(|err| err.to_string())?;
            endpoint
        }
        None => {
            config::load_or_default()
                .map_err(|err| err.to_string())?
                .endpoint
        }
    };
    let service = HttpModelService::new(endpoint);
    println!("Endpoint: {}", service.base_url());

    let mut controller = ConsoleController::new(Arc::new(service));
    if args.health {
        controller.check_service_health();
        wait(&mut controller)?;
        match &controller.ui.health {
            ServiceHealth::Online => println!("Health: online"),
            ServiceHealth::Unreachable(detail) => println!("Health: unreachable ({detail})"),
            other => println!("Health: {other:?}"),
        }
    }

    controller.start();
    wait(&mut controller)?;
    if let LoadOutcome::Failed(message) = controller.load_outcome() {
        return Err(message.clone());
    }
    let descriptor = controller.descriptor();
    println!("Features: {}", descriptor.features.join(", "));
    if let Some(note) = descriptor.note() {
        println!("Note: {note}");
    }

    if let Some(preset) = args.preset.as_deref() {
        if !controller.apply_preset(preset) {
            let known: Vec<_> = controller.descriptor().preset_names().collect();
            return Err(format!(
                "Unknown preset {preset:?}; available: {}",
                known.join(", ")
            ));
        }
    }
    for (feature, value) in &args.edits {
        controller
            .set_feature_value_checked(feature, *value)
            .map_err(|err| err.to_string())?;
    }
    for (feature, value) in controller.values() {
        println!("  {feature} = {value}");
    }

    if !controller.can_predict() {
        return Err(format!(
            "Cannot predict; missing values for: {}",
            controller.missing_features().join(", ")
        ));
    }
    controller.predict();
    wait(&mut controller)?;
    let text = controller.prediction_text().unwrap_or_default();
    match controller.prediction_outcome() {
        PredictionOutcome::Success(_) => {
            println!("{text}");
            Ok(())
        }
        _ => Err(text),
    }
}

fn wait(controller: &mut ConsoleController) -> Result<(), String> {
    if controller.wait_until_idle(REQUEST_TIMEOUT) {
        Ok(())
    } else {
        Err("Timed out waiting for the prediction service".to_string())
    }
}

fn parse_args(args: Vec<String>) -> Result<ProbeArgs, String> {
    let mut parsed = ProbeArgs::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--endpoint" => parsed.endpoint = Some(next_value(&mut iter, "--endpoint")?),
            "--preset" => parsed.preset = Some(next_value(&mut iter, "--preset")?),
            "--set" => {
                let raw = next_value(&mut iter, "--set")?;
                parsed.edits.push(parse_edit(&raw)?);
            }
            "--health" => parsed.health = true,
            "-h" | "--help" => return Err(usage()),
            other => return Err(format!("Unknown argument: {other}\n{}", usage())),
        }
    }
    Ok(parsed)
}

fn next_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next()
        .ok_or_else(|| format!("{flag} requires a value\n{}", usage()))
}

fn parse_edit(raw: &str) -> Result<(String, f64), String> {
    let (feature, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected FEATURE=VALUE, got {raw:?}"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid value in {raw:?}: {err}"))?;
    Ok((feature.trim().to_string(), value))
}

fn usage() -> String {
    "Usage: predict-console-probe [--endpoint URL] [--preset NAME] [--set FEATURE=VALUE]... [--health]"
        .to_string()
}
