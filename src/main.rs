// src/main.rs — skyrun entry point

use std::sync::Arc;

use clap::Parser;

use skyrun::agents::creative::CreativeAgent;
use skyrun::agents::reviewer::ReviewerAgent;
use skyrun::agents::Evaluator;
use skyrun::api::{start_server, ApiState};
use skyrun::cli::{Cli, Commands};
use skyrun::core::coordinator::Coordinator;
use skyrun::core::types::{default_aspects, GenerationParams, WorkflowRequest};
use skyrun::infra::config::Config;
use skyrun::infra::logger;
use skyrun::registry::ledger::InMemoryLedger;

#[tokio::main]
async fn main() {
    // Respects RUST_LOG
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let api_key = config.api_key();
    let generator = Arc::new(
        CreativeAgent::new(
            config.models.generator_url.as_str(),
            config.models.generator_model.as_str(),
        )
        .with_api_key(api_key.clone()),
    );
    let evaluator: Arc<dyn Evaluator> = Arc::new(
        ReviewerAgent::new(
            config.models.evaluator_url.as_str(),
            config.models.evaluator_model.as_str(),
        )
        .with_api_key(api_key),
    );
    let coordinator = Arc::new(Coordinator::new(generator, Arc::clone(&evaluator)));

    match cli.command {
        Commands::Serve { host, port } => {
            let mut api_config = config.api.clone();
            if let Some(host) = host {
                api_config.host = host;
            }
            if let Some(port) = port {
                api_config.port = port;
            }

            let state = ApiState {
                coordinator,
                evaluator,
                registry: Arc::new(InMemoryLedger::new()),
                workflow_defaults: config.workflow.clone(),
            };
            start_server(&api_config, state).await
        }
        Commands::Run {
            prompt,
            max_iterations,
            min_score,
            max_length,
            temperature,
        } => {
            let request = WorkflowRequest {
                prompt,
                max_iterations: max_iterations.unwrap_or(config.workflow.max_iterations),
                min_quality_score: min_score.unwrap_or(config.workflow.min_quality_score),
                aspects: None,
                params: GenerationParams {
                    max_length: max_length.unwrap_or(config.workflow.max_length),
                    temperature: temperature.unwrap_or(config.workflow.temperature),
                    extra: serde_json::Map::new(),
                },
            };

            match coordinator.run(request).await {
                Ok(result) => {
                    println!(
                        "iterations: {}  best score: {:.2}  threshold met: {}",
                        result.total_iterations, result.best_score, result.threshold_met
                    );
                    if let Some(best) = result.best {
                        println!("\n{}", best.content);
                    }
                    Ok(())
                }
                Err(failure) => {
                    if let Some(best) = &failure.best {
                        eprintln!(
                            "run aborted after {} iteration(s); best so far (score {:.2}):\n{}",
                            failure.iterations_completed, best.quality_score, best.content
                        );
                    }
                    Err(failure.into())
                }
            }
        }
        Commands::Review { content, aspects } => {
            let aspects = if aspects.is_empty() {
                default_aspects()
            } else {
                aspects
            };
            let feedback = evaluator
                .evaluate(&content, &aspects)
                .await
                .map_err(anyhow::Error::from)?;
            for item in &feedback {
                println!("{}: {:.2}  {}", item.aspect, item.score, item.comment);
            }
            Ok(())
        }
    }
}
