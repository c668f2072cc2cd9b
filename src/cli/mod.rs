// src/cli/mod.rs — CLI definition (clap derive)

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skyrun", about = "Quality-gated AI content workflows", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one workflow from the terminal and print the summary
    Run {
        /// Base prompt for generation
        prompt: String,
        /// Iteration budget
        #[arg(short = 'i', long)]
        max_iterations: Option<u32>,
        /// Quality score needed to stop early (0.0-1.0)
        #[arg(short = 'q', long)]
        min_score: Option<f32>,
        /// Maximum generated length in tokens
        #[arg(long)]
        max_length: Option<u32>,
        /// Sampling temperature
        #[arg(short = 't', long)]
        temperature: Option<f32>,
    },
    /// Evaluate existing content without generating
    Review {
        /// Content to review
        content: String,
        /// Aspects to score (defaults to quality, relevance, creativity)
        #[arg(short, long)]
        aspects: Vec<String>,
    },
}
