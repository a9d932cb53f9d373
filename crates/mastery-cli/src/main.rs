//! CSS Mastery CLI
//!
//! Serves the playgrounds and tutor, asks the tutor a one-off question, or
//! prints a playground's CSS for a set of parameter values.

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mastery_playground::{ParamValue, Playground, PlaygroundSet, Topic};
use mastery_server::{AppState, Config};
use mastery_tutor::Tutor;
use tracing_subscriber::EnvFilter;

/// CSS Mastery - interactive CSS playgrounds with an AI tutor
#[derive(Parser, Debug)]
#[command(name = "mastery")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: mastery.json in current directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API and WebSocket server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to listen on (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask the tutor one question and print the answer
    Ask {
        /// The question
        #[arg(value_name = "QUESTION", required = true)]
        question: Vec<String>,
    },

    /// Print a playground's CSS and derived values
    Show {
        /// Topic slug: box-model, flex, grid, positioning or responsive
        #[arg(value_name = "TOPIC")]
        topic: Topic,

        /// Parameter assignment, e.g. `--set columns=4` (repeatable)
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, ParamValue)>,

        /// Print the full view as JSON instead
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!(config = ?args.config, "Config file");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Serve { port, host } => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            // Re-validate after overrides
            config.validate()?;
            serve(config).await
        }
        Command::Ask { question } => {
            let config = load_config(args.config.as_deref())?;
            ask(&config, &question.join(" ")).await
        }
        Command::Show {
            topic,
            assignments,
            json,
        } => show(topic, &assignments, json),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    println!("CSS Mastery");
    println!("===========");
    println!("Provider: {:?}", config.tutor.provider);
    println!("Model:    {}", config.tutor.model);
    println!();
    println!("Serving on http://{}", config.bind_address());
    println!("Events:   ws://{}/ws", config.bind_address());
    println!("Press Ctrl+C to stop");

    let state = AppState::new(config);
    tokio::select! {
        result = mastery_server::serve(state) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("Shutting down");
        }
    }
    Ok(())
}

async fn ask(config: &Config, question: &str) -> anyhow::Result<()> {
    let tutor = Tutor::new(config.tutor.generator());
    let Some(reply) = tutor.ask(question).await else {
        anyhow::bail!("Question is empty\n\nSuggestion: Pass the question as arguments, e.g. mastery ask \"What is flexbox?\"");
    };

    if reply.is_error {
        eprintln!("{}", reply.text);
        anyhow::bail!("The tutor could not answer\n\nSuggestion: Re-run with --verbose for details");
    }
    println!("{}", reply.text);
    Ok(())
}

fn show(topic: Topic, assignments: &[(String, ParamValue)], json: bool) -> anyhow::Result<()> {
    let mut playgrounds = PlaygroundSet::new();
    for (name, value) in assignments {
        playgrounds.set_parameter(topic, name, value)?;
    }

    let view = playgrounds.get(topic).view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("/* {} */", view.title);
    println!("{}", view.snippet);
    if !view.derived.is_empty() {
        println!();
        for (key, value) in &view.derived {
            println!("{key}: {value}");
        }
    }
    Ok(())
}

/// Parses `name=value`; integers become numeric values, anything else a keyword.
fn parse_assignment(raw: &str) -> Result<(String, ParamValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    let value = value.trim();
    let value = value
        .parse::<i64>()
        .map_or_else(|_| ParamValue::from(value), ParamValue::Integer);
    Ok((name.to_string(), value))
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}
