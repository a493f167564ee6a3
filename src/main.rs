use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use satkey::models::{parse_window, AppConfig, CONFIG_ENV};
use satkey::services::{RenderRequest, RenderService, ThresholdCurve};
use saturation_key::{Rect, RenderOutcome, SATURATION_EFFECT};

#[derive(Parser)]
#[command(name = "satkey")]
#[command(about = "Saturation key - black out low-saturation pixels in PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Key a PNG file and write the result
    Render {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Saturation threshold, usually in [0, 1] (overrides the config file)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Evaluation time for animated thresholds
        #[arg(long, default_value_t = 0.0)]
        time: f64,

        /// Region to render as x1,y1,x2,y2 (default: whole image)
        #[arg(short, long, value_parser = parse_window)]
        window: Option<Rect>,

        /// Number of worker threads
        #[arg(long)]
        threads: Option<usize>,

        /// YAML config file (default: $SATKEY_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,

        /// Abort the render after this many milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
    /// Print the effect description
    Describe,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            threshold,
            time,
            window,
            threads,
            config,
            optimize,
            deadline_ms,
        }) => run_render_command(RenderOptions {
            input,
            output,
            threshold,
            time,
            window,
            threads,
            config,
            optimize,
            deadline_ms,
        }),
        Some(Commands::Describe) => {
            run_describe_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

struct RenderOptions {
    input: PathBuf,
    output: PathBuf,
    threshold: Option<f64>,
    time: f64,
    window: Option<Rect>,
    threads: Option<usize>,
    config: Option<PathBuf>,
    optimize: bool,
    deadline_ms: Option<u64>,
}

/// Key a PNG file to another PNG file
fn run_render_command(opts: RenderOptions) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "satkey=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::resolve_path(opts.config);
    let mut config = AppConfig::load(config_path.as_deref());

    // CLI flags win over the config file
    if opts.threads.is_some() {
        config.threads = opts.threads;
    }
    if opts.deadline_ms.is_some() {
        config.deadline_ms = opts.deadline_ms;
    }
    config.optimize |= opts.optimize;

    let curve = match opts.threshold {
        Some(t) => ThresholdCurve::constant(t),
        None => ThresholdCurve::from_config(&config),
    };
    tracing::debug!(
        input = %opts.input.display(),
        output = %opts.output.display(),
        threshold = curve.value(opts.time),
        animated = curve.is_animated(),
        time = opts.time,
        "Resolved render inputs"
    );

    let service = RenderService::from_config(&config)?;
    let request = RenderRequest {
        threshold: curve,
        time: opts.time,
        window: opts.window,
        deadline: config.deadline_ms.map(Duration::from_millis),
    };

    match service.render_file(&opts.input, &opts.output, &request) {
        Ok(RenderOutcome::Rendered { .. }) => {
            println!("Rendered to {}", opts.output.display());
            Ok(())
        }
        Ok(RenderOutcome::Aborted { rows_completed }) => anyhow::bail!(
            "render aborted after {rows_completed} rows, {} not written",
            opts.output.display()
        ),
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "failed to render {}",
            opts.input.display()
        ))),
    }
}

/// Print what a host would register for this effect
fn run_describe_command() {
    let effect = &SATURATION_EFFECT;
    println!("{} ({})", effect.label, effect.identifier);
    println!("  Version:  {}.{}", effect.version.0, effect.version.1);
    println!("  Grouping: {}", effect.grouping);
    println!("  Contexts: {:?}", effect.contexts);
    println!(
        "  Clips:    {}",
        effect
            .clips
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Pixels:   {:?} components, {:?} depth",
        effect.components, effect.pixel_depths
    );
    println!(
        "  Multiple clip depths: {}",
        if effect.supports_multiple_clip_depths {
            "yes"
        } else {
            "no"
        }
    );
    println!("\nParameters:");
    for param in effect.params {
        println!("  {:<12} {} (default {})", param.name, param.label, param.default);
        println!("  {:<12} {}", "", param.hint);
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Satkey v{VERSION} - saturation key");
    println!("Blacks out pixels at or below a saturation threshold\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG      = {}",
        rust_log.as_deref().unwrap_or("satkey=info (default)")
    );

    let config = AppConfig::load(config_file.as_deref().map(std::path::Path::new));
    println!("\nConfiguration:");
    println!("  Threshold: {}", config.threshold);
    println!("  Keyframes: {}", config.keyframes.len());
    println!(
        "  Threads:   {}",
        config
            .threads
            .map(|n| n.to_string())
            .unwrap_or_else(|| "auto".to_string())
    );
    println!("  Optimize:  {}", config.optimize);
    println!(
        "  Deadline:  {}",
        config
            .deadline_ms
            .map(|ms| format!("{ms} ms"))
            .unwrap_or_else(|| "none".to_string())
    );

    println!("\nCommands:");
    println!("  satkey render -i IN.png -o OUT.png   Key a PNG file");
    println!("  satkey describe                      Show the effect description");
    println!("  satkey --help                        Show all options");
}
