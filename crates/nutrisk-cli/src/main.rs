mod commands;
mod output;

use clap::{Parser, Subcommand};
use nutrisk_core::advice::gemini;
use nutrisk_core::ingest::http;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "nutrisk",
    version,
    about = "Personalized dietary risk scoring for scanned food labels"
)]
struct Cli {
    /// Timeout for calls to the label analysis and advice services
    #[arg(long, global = true, default_value_t = 30, value_name = "SECS")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a saved label analysis response into a scanned food
    Ingest {
        /// Path to the analysis service's JSON response
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the scanned food to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Upload a label image to the analysis service and store the result
    Analyze {
        /// Path to the label image (JPEG or PNG)
        image: PathBuf,

        /// Analysis service endpoint
        #[arg(long, env = "NUTRISK_OCR_URL", default_value = http::DEFAULT_ENDPOINT)]
        ocr_url: String,

        /// Where to store the scanned food
        #[arg(long, env = "NUTRISK_LAST_SCAN", default_value = "last-scan.json", value_name = "FILE")]
        save: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Score the last scanned food against a health profile
    Score {
        /// Scanned food JSON (defaults to the last scan)
        #[arg(long, env = "NUTRISK_LAST_SCAN", default_value = "last-scan.json", value_name = "FILE")]
        food: PathBuf,

        /// Stored health profile JSON
        #[arg(long, env = "NUTRISK_PROFILE", value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show every decision the scorer took
        #[arg(long)]
        verbose: bool,

        /// Add personalized advice (Gemini when a key is set, offline otherwise)
        #[arg(long)]
        advise: bool,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_api_key: Option<String>,

        /// Gemini model name
        #[arg(long, env = "NUTRISK_GEMINI_MODEL", default_value = gemini::DEFAULT_MODEL)]
        gemini_model: String,
    },
    /// Show wellness indicators for the last scanned food
    Metrics {
        /// Scanned food JSON (defaults to the last scan)
        #[arg(long, env = "NUTRISK_LAST_SCAN", default_value = "last-scan.json", value_name = "FILE")]
        food: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Log meals and forecast trends from the meal history
    Meals {
        #[command(subcommand)]
        action: MealsAction,
    },
    /// Inspect a stored health profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Inspect the built-in condition rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum MealsAction {
    /// Append the last scanned food to the meal history
    Log {
        /// Scanned food JSON (defaults to the last scan)
        #[arg(long, env = "NUTRISK_LAST_SCAN", default_value = "last-scan.json", value_name = "FILE")]
        food: PathBuf,

        /// Meal history JSON
        #[arg(long, env = "NUTRISK_MEAL_HISTORY", default_value = "meal-history.json", value_name = "FILE")]
        history: PathBuf,
    },
    /// Forecast wellness trends from the logged meals
    Forecast {
        /// Meal history JSON
        #[arg(long, env = "NUTRISK_MEAL_HISTORY", default_value = "meal-history.json", value_name = "FILE")]
        history: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the profile as the scorer sees it
    Show {
        /// Path to the stored profile JSON
        file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List condition rules
    List,
    /// Explain a condition rule in plain language
    Explain {
        /// Rule id (e.g., "diabetes")
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let timeout = Duration::from_secs(cli.timeout_secs);

    let result = match cli.command {
        Commands::Ingest {
            input_file,
            output,
            out,
        } => commands::ingest::run(input_file, &output, out),
        Commands::Analyze {
            image,
            ocr_url,
            save,
            output,
        } => commands::analyze::run(image, &ocr_url, save, &output, timeout),
        Commands::Score {
            food,
            profile,
            output,
            verbose,
            advise,
            gemini_api_key,
            gemini_model,
        } => commands::score::run(commands::score::ScoreArgs {
            food,
            profile,
            output_format: output,
            verbose,
            advise,
            gemini_api_key,
            gemini_model,
            timeout,
        }),
        Commands::Metrics { food, output } => commands::metrics::run(&food, &output),
        Commands::Meals { action } => match action {
            MealsAction::Log { food, history } => commands::meals::log(&food, &history),
            MealsAction::Forecast { history, output } => {
                commands::meals::forecast(&history, &output)
            }
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show { file, output } => commands::profile::show(&file, &output),
        },
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { id } => commands::rules::explain(&id),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
