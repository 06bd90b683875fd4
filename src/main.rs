use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use qdecide::output::OutputFormat;
use qdecide::samples::Sample;
use qdecide::scoring::{ScoringPolicy, SeededNoise};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INSUFFICIENT_DATA: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a decision file and print the report
    Analyze {
        /// Path to the decision YAML file
        file: PathBuf,

        /// Scoring policy (overrides config)
        #[arg(short, long, value_enum)]
        policy: Option<ScoringPolicy>,

        /// Seed for the synthetic figures, for reproducible reports
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Refuse to analyze a decision that fails validation
        #[arg(long)]
        strict: bool,
    },
    /// Check a decision file for out-of-range or dangling values
    Validate {
        /// Path to the decision YAML file
        file: PathBuf,
    },
    /// Print or save a built-in sample decision
    Sample {
        #[arg(value_enum)]
        name: Sample,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a decision file interactively
    Init {
        /// Where to save the decision (defaults to ./decision.yaml)
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "qdecide")]
#[command(about = "Quantum-flavored weighted decision analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/qdecide/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let code = match cli.command {
        Commands::Analyze {
            file,
            policy,
            seed,
            format,
            strict,
        } => {
            let config_path = cli.config.map(PathBuf::from);
            if cli.verbose {
                match &config_path {
                    Some(path) => eprintln!("Using config {}", path.display()),
                    None => eprintln!("Using config from the default location, if present"),
                }
            }
            let config = match qdecide::config::load_config(config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let policy = policy.or(config.policy).unwrap_or_default();
            let seed = seed.or(config.seed);
            let format = format.or(config.format).unwrap_or_default();
            let strict = strict || config.strict;
            let use_colors = config
                .color
                .unwrap_or_else(qdecide::output::should_use_colors);

            run_analyze(&file, policy, seed, format, strict, use_colors, cli.verbose)
        }
        Commands::Validate { file } => run_validate(&file),
        Commands::Sample { name, output } => run_sample(name, output),
        Commands::Init { path } => match qdecide::config::init::run_init_wizard(path) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_IO
            }
        },
    };

    if cli.verbose {
        eprintln!("Finished in {:?}", start_time.elapsed());
    }

    std::process::exit(code);
}

fn run_analyze(
    file: &Path,
    policy: ScoringPolicy,
    seed: Option<u64>,
    format: OutputFormat,
    strict: bool,
    use_colors: bool,
    verbose: bool,
) -> i32 {
    let decision = match qdecide::config::load_decision(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Decision error: {:#}", e);
            return EXIT_IO;
        }
    };

    if let Err(findings) = qdecide::scoring::validate_decision(&decision) {
        let label = if strict { "Decision errors:" } else { "Decision warnings:" };
        eprintln!("{}", label);
        for finding in findings {
            eprintln!("  - {}", finding);
        }
        if strict {
            return EXIT_CONFIG;
        }
    }

    let mut engine = decision.to_engine();

    if verbose {
        eprintln!(
            "Loaded '{}': {} variables, {} options",
            engine.decision_name(),
            engine.variables().len(),
            engine.options().len()
        );
        match seed {
            Some(seed) => eprintln!("Policy: {} (seed {})", policy.as_str(), seed),
            None => eprintln!("Policy: {} (unseeded)", policy.as_str()),
        }
    }

    let mut noise = SeededNoise::new(seed);
    let report = match qdecide::scoring::analyze(&mut engine, policy, &mut noise) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Analysis error: {}", e);
            return EXIT_INSUFFICIENT_DATA;
        }
    };

    if verbose {
        eprintln!(
            "Optimal choice: {} ({}%)",
            report.optimal_choice(),
            report.confidence()
        );
    }

    match format {
        OutputFormat::Table => {
            println!(
                "{}",
                qdecide::output::format_report(
                    engine.decision_name(),
                    engine.options(),
                    &report,
                    use_colors
                )
            );
        }
        OutputFormat::Tsv => {
            println!("{}", qdecide::output::format_tsv(engine.options(), &report));
        }
        OutputFormat::Json => {
            match qdecide::output::format_json(
                engine.decision_name(),
                engine.options(),
                &report,
                chrono::Utc::now(),
            ) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Failed to serialize report: {}", e);
                    return EXIT_IO;
                }
            }
        }
    }

    EXIT_SUCCESS
}

fn run_validate(file: &Path) -> i32 {
    let decision = match qdecide::config::load_decision(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Decision error: {:#}", e);
            return EXIT_IO;
        }
    };

    match qdecide::scoring::validate_decision(&decision) {
        Ok(()) => {
            println!(
                "{}: {} variables, {} options, no problems found",
                file.display(),
                decision.variables.len(),
                decision.options.len()
            );
            EXIT_SUCCESS
        }
        Err(findings) => {
            eprintln!("{}: {} problems", file.display(), findings.len());
            for finding in findings {
                eprintln!("  - {}", finding);
            }
            EXIT_CONFIG
        }
    }
}

fn run_sample(sample: Sample, output: Option<PathBuf>) -> i32 {
    let decision = sample.decision();

    match output {
        Some(path) => match qdecide::config::save_decision(&path, &decision) {
            Ok(()) => {
                println!("Sample written to {}", path.display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to write sample: {:#}", e);
                EXIT_IO
            }
        },
        None => match qdecide::config::decision_to_yaml(&decision) {
            Ok(yaml) => {
                print!("{}", yaml);
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("{:#}", e);
                EXIT_IO
            }
        },
    }
}
