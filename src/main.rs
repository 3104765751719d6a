use clap::{Parser, Subcommand};
use std::path::PathBuf;

use qflow_compare::utils::Config;
use qflow_compare::{compare, parser, report};

#[derive(Parser)]
#[command(name = "qflow-compare")]
#[command(version = "0.1.0")]
#[command(about = "Compare c-diagnosis and askman question flows in saved test reports", long_about = None)]
struct Cli {
    /// Directory containing the JSON reports
    #[arg(long, global = true, default_value = "reports")]
    reports_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify how failed scenarios diverge (count, question, answer, none)
    Summary {
        /// Number of report files to examine, in file name order
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Examine every report file
        #[arg(long, default_value = "false", conflicts_with = "limit")]
        all: bool,

        /// Output format (text, json, junit)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the first divergence of a single report in detail
    Detail {
        /// Report file name (inside the reports directory) or path
        report: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Count failure patterns recorded in failed reports
    Failures {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config {
        reports_dir: cli.reports_dir,
        ..Config::default()
    };

    match cli.command {
        Commands::Summary {
            limit,
            all,
            format,
            output,
        } => {
            config.scenario_limit = if all { None } else { Some(limit) };

            let scenarios = parser::load_reports(&config.reports_dir, config.scenario_limit)?;
            let summary = compare::summarize(&scenarios);
            let rendered = report::render_summary(&summary, &config, &format)?;
            report::emit(&rendered, output.as_deref())?;
        }

        Commands::Detail {
            report: name,
            format,
        } => {
            let path = parser::loader::resolve_report_path(&config.reports_dir, &name);
            log::info!("Comparing {}", path.display());

            let scenario = parser::load_scenario(&path)?;
            if let Some(ts) = scenario.recorded_at {
                log::info!("Report recorded at {}", ts);
            }
            let name = scenario
                .report
                .scenario_name
                .as_deref()
                .unwrap_or(&scenario.label);
            let detail = compare::compare_detail(name, &scenario.report);
            let rendered = report::render_detail(&detail, &config, &format)?;
            report::emit(&rendered, None)?;
        }

        Commands::Failures { format, output } => {
            let scenarios = parser::load_reports(&config.reports_dir, None)?;
            let analysis = compare::analyze_failures(&scenarios, config.failure_examples);
            if analysis.failed_scenarios == 0 {
                log::warn!("No failed scenarios in {}", config.reports_dir.display());
            }
            let rendered = report::render_failures(&analysis, &config, &format)?;
            report::emit(&rendered, output.as_deref())?;
        }
    }

    Ok(())
}
