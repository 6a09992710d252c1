use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use transcript_analyzer::commands::{self, OutputFormat, ScoringOverrides};
use transcript_analyzer::config::{self, RealEnv};
use transcript_analyzer::project::ProjectManager;

#[derive(Parser)]
#[command(
    name = "transcript-analyzer",
    version,
    about = "Heuristic qualitative analysis of interview transcripts"
)]
struct Cli {
    /// Projects root (default: $TRANSCRIPT_ANALYZER_HOME or ./projects)
    #[arg(long, global = true)]
    projects_dir: Option<String>,

    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Copy)]
struct ScoringArgs {
    /// Seed for the sentiment jitter, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the sentiment jitter entirely
    #[arg(long)]
    no_jitter: bool,
}

impl From<ScoringArgs> for ScoringOverrides {
    fn from(args: ScoringArgs) -> Self {
        ScoringOverrides {
            seed: args.seed,
            no_jitter: args.no_jitter,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project with default configuration
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List projects
    List,
    /// Analyse every transcript of a project
    Analyze {
        name: String,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Analyse a single transcript file
    AnalyzeFile {
        path: PathBuf,
        /// Project-style JSON configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format: json or markdown
        #[arg(long, default_value = "json")]
        format: OutputFormat,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Compare two or more projects
    Compare {
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// List the available analyzers in execution order
    Analyzers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "transcript_analyzer=debug"
    } else {
        "transcript_analyzer=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let env = RealEnv;
    let pm = ProjectManager::new(config::projects_home(&env, cli.projects_dir.as_deref()));

    match cli.command {
        Commands::Create { name, description } => {
            print!("{}", commands::create::run(&pm, &name, description.as_deref())?);
        }
        Commands::List => print!("{}", commands::list::run(&pm)?),
        Commands::Analyze {
            name,
            format,
            scoring,
        } => {
            let all_ok = commands::analyze::run(&env, &pm, &name, format, scoring.into())?;
            if !all_ok {
                std::process::exit(1);
            }
        }
        Commands::AnalyzeFile {
            path,
            config,
            format,
            scoring,
        } => {
            let output = commands::analyze_file::run(
                &env,
                &path,
                config.as_deref(),
                format,
                scoring.into(),
            )?;
            print!("{output}");
        }
        Commands::Compare {
            names,
            format,
            scoring,
        } => {
            let all_ok = commands::compare::run(&env, &pm, &names, format, scoring.into())?;
            if !all_ok {
                std::process::exit(1);
            }
        }
        Commands::Analyzers => print!("{}", commands::analyzers::run()),
    }

    Ok(())
}
