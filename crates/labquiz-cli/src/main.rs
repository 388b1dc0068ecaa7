//! labquiz CLI — serve and author self-graded lab quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "labquiz", version, about = "Self-graded lab quiz server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where course documents and completion markers live.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of <course>.yaml question sets
    #[arg(long)]
    pub questions_dir: Option<PathBuf>,

    /// Directory for completion marker files
    #[arg(long)]
    pub marker_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quiz web server
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate question set YAML files
    Validate {
        /// Path to a course .yaml file or a directory of them
        #[arg(long)]
        questions: PathBuf,
    },

    /// List courses, labs, and completion state
    List {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Grade one answer without starting the server
    Check {
        #[command(flatten)]
        store: StoreArgs,

        /// Course id (file stem of the question set)
        #[arg(long)]
        course: String,

        /// Lab id within the course
        #[arg(long)]
        lab: String,

        /// Question id within the lab
        #[arg(long)]
        question: u32,

        /// Answer text to grade
        #[arg(long)]
        answer: String,
    },

    /// Create a starter config and example question set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labquiz=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { store, host, port } => commands::serve::execute(store, host, port).await,
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::List { store } => commands::list::execute(store),
        Commands::Check {
            store,
            course,
            lab,
            question,
            answer,
        } => commands::check::execute(store, course, lab, question, answer),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
