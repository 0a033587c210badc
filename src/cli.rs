//! Command-line arguments for the `career-quiz` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::assessment::Category;

#[derive(Debug, Parser)]
#[command(name = "career-quiz", version, about = "Career assessment quiz client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend API base URL (overrides CAREER_QUIZ_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides CAREER_QUIZ_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// File used to hand the result to `result` (overrides CAREER_QUIZ_RESULT_PATH)
    #[arg(long, global = true)]
    pub result_path: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Take the assessment (default)
    Take,
    /// Show the most recently handed-off result
    #[command(name = "result")]
    LastResult,
    /// List past assessments for an email address
    History {
        #[arg(long)]
        email: String,
    },
    /// Show a stored assessment by id
    Show { id: String },
    /// List career domains
    Domains,
    /// List questions, optionally for one category
    Questions {
        #[arg(long)]
        category: Option<Category>,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to `take`.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Take)
    }
}
