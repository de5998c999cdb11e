use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::prompt::{ContentType, IdeaForm};

/// Content idea generator backed by the Lavender Lab gateway
#[derive(Parser, Debug)]
#[command(name = "lavender", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Gateway base URL
    #[arg(long, env = "LAVENDER_GATEWAY_URL", global = true)]
    pub gateway_url: Option<String>,

    /// Bearer token for an authenticated gateway
    #[arg(long, env = "LAVENDER_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Storage file holding saved ideas
    #[arg(long, env = "LAVENDER_HISTORY_PATH", global = true)]
    pub history_path: Option<PathBuf>,

    /// Path to the CLI config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate ideas for one content type
    Generate(GenerateArgs),

    /// Manage saved ideas
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Check that the gateway is up
    Health,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Content type to generate ideas for
    #[arg(value_enum)]
    pub content_type: ContentType,

    /// Topic or theme (required)
    #[arg(short, long, default_value = "")]
    pub topic: String,

    /// Target audience (YouTube, blog)
    #[arg(short, long, default_value = "")]
    pub audience: String,

    /// Main goal (Instagram)
    #[arg(short, long, default_value = "")]
    pub goal: String,

    /// Tone of voice
    #[arg(long, default_value = "")]
    pub tone: String,

    /// Additional constraints
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Keywords to include (blog), repeat or separate with commas
    #[arg(short, long, value_delimiter = ',')]
    pub keyword: Vec<String>,

    /// Fill in the form interactively
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Choose ideas to save after generation
    #[arg(long, default_value_t = false, conflicts_with = "save_all")]
    pub pick: bool,

    /// Save every generated idea
    #[arg(long, default_value_t = false)]
    pub save_all: bool,

    /// Write the generated ideas to a plain-text file, optionally at PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

impl GenerateArgs {
    pub fn form(&self) -> IdeaForm {
        IdeaForm {
            topic: self.topic.clone(),
            audience: self.audience.clone(),
            goal: self.goal.clone(),
            tone: self.tone.clone(),
            notes: self.notes.clone(),
            keywords: self.keyword.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Show saved ideas, newest first
    List,

    /// Remove the saved idea at a position shown by `history list`
    Remove { position: usize },

    /// Delete every saved idea
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },

    /// Write saved ideas to a plain-text file
    Export {
        /// Category written in the document header
        #[arg(long, default_value = "All")]
        category: String,

        /// Output file; a timestamped name in the current directory by default
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
