use crate::domain::model::{Identity, NewFundraiser};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "fundraiser-registry")]
#[command(about = "Create and page through fundraisers in a factory registry")]
pub struct CliConfig {
    /// Path to a TOML file with registry settings and seed fundraisers
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the number of fundraisers
    Count,

    /// Print one page of fundraisers as JSON
    List {
        #[arg(long, default_value = "20", allow_negative_numbers = true)]
        limit: i64,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,
    },

    /// Print a single fundraiser as JSON
    Show { index: usize },

    /// Create a fundraiser and print the emitted event
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        url: String,

        #[arg(long)]
        image_url: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        beneficiary: String,
    },
}

impl Command {
    /// The draft for `create`; `None` for read-only commands.
    pub fn draft(&self) -> Option<NewFundraiser> {
        match self {
            Command::Create {
                name,
                url,
                image_url,
                description,
                beneficiary,
            } => Some(NewFundraiser {
                name: name.clone(),
                url: url.clone(),
                image_url: image_url.clone(),
                description: description.clone(),
                beneficiary: (!beneficiary.is_empty()).then(|| Identity::new(beneficiary.clone())),
            }),
            _ => None,
        }
    }
}
