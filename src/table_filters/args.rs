use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "table-filters")]
#[command(about = "Inspect and render table filters for a request query string", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Table config file (defaults to ./filters.json, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered filters
    #[command(alias = "ls")]
    List,

    /// Print the live filters for a query string as JSON
    Live {
        /// Query string, e.g. "filter[status]=active"
        #[arg(default_value = "")]
        query: String,
    },

    /// Print the filter key/value map for a query string as JSON
    Values {
        /// Query string, e.g. "filter[status]=active"
        #[arg(default_value = "")]
        query: String,
    },

    /// Print whether any filter is active for a query string
    Enabled {
        /// Query string, e.g. "filter[status]=active"
        #[arg(default_value = "")]
        query: String,
    },

    /// Render the filter controls as HTML
    Render {
        /// Query string, e.g. "filter[status]=active"
        #[arg(default_value = "")]
        query: String,
    },

    /// Write a sample table config
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}
