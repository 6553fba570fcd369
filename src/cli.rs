use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Diet optimizer: evolves a meal plan toward better nutrition, cost,
/// menu harmony and variety.
#[derive(Parser, Debug)]
#[command(name = "diet_optimizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Input files shared by every command that scores plans.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Menu catalogue JSON file.
    #[arg(long, default_value = "menus.json")]
    pub menus: PathBuf,

    /// Historical meal records used for cost bounds and harmony.
    #[arg(long, default_value = "history.json")]
    pub history: PathBuf,

    /// Ingredient price table (CSV with Ingredient,Price per 100 g).
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Fail on unknown menu names instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the multi-objective search from a seed plan.
    Optimize {
        #[command(flatten)]
        data: DataArgs,

        /// Seed plan JSON file.
        #[arg(long, default_value = "plan.json")]
        plan: PathBuf,

        /// Optimizer settings JSON file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the generation ceiling.
        #[arg(long)]
        generations: Option<usize>,

        /// Override the population size.
        #[arg(long)]
        population: Option<usize>,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "123")]
        seed: u64,

        /// Write the final front as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the final front and its plans as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Save the first front plan in plan-file format.
        #[arg(long)]
        save: Option<PathBuf>,

        /// Overwrite output files without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the four objective scores of one plan.
    Score {
        #[command(flatten)]
        data: DataArgs,

        /// Plan JSON file to score.
        #[arg(long, default_value = "plan.json")]
        plan: PathBuf,
    },

    /// Print the menu pairs served together most often in history.
    Harmony {
        #[command(flatten)]
        data: DataArgs,

        /// Number of pairs to show.
        #[arg(long, default_value = "10")]
        top: usize,
    },
}
