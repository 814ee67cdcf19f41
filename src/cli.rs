use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use bom_explorer::application::dto::OutputFormat;
use bom_explorer::bom_structure::domain::Operation;

/// Inspect and edit multi-level BOM trees
#[derive(Parser, Debug)]
#[command(name = "bom-explorer")]
#[command(version)]
#[command(about = "Rebuild, inspect and edit multi-level BOM trees", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./bom-explorer.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a BOM and print its tree
    Show(ShowArgs),
    /// Print the drop mode for a pointer position over a node
    Classify(ClassifyArgs),
    /// Tell whether an operation on a node is locked by the ERP
    Lock(LockArgs),
    /// Plan the mutation a drag-and-drop would send, without sending it
    PlanDrop(PlanDropArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// BOM snapshot JSON file
    #[arg(short, long, value_name = "FILE", conflicts_with = "api_url")]
    pub snapshot: Option<PathBuf>,

    /// Base URL of the BOM REST API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// BOM document id (required with the API)
    #[arg(short, long, value_name = "ID")]
    pub bom: Option<String>,

    /// BOM version
    #[arg(long = "bom-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Load every nested BOM instead of the BOM's own lines
    #[arg(short, long)]
    pub multilevel: bool,

    /// Deepest level loaded with --multilevel
    #[arg(long, value_name = "N", requires = "multilevel")]
    pub max_level: Option<u32>,

    /// Output format: tree or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Pointer geometry shared by `classify` and `plan-drop`
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PointerArgs {
    /// Pointer x coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Width of the node's box
    #[arg(long)]
    pub width: f64,

    /// Left edge of the node's box
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub left: f64,

    /// Act as if the replace modifier key were held
    #[arg(long)]
    pub force_replace: bool,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Level of the hovered node
    #[arg(long)]
    pub level: i64,

    #[command(flatten)]
    pub pointer: PointerArgs,
}

#[derive(clap::Args, Debug)]
pub struct LockArgs {
    /// BOM snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Node id, as listed by `show --format json`
    #[arg(short, long, value_name = "ID")]
    pub node: String,

    /// modify, replace, add-under, add-sibling or delete
    #[arg(long)]
    pub operation: Operation,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["item", "temporary"])))]
pub struct PlanDropArgs {
    /// BOM snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Node id of the drop target
    #[arg(short, long, value_name = "ID")]
    pub node: String,

    #[command(flatten)]
    pub pointer: PointerArgs,

    /// Drop an existing article
    #[arg(long, value_name = "ITEM_ID")]
    pub item: Option<String>,

    /// Drop a new article with a generated temporary code
    #[arg(long, value_name = "DESCRIPTION")]
    pub temporary: Option<String>,

    /// Quantity of the dropped article
    #[arg(short, long)]
    pub quantity: Option<f64>,

    /// Unit of measure of a temporary article
    #[arg(long, requires = "temporary")]
    pub uom: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
