use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lineage_graph::{
    ancestry::AncestorResolver,
    config::{Config, EnvOverrides},
    dataset::Dataset,
    logging::init_tracing,
    reports::ReportGenerator,
    types::{
        AncestorId, OutputFormat, QueryReport, SearchStrategy, TieBreak, TraversalOrder,
        NO_ANCESTOR,
    },
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Directed graph traversal and earliest-ancestor queries")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    output: Option<OutputArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every vertex reachable from a start vertex
    Traverse {
        /// Dataset file (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        start: AncestorId,

        #[arg(long, value_enum, default_value = "bft")]
        order: OrderArg,
    },

    /// Find a path between two vertices
    Search {
        /// Dataset file (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        start: AncestorId,

        #[arg(short, long)]
        goal: AncestorId,

        #[arg(long, value_enum, default_value = "bfs")]
        strategy: StrategyArg,
    },

    /// Print the direct neighbors of a vertex
    Neighbors {
        /// Dataset file (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        vertex: AncestorId,
    },

    /// Resolve the earliest ancestor from the dataset's ancestry pairs
    Ancestor {
        /// Dataset file (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        start: AncestorId,

        /// Tie-break policy (overrides the configuration file)
        #[arg(long, value_enum)]
        tie_break: Option<TieBreakArg>,
    },

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short = 'f', long, default_value = "lineage.yml")]
        config_file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Bft,
    Dft,
    DftRecursive,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    DfsRecursive,
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakArg {
    LastDiscovered,
    SmallestId,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::LastDiscovered => TieBreak::LastDiscovered,
            TieBreakArg::SmallestId => TieBreak::SmallestId,
        }
    }
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(output) = cli.output {
        config.output.format = output.into();
    }
    config.validate()?;

    init_tracing(&config.logging)?;

    let generator = ReportGenerator::new(config.output.format);

    let report = match cli.command {
        Commands::Traverse { file, start, order } => traverse(&file, start, order)?,
        Commands::Search {
            file,
            start,
            goal,
            strategy,
        } => search(&file, start, goal, strategy)?,
        Commands::Neighbors { file, vertex } => neighbors(&file, vertex)?,
        Commands::Ancestor {
            file,
            start,
            tie_break,
        } => {
            let tie_break = tie_break.map(TieBreak::from).unwrap_or(config.resolver.tie_break);
            ancestor(&file, start, tie_break)?
        }
        Commands::Init { config_file, force } => {
            return init_config(&config_file, force);
        }
    };

    println!("{}", generator.generate(&report)?);
    Ok(())
}

/// Defaults, then the configuration file, then environment overrides
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = config_path {
        if path.exists() {
            config = Config::load_from_file(path)?;
        } else {
            // tracing is not initialized yet
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
        }
    }

    let overrides = EnvOverrides::from_env().context("Invalid environment configuration")?;
    config.apply_env_overrides(overrides);
    Ok(config)
}

fn traverse(file: &Path, start: AncestorId, order: OrderArg) -> Result<QueryReport> {
    let graph = Dataset::load(file)?.to_graph()?;

    let (order, visited) = match order {
        OrderArg::Bft => (
            TraversalOrder::BreadthFirst,
            graph.breadth_first_traversal(&start)?,
        ),
        OrderArg::Dft => (
            TraversalOrder::DepthFirst,
            graph.depth_first_traversal_iterative(&start)?,
        ),
        OrderArg::DftRecursive => (
            TraversalOrder::DepthFirstRecursive,
            graph.depth_first_traversal_recursive(&start)?,
        ),
    };

    info!("Visited {} vertices from {}", visited.len(), start);
    Ok(QueryReport::Traversal { order, start, visited })
}

fn search(
    file: &Path,
    start: AncestorId,
    goal: AncestorId,
    strategy: StrategyArg,
) -> Result<QueryReport> {
    let graph = Dataset::load(file)?.to_graph()?;

    let (strategy, path) = match strategy {
        StrategyArg::Bfs => (
            SearchStrategy::BreadthFirst,
            graph.breadth_first_search(&start, &goal)?,
        ),
        StrategyArg::Dfs => (
            SearchStrategy::DepthFirst,
            graph.depth_first_search_iterative(&start, &goal)?,
        ),
        StrategyArg::DfsRecursive => (
            SearchStrategy::DepthFirstRecursive,
            graph.depth_first_search_recursive(&start, &goal)?,
        ),
    };

    if path.is_none() {
        warn!("No path from {} to {}", start, goal);
    }
    Ok(QueryReport::Search {
        strategy,
        start,
        goal,
        path,
    })
}

fn neighbors(file: &Path, vertex: AncestorId) -> Result<QueryReport> {
    let graph = Dataset::load(file)?.to_graph()?;

    let mut neighbors: Vec<AncestorId> = graph.get_neighbors(&vertex)?.into_iter().collect();
    neighbors.sort_unstable();

    Ok(QueryReport::Neighbors { vertex, neighbors })
}

fn ancestor(file: &Path, start: AncestorId, tie_break: TieBreak) -> Result<QueryReport> {
    let dataset = Dataset::load(file)?;
    if dataset.pairs.is_empty() {
        warn!("Dataset {:?} contains no ancestry pairs", file);
    }

    let resolver = AncestorResolver::new(tie_break);
    let chain = resolver.resolve_chain(&dataset.pairs, start).unwrap_or_default();
    let ancestor = chain.last().copied().unwrap_or(NO_ANCESTOR);

    Ok(QueryReport::Ancestor {
        start,
        tie_break: resolver.tie_break(),
        ancestor,
        chain,
    })
}

/// Initialize configuration file
fn init_config(config_file: &Path, force: bool) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() && !force {
        warn!("Configuration file already exists: {:?}", config_file);
        println!("Configuration file already exists: {:?} (use --force to overwrite)", config_file);
        return Ok(());
    }

    Config::default()
        .save_to_file(config_file)
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);
    Ok(())
}
