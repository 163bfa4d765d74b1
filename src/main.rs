use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cellclique::{
    generate_batch, parse_batch, solve_batch, write_batch, BatchOptions, GeneratorConfig,
};

/// Group labelled cells into cliques of mutually close, label-sharing cells.
///
/// Reads a batch of cases and prints one `id group` line per cell.
#[derive(Parser, Debug)]
#[command(name = "cellclique", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    solve: SolveArgs,

    /// Log debug output to stderr (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a batch (the default when no subcommand is given)
    Solve(SolveArgs),
    /// Write a random batch input
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
struct SolveArgs {
    /// Input file (standard input when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cover the whole graph at once instead of per connected component
    #[arg(long)]
    no_split: bool,

    /// Solve cases one after another on the current thread
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of cases
    #[arg(long, default_value_t = 1)]
    cases: usize,

    /// Smallest cell count per case
    #[arg(long, default_value_t = 1)]
    min_cells: usize,

    /// Largest cell count per case
    #[arg(long, default_value_t = 20)]
    max_cells: usize,

    /// Largest distance threshold
    #[arg(long, default_value_t = 5)]
    max_radius: u32,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file (standard output when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the batch output.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    match cli.command {
        Some(Commands::Solve(args)) => cmd_solve(&args),
        Some(Commands::Generate(args)) => cmd_generate(&args),
        None => cmd_solve(&cli.solve),
    }
}

fn cmd_solve(args: &SolveArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let cases = parse_batch(&input).context("Failed to parse batch input")?;

    let options = BatchOptions::new()
        .with_parallel(!args.sequential)
        .with_component_split(!args.no_split);
    let assignments = solve_batch(&cases, &options).context("Failed to solve batch")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_batch(&mut out, &assignments).context("Failed to write output")?;
    out.flush().context("Failed to write output")?;
    Ok(())
}

fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        cases: args.cases,
        min_cells: args.min_cells,
        max_cells: args.max_cells,
        max_radius: args.max_radius,
        seed: args.seed,
    };
    let text = generate_batch(&config).context("Invalid generator settings")?;

    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write output")?,
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read standard input")?;
            Ok(buf)
        }
    }
}
