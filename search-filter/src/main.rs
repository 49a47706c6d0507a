use anyhow::Context;
use clap::Parser;
use search_filter::{Clause, FilterDocument, QueryBuilder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "search-filter",
    about = "Render a search-engine filter string",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// YAML or JSON filter document
    file: Option<PathBuf>,

    /// Extra condition in the form `attribute OP value`, e.g. `price < 100`
    #[arg(long = "where", value_name = "CLAUSE")]
    clauses: Vec<Clause>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    if std::env::var("RUST_LOG").is_err() {
        if verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    pretty_env_logger::init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut builder = QueryBuilder::new();
    if let Some(path) = &cli.file {
        let document = FilterDocument::load(path)
            .with_context(|| format!("Failed to load filter document {}", path.display()))?;
        document.apply(&mut builder)?;
    }
    for clause in &cli.clauses {
        clause.apply(&mut builder)?;
    }

    println!("{}", builder.build());
    Ok(())
}
