//! Command-line playground for the FlowScribe engine: apply a flowchart
//! file, inspect the laid-out result, or round-trip it back to text.

use anyhow::Context;
use clap::{Parser, Subcommand};
use flowscribe_core::convert::ConvertOptions;
use flowscribe_core::layout::LayoutConfig;
use flowscribe_core::samples::{SAMPLE_FLOWS, load_sample};
use flowscribe_core::sync::{apply_text, to_text};
use scribe_canvas::model::NodePayload;
use scribe_canvas::store::FlowStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowscribe", about = "FlowScribe flowchart engine playground")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a flowchart file, run layout, and print the placed nodes.
    Render {
        path: PathBuf,
        /// Skip group-node emission for subgraphs.
        #[arg(long)]
        no_groups: bool,
    },
    /// Parse a flowchart file and re-serialize it from the visual graph.
    Roundtrip { path: PathBuf },
    /// Load a built-in sample flow (or list them all).
    Sample { id: Option<String> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let opts = ConvertOptions::default();
    let layout_cfg = LayoutConfig::default();
    let mut store = FlowStore::new();

    match cli.command {
        Command::Render { path, no_groups } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let opts = ConvertOptions {
                enable_groups: !no_groups,
            };
            apply_text(&mut store, &text, &opts, &layout_cfg)?;
            print_nodes(&store);
        }
        Command::Roundtrip { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let direction = apply_text(&mut store, &text, &opts, &layout_cfg)?;
            print!("{}", to_text(&store, direction));
        }
        Command::Sample { id: Some(id) } => {
            let direction = load_sample(&mut store, &id, &opts, &layout_cfg)?;
            print_nodes(&store);
            println!();
            print!("{}", to_text(&store, direction));
        }
        Command::Sample { id: None } => {
            for sample in SAMPLE_FLOWS {
                println!("{:<24} {}", sample.id, sample.name);
            }
        }
    }
    Ok(())
}

fn print_nodes(store: &FlowStore) {
    for node in store.nodes() {
        match &node.payload {
            NodePayload::Process(data) => println!(
                "{:<16} {:<12} ({:>7.1}, {:>7.1})  {}",
                node.id,
                format!("{:?}", data.node_type).to_lowercase(),
                node.position.x,
                node.position.y,
                data.label,
            ),
            NodePayload::Group(data) => println!("{:<16} group        {}", node.id, data.label),
        }
    }
    println!("{} nodes, {} edges", store.nodes().len(), store.edges().len());
}
