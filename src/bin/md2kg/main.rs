//! md2kg CLI tool
//!
//! Converts Markdown documents with `[[Title]]` WikiLinks into a knowledge
//! graph and exports it as CSV node/edge tables.
//!
//! ## Commands
//!
//! - `parse <path>`: parse a file or directory and write `nodes.csv` and
//!   `edges.csv` to the output directory

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use md2kg::{
    builder::{compile_pattern, scan_dir, GraphBuilder, DEFAULT_PATTERN},
    export::CsvExporter,
};

#[derive(Parser)]
#[command(name = "md2kg")]
#[command(author, version, about = "Convert Markdown documents with WikiLinks to a knowledge graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse Markdown files and create a knowledge graph
    Parse {
        /// A single Markdown file or a directory containing Markdown files
        input_path: PathBuf,

        /// Directory to write output files. Created if it doesn't exist
        #[arg(short, long, default_value = "./kg_output")]
        output: PathBuf,

        /// Glob pattern to include files when the input is a directory
        #[arg(long, default_value = DEFAULT_PATTERN)]
        include: String,

        /// Glob pattern to exclude files from the include set
        #[arg(long)]
        exclude: Option<String>,

        /// Drop front-matter tags from exported nodes
        #[arg(long)]
        no_frontmatter_tags: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input_path,
            output,
            include,
            exclude,
            no_frontmatter_tags,
        } => {
            let mut builder = GraphBuilder::new();

            if input_path.is_dir() {
                println!("Parsing Markdown files in directory: {}", input_path.display());
                if let Some(exclude) = exclude {
                    // Exclusion is a post-filter on the enumerated file list,
                    // not a builder concern.
                    let root = std::path::absolute(&input_path)?;
                    let excluded = compile_pattern(&exclude)?;
                    for filepath in scan_dir(&root, &include)? {
                        let relative = filepath.strip_prefix(&root).unwrap_or(&filepath);
                        if excluded.is_match(relative) {
                            tracing::debug!("Excluded {:?}", filepath);
                            continue;
                        }
                        builder.add_file(filepath);
                    }
                } else {
                    builder.add_directory(&input_path, &include)?;
                }
            } else {
                println!("Parsing Markdown file: {}", input_path.display());
                builder.add_file(&input_path);
            }

            let (mut nodes, edges) = builder.get_graph();
            if no_frontmatter_tags {
                for node in &mut nodes {
                    node.tags.clear();
                }
            }
            println!("Found {} nodes and {} edges", nodes.len(), edges.len());

            let exporter = CsvExporter::new();
            let output_files = exporter.export(&nodes, &edges, &output)?;

            println!("Exported nodes to {}", output_files.nodes_csv.display());
            println!("Exported edges to {}", output_files.edges_csv.display());

            Ok(())
        }
    }
}
