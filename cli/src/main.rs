//! Command-line entry point for the ragline pipeline.
//!
//! Two subcommands mirror the two pipeline stages: `index` builds the
//! embedding store from a source file, `retrieve` writes a context file into
//! each target directory. The indexer must have run before the retriever;
//! never run the two concurrently against the same store.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ragline_pipeline::config::{
    DEFAULT_CHUNK_LENGTH, DEFAULT_HEADER_FILENAME, DEFAULT_MAX_CHUNKS, DEFAULT_MODEL,
    DEFAULT_OUTPUT_FILENAME, DEFAULT_TOP_N,
};
use ragline_pipeline::{
    IndexConfig, Indexer, OpenAIProvider, RetrieveConfig, Retriever, read_api_key,
};

#[derive(Parser)]
#[command(name = "ragline", version, about = "Embed a text corpus and assemble per-target context files")]
struct Cli {
    /// Path to a plain-text file holding the embedding API key.
    #[arg(long, default_value = "openai-key.txt")]
    api_key_file: PathBuf,

    /// Embedding model identifier.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chunk a source file and embed it into a store.
    Index {
        /// Source text file to index.
        source: PathBuf,

        /// Where to write the embedding store.
        #[arg(long, default_value = "embeddings.json")]
        store: PathBuf,

        /// Chunk length in characters.
        #[arg(long, default_value_t = DEFAULT_CHUNK_LENGTH)]
        chunk_length: usize,

        /// Maximum number of chunks submitted to the API.
        #[arg(long, default_value_t = DEFAULT_MAX_CHUNKS)]
        max_chunks: usize,
    },

    /// Write a context file into each target directory.
    Retrieve {
        /// Target directories, each expected to contain the header file.
        #[arg(required = true)]
        targets: Vec<PathBuf>,

        /// Embedding store to query.
        #[arg(long, default_value = "embeddings.json")]
        store: PathBuf,

        /// Number of snippets per target.
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Header filename inside each target directory.
        #[arg(long, default_value = DEFAULT_HEADER_FILENAME)]
        header_file: String,

        /// Output filename written inside each target directory.
        #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
        output_file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key = read_api_key(&cli.api_key_file)?;
    let provider = OpenAIProvider::new(api_key).with_model(&cli.model);

    match cli.command {
        Command::Index {
            source,
            store,
            chunk_length,
            max_chunks,
        } => {
            let config = IndexConfig::default()
                .with_model(&cli.model)
                .with_chunk_length(chunk_length)
                .with_max_chunks(max_chunks);

            let indexer = Indexer::new(provider, config)?;
            let summary = indexer.index_file(&source, &store).await?;

            info!(
                "Done: {} chunks embedded, {} failed, store saved to {}",
                summary.embedded,
                summary.failed,
                store.display()
            );
        }
        Command::Retrieve {
            targets,
            store,
            top_n,
            header_file,
            output_file,
        } => {
            let config = RetrieveConfig::default()
                .with_model(&cli.model)
                .with_top_n(top_n)
                .with_header_filename(header_file)
                .with_output_filename(output_file);

            let retriever = Retriever::new(provider, config);
            let summary = retriever.run(&store, &targets).await?;

            info!(
                "Done: {} context files written, {} targets skipped, {} failed",
                summary.written, summary.skipped, summary.failed
            );
        }
    }

    Ok(())
}
