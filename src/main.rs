// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pdf_phrase_search::utils::logging::{format_error, format_info, format_success, format_warning};
use pdf_phrase_search::{
    Config, DriveClient, FolderDownloader, OutputFormat, SearchPipeline, SearchRequest,
    SourceKind, Validator, extract_folder_id, write_report,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pdf_phrase_search")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Find a phrase across the PDFs of a Google Drive folder or a ZIP archive", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = pdf_phrase_search::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every PDF in the selected source for a phrase
    Search {
        #[arg(short, long, value_enum)]
        source: SourceKind,

        /// Google Drive folder link (with --source drive)
        #[arg(short, long)]
        link: Option<String>,

        /// ZIP file of PDFs (with --source zip)
        #[arg(short, long, value_name = "FILE")]
        archive: Option<PathBuf>,

        #[arg(short, long)]
        phrase: Option<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Sort by file name and page instead of visit order
        #[arg(long)]
        sort: bool,

        #[arg(long)]
        no_progress: bool,

        /// Write results to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the folder id contained in a Google Drive link
    FolderId { link: String },

    /// Download a Google Drive folder without searching it
    Download { link: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    pdf_phrase_search::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    if let Err(err) = run(cli).await {
        eprintln!("{}", format_error(&format!("An error occurred: {:#}", err)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Search {
            source,
            link,
            archive,
            phrase,
            format,
            sort,
            no_progress,
            output,
        } => {
            let mut config = config;
            config.search.sort_results |= sort;
            config.search.show_progress &= !no_progress;
            if let Some(format) = format {
                config.output.format = format;
            }

            cmd_search(&config, source, link, archive, phrase, output).await?;
        }
        Commands::FolderId { link } => {
            let id = extract_folder_id(&link)?;
            println!("{}", id);
        }
        Commands::Download { link } => {
            cmd_download(&config, &link).await?;
        }
    }

    Ok(())
}

async fn cmd_search(
    config: &Config,
    source: SourceKind,
    link: Option<String>,
    archive: Option<PathBuf>,
    phrase: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let archive_bytes = match (source, archive) {
        (SourceKind::ZipArchive, Some(path)) => Some(
            Validator::read_archive(&path)
                .with_context(|| format!("Failed to read archive {}", path.display()))?,
        ),
        _ => None,
    };

    let request = SearchRequest::from_inputs(source, link, archive_bytes, phrase)?;

    eprintln!("{}", format_info("Processing..."));
    let pipeline = SearchPipeline::from_config(config).context("Failed to create pipeline")?;
    let outcome = pipeline.run(&request).await?;

    for skipped in &outcome.report.skipped {
        eprintln!("{}", format_warning(&skipped.reason));
    }
    eprintln!("{}", format_success("Search complete!"));

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(
                &outcome.report,
                config.output.format,
                config.output.pretty,
                &mut writer,
            )?;
            writer.flush()?;
            info!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(
                &outcome.report,
                config.output.format,
                config.output.pretty,
                &mut handle,
            )?;
        }
    }

    let stats = &outcome.report.stats;
    info!(
        "{} files ({} skipped), {} pages, {} matches in {} ms ({:.1} pages/s)",
        stats.files_total(),
        stats.files_skipped,
        stats.pages_scanned,
        stats.matches,
        stats.duration_ms,
        stats.pages_per_second()
    );

    Ok(())
}

async fn cmd_download(config: &Config, link: &str) -> Result<()> {
    let folder_id = extract_folder_id(link)?;
    let client = DriveClient::new(&config.drive).context("Failed to create Drive client")?;
    let folder = client.download_folder(&folder_id).await?;

    if folder.files.is_empty() {
        eprintln!("{}", format_warning("Folder contains no downloadable files"));
    } else {
        eprintln!(
            "{}",
            format_success(&format!("Downloaded {} files", folder.files.len()))
        );
    }
    println!("{}", folder.root.display());

    Ok(())
}
