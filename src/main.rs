use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pathways_archive::cli::{
    handle_export_command, handle_generate_command, handle_summary_command, ExportFormat,
};
use pathways_archive::config::{paths::ArchivePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "pathways-archive",
    author = "Christopher Vickery",
    version,
    about = "Generate the archive of approved QC Pathways proposals",
    long_about = "Reads the preserved curriculum and course catalog databases and writes a \
                  static HTML archive of every approved Pathways proposal, ready for \
                  conversion to PDF."
)]
struct Cli {
    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Course catalog database (path or file: URI)
    #[arg(long, env = "PATHWAYS_CATALOG_DB", global = true)]
    catalog_db: Option<String>,

    /// Curriculum workflow database (path or file: URI)
    #[arg(long, env = "PATHWAYS_CURRICULUM_DB", global = true)]
    curriculum_db: Option<String>,

    /// Institution filter for catalog courses
    #[arg(long, global = true)]
    institution: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the HTML archive (the default command)
    Generate {
        /// Write to a file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show per-category approval counts
    Summary,

    /// Export the grouped approvals
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Write to a file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the document
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let paths = ArchivePaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_overrides(
        cli.catalog_db,
        cli.curriculum_db,
        cli.institution,
    );

    match cli.command {
        None => handle_generate_command(&settings, None)?,
        Some(Commands::Generate { output }) => handle_generate_command(&settings, output)?,
        Some(Commands::Summary) => handle_summary_command(&settings)?,
        Some(Commands::Export {
            format,
            output,
            pretty,
        }) => handle_export_command(&settings, format, output, pretty)?,
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            println!("Pathways Archive Configuration");
            println!("==============================");
            println!("Config directory: {}", paths.base_dir().display());
            if paths.is_initialized() {
                println!("Settings file:    {}", paths.settings_file().display());
            } else {
                println!(
                    "Settings file:    {} (not created, using defaults)",
                    paths.settings_file().display()
                );
            }
            println!();
            println!("Settings:");
            println!("  Catalog database:    {}", settings.catalog_db);
            println!("  Curriculum database: {}", settings.curriculum_db);
            println!("  Institution filter:  {}", settings.institution);
            println!(
                "  Date range from proposals after: {}",
                settings.date_range_min_proposal
            );
            println!(
                "  Designation wrappers: leading {:?}, trailing {:?}",
                settings.designation.leading, settings.designation.trailing
            );
        }
    }

    Ok(())
}
