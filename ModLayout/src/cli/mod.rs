//! ModLayout CLI - lay out a module archive as browsable folders

pub mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use console::Emoji;
use indicatif::ProgressBar;
use tracing::level_filters::LevelFilter;

use crate::config::ModLayoutConfig;
use crate::error::Error;
use crate::layout::{LayoutReport, Phase, extract_module_with_progress};
use crate::tools::{ModuleTools, NwnTools};
use progress::{BOOK, FOLDER, LOOKING_GLASS, PACKAGE};

#[derive(Parser)]
#[command(name = "modlayout", version)]
#[command(
    about = "ModLayout: lay out a Neverwinter Nights module as palette folders",
    long_about = None
)]
struct Cli {
    /// Output directory
    output: PathBuf,

    /// Module archive (.mod)
    module: PathBuf,

    /// String table (dialog.tlk)
    tlk: PathBuf,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to create the scratch area in (defaults to the system temp directory)
    #[arg(long)]
    scratch: Option<PathBuf>,

    /// Keep the scratch directory after the run
    #[arg(long)]
    keep_scratch: bool,

    /// Archive extractor program
    #[arg(long, value_name = "PROGRAM")]
    erf_tool: Option<String>,

    /// GFF to JSON converter program
    #[arg(long, value_name = "PROGRAM")]
    gff_tool: Option<String>,

    /// TLK to JSON converter program
    #[arg(long, value_name = "PROGRAM")]
    tlk_tool: Option<String>,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }

    /// Config file values with command-line overrides applied
    fn resolve_config(&self) -> anyhow::Result<ModLayoutConfig> {
        let mut config = ModLayoutConfig::load_or_default(self.config.as_deref())
            .context("Failed to load config")?;

        if let Some(scratch) = &self.scratch {
            config.scratch_dir = Some(scratch.clone());
        }
        if self.keep_scratch {
            config.keep_scratch = true;
        }
        if let Some(erf) = &self.erf_tool {
            config.tools.erf.clone_from(erf);
        }
        if let Some(gff) = &self.gff_tool {
            config.tools.gff.clone_from(gff);
        }
        if let Some(tlk) = &self.tlk_tool {
            config.tools.tlk.clone_from(tlk);
        }
        Ok(config)
    }
}

/// Run the ModLayout CLI
pub fn run_cli() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .init();

    let result = cli
        .resolve_config()
        .and_then(|config| run(&cli, &config, &NwnTools::new(&config.tools)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code for a failed run: the library error's code, or 1
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}

fn run<T: ModuleTools + ?Sized>(
    cli: &Cli,
    config: &ModLayoutConfig,
    tools: &T,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut spinner: Option<ProgressBar> = None;

    let result = extract_module_with_progress(
        tools,
        config,
        &cli.module,
        &cli.tlk,
        &cli.output,
        |phase| {
            if cli.quiet {
                return;
            }
            progress::print_step(
                phase.number(),
                Phase::ALL.len(),
                phase_emoji(phase),
                phase.description(),
            );
            if phase == Phase::Organizing {
                spinner = Some(progress::simple_spinner("Organizing..."));
            }
        },
    );
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result?;

    if !cli.quiet {
        print_summary(&report);
        progress::print_done(started.elapsed());
    }
    Ok(())
}

fn phase_emoji(phase: Phase) -> &'static Emoji<'static, 'static> {
    match phase {
        Phase::Extracting => &PACKAGE,
        Phase::Cataloging => &LOOKING_GLASS,
        Phase::LoadingStrings => &BOOK,
        Phase::Organizing => &FOLDER,
    }
}

fn print_summary(report: &LayoutReport) {
    println!();
    println!(
        "Resources: {} ({} skipped)",
        report.resources,
        report.skipped_resources.len()
    );
    for (kind, count) in &report.resource_counts {
        println!("  {:16} {count:>6}", kind.display_name());
    }
    for skipped in &report.skipped_resources {
        if let Some(name) = skipped.file_name() {
            println!("  skipped {}", name.to_string_lossy());
        }
    }

    println!("Palettes:");
    for summary in &report.palettes {
        println!(
            "  {:10} {:>5} categories {:>6} blueprints",
            summary.kind.display_name(),
            summary.entries,
            summary.copied
        );
    }
    println!(
        "  areas: {}  dialogues: {}  scripts: {}  journal: {}",
        report.areas,
        report.dialogues,
        report.scripts,
        if report.journal { "yes" } else { "no" }
    );
    if let Some(kept) = &report.kept_scratch {
        println!("Scratch kept at {}", kept.display());
    }

    for skipped in &report.skipped_palettes {
        progress::print_warning(&format!(
            "skipped {}: {}",
            skipped.source.display(),
            skipped.reason
        ));
    }
    if !report.warnings.is_empty() {
        println!("{} warnings (see log output)", report.warnings.len());
    }
}
