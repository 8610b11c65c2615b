/*!
 * Command-line interface for ctxdump
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;

use ctxdump::clipboard;
use ctxdump::config::{Args, Config};
use ctxdump::reader::ContentReader;
use ctxdump::report::{ReportAssembler, Reporter, RunSummary};
use ctxdump::rules::{self, IgnoreRules};
use ctxdump::tree::TreeBuilder;
use ctxdump::utils;
use ctxdump::{PathFilter, Result};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Generate shell completions and exit
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = Config::from_args(args);

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the full pipeline. Returns the number of failed output deliveries;
/// the report itself is always produced once the target validates.
fn run(config: &Config) -> Result<u32> {
    let target = config.target_dir.canonicalize()?;
    let project_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| target.display().to_string());

    // Resolve the rule set once, before traversal starts
    let ignore_file = config
        .ignore_file
        .clone()
        .or_else(|| rules::discover_ignore_file(&target));
    let target_file = config
        .target_file
        .clone()
        .or_else(|| rules::discover_target_file(&target));
    let ignore_rules = IgnoreRules::load(
        &config.ignore_dirs,
        &config.ignore_files,
        ignore_file.as_deref(),
        target_file.as_deref(),
    );
    let filter = PathFilter::new(ignore_rules, config.include_hidden);

    // One walk yields both the tree text and the accepted-file list
    let tree = TreeBuilder::new(&target, &filter, config.max_depth).generate();

    let progress = ProgressBar::new(tree.files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    let reader = ContentReader::new(filter.include_hidden(), Arc::new(progress.clone()));
    let entries = reader.read_all(&tree.files);
    progress.finish_and_clear();

    let assembler = ReportAssembler::new(&project_name);
    let report = assembler.format(&tree.text, &entries);

    // Each output path succeeds or fails on its own
    let mut destinations = Vec::new();
    let mut failures = 0;

    if let Some(path) = &config.output_file {
        match assembler.write_to_file(&report, path) {
            Ok(()) => destinations.push(path.display().to_string()),
            Err(e) => {
                error!("Failed to write report to {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if config.clip || config.output_file.is_none() {
        match clipboard::copy_to_clipboard(&report) {
            Ok(()) => destinations.push("clipboard".to_string()),
            Err(e) => {
                error!("Failed to copy report to clipboard: {}", e);
                failures += 1;
            }
        }
    }

    let summary = RunSummary {
        destination: if destinations.is_empty() {
            "nowhere (all outputs failed)".to_string()
        } else {
            destinations.join(", ")
        },
        directory_count: tree.directory_count,
        file_count: entries.len(),
        total_chars: entries.iter().map(|e| e.content.char_count()).sum(),
        tokens: utils::count_tokens(&entries),
    };
    Reporter::new().print_summary(&summary);

    Ok(failures)
}
