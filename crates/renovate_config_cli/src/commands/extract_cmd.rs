//! `extract`: preview the dependencies the regex managers find in a tree.
//!
//! Every file below `--root` (except inside `.git`) is offered to the
//! managers whose `fileMatch` selects its path relative to the root.
//!
//! ```bash
//! renovate-config extract --document renovate.json --root ../infrastructure
//! ```

use std::fs;
use std::path::Path;

use clap::Args;
use colored::Colorize;
use renovate_config::{
    load_and_validate, ConfigurationError, ConfigurationValidator, ExtractedDependency,
    RegexExtractor,
};
use tracing::{debug, error, info, instrument};
use walkdir::WalkDir;

use crate::commands::{check_format, resolve_document, to_json};
use crate::config::CliConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "extract_cmd_tests.rs"]
mod tests;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the configuration document (.json or .toml)
    #[arg(short, long)]
    pub document: Option<String>,

    /// Directory to scan
    #[arg(short, long, default_value = ".")]
    pub root: String,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Execute the extract command
#[instrument(skip(settings))]
pub fn execute(args: &ExtractArgs, settings: &CliConfig) -> Result<(), Error> {
    check_format(&args.format)?;

    let path = resolve_document(args.document.as_deref(), settings);
    let config = load_and_validate(&path, &ConfigurationValidator::new()?)?;
    let extractor = RegexExtractor::new(&config).map_err(ConfigurationError::from)?;

    let dependencies = collect_dependencies(&extractor, Path::new(&args.root))?;
    info!(
        message = "Extraction finished",
        root = %args.root,
        dependencies = dependencies.len()
    );

    match args.format.as_str() {
        "json" => println!("{}", to_json(&dependencies)?),
        _ => println!("{}", format_dependencies_text(&dependencies)),
    }
    Ok(())
}

/// Runs the extractor over every file below `root`.
///
/// Files are visited in name order; files that are not UTF-8 are skipped.
pub fn collect_dependencies(
    extractor: &RegexExtractor,
    root: &Path,
) -> Result<Vec<ExtractedDependency>, Error> {
    let mut dependencies = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.map_err(|e| {
            error!("Failed to read directory entry: {}", e);
            Error::LoadFile(e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = relative_path(root, entry.path());
        let selected = (0..extractor.manager_count())
            .any(|index| extractor.matches_file(index, &relative_path));
        if !selected {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|e| {
            error!("Failed to read file {:?}: {}", entry.path(), e);
            Error::LoadFile(e)
        })?;
        let Ok(content) = String::from_utf8(bytes) else {
            debug!(message = "Skipping non UTF-8 file", path = %relative_path);
            continue;
        };

        dependencies.extend(extractor.extract(&relative_path, &content)?);
    }

    Ok(dependencies)
}

/// Path of `path` below `root` with `/` separators.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn format_dependencies_text(dependencies: &[ExtractedDependency]) -> String {
    if dependencies.is_empty() {
        return format!("{}", "No dependencies found".dimmed());
    }

    let mut text = String::new();
    let mut current_file: Option<&str> = None;
    for dep in dependencies {
        if current_file != Some(dep.file.as_str()) {
            text.push_str(&format!("\n{}\n", dep.file.bold().bright_cyan()));
            current_file = Some(dep.file.as_str());
        }

        let name = dep.dep_name.as_deref().unwrap_or("(unknown)");
        let version = dep
            .current_value
            .as_deref()
            .or(dep.current_digest.as_deref())
            .unwrap_or("(unknown)");
        let datasource = dep.datasource.as_deref().unwrap_or("(unknown)");

        text.push_str(&format!(
            "  {} {} {} [{}] (manager {})",
            "•".green(),
            name.bold(),
            version,
            datasource,
            dep.manager_index
        ));
        if let Some(versioning) = &dep.versioning {
            text.push_str(&format!(" versioning={}", versioning));
        }
        if let Some(reason) = dep.skip_reason {
            text.push_str(&format!(" {}", format!("skipped: {}", reason).yellow()));
        }
        text.push('\n');
    }

    text.push_str(&format!("\n{} dependencies found\n", dependencies.len()));
    text
}
