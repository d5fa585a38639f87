// src/bin/hashmaster.rs
//! Hash Master — command-line front end
//!
//! stdout carries only results (the derived secret, listings); prompts and
//! logs go to stderr.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hash_master::backup::Conflict;
use hash_master::{
    load_config, Algorithm, CharRestriction, GenerateRequest, HashMaster, MasterPassword,
    MergeDecision, MergeOutcome,
};
use rpassword::read_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Deterministic password generator
///
/// The same description, master password and parameters always produce the
/// same output. Only the parameters are remembered, keyed by description.
#[derive(Parser)]
#[command(name = "hashmaster")]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the secret for a description
    ///
    /// Options left out are taken from the saved settings for the
    /// description, then from the last-used values.
    Generate {
        description: String,

        /// SHA-256, SHA-512, SHA-1, MD5, SHA-224 or SHA-384
        #[arg(short, long)]
        algorithm: Option<String>,

        /// all, alnum-underscore, alnum, alpha or numeric (or the full label)
        #[arg(short, long)]
        restriction: Option<String>,

        /// Maximum output length; empty or 0 for unlimited
        #[arg(short, long)]
        length: Option<String>,

        /// Number of hash rounds
        #[arg(short, long)]
        iterations: Option<String>,

        /// Read the master password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },

    /// List saved descriptions
    List {
        /// Case-insensitive substring filter (defaults to the saved filter)
        #[arg(short, long)]
        filter: Option<String>,

        /// Include inactive (zero-iteration) settings
        #[arg(long)]
        all: bool,
    },

    /// Show the saved parameters for a description
    Show { description: String },

    /// Delete the saved parameters for a description
    Delete {
        description: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write all saved settings to a JSON backup file
    Backup { file: PathBuf },

    /// Replace all saved settings with a backup file
    Restore {
        file: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Merge a backup file into the saved settings, asking on conflicts
    Merge { file: PathBuf },

    /// Print the stored preferences
    Prefs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut app = HashMaster::open(load_config());

    if let Some(err) = app.store().load_warning() {
        eprintln!("Warning: saved settings could not be loaded ({err}); starting empty");
    }

    match cli.command {
        Commands::Generate {
            description,
            algorithm,
            restriction,
            length,
            iterations,
            password_stdin,
        } => {
            let saved = app.parameters_for(&description);
            let algorithm = match algorithm {
                Some(a) => normalize_algorithm(&a),
                None => saved.algorithm,
            };
            let restriction = match restriction {
                Some(r) => normalize_restriction(&r),
                None => saved.char_restrictions,
            };

            let master_password = if password_stdin {
                let mut line = String::new();
                std::io::stdin().lock().read_line(&mut line)?;
                MasterPassword::new(line.trim_end_matches(['\r', '\n']).to_owned())
            } else {
                eprint!("Master password: ");
                std::io::stderr().flush()?;
                MasterPassword::new(read_password().context("failed to read master password")?)
            };

            let request = GenerateRequest {
                description,
                master_password,
                algorithm,
                restriction,
                length: length.unwrap_or(saved.length),
                iterations: iterations.unwrap_or(saved.iterations),
            };
            let output = app.generate(&request)?;
            println!("{output}");
        }

        Commands::List { filter, all } => {
            let names = match (filter, all) {
                (None, false) => app.visible_descriptions(),
                (filter, all) => {
                    let text = filter.unwrap_or_else(|| app.prefs().last_filter.clone());
                    app.store().filter(&text, !all && app.prefs().hide_inactive)
                }
            };
            for name in names {
                println!("{name}");
            }
        }

        Commands::Show { description } => {
            let Some(record) = app.select(&description) else {
                bail!("no saved settings for '{description}'");
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Delete { description, yes } => {
            if app.store().load(&description).is_none() {
                bail!("no saved settings for '{description}'");
            }
            let question =
                format!("Are you sure you want to delete the setting for '{description}'?");
            if yes || confirm(&question)? {
                app.delete(&description)?;
                info!(%description, "setting deleted");
            }
        }

        Commands::Backup { file } => {
            let count = app
                .backup_to(&file)
                .with_context(|| format!("backup to {} failed", file.display()))?;
            eprintln!("Backed up {count} setting(s) → {}", file.display());
        }

        Commands::Restore { file, yes } => {
            let plan = app
                .prepare_restore(&file)
                .with_context(|| format!("error reading backup file {}", file.display()))?;
            if yes || confirm(&plan.prompt())? {
                let count = app.apply_restore(plan)?;
                eprintln!("Successfully restored {count} settings!");
            }
        }

        Commands::Merge { file } => {
            let mut prompt = prompt_decision;
            let outcome = app
                .merge_from(&file, &mut prompt)
                .with_context(|| format!("merge from {} failed", file.display()))?;
            match outcome {
                MergeOutcome::Completed { added } => {
                    eprintln!("Successfully merged {added} new/changed settings!")
                }
                MergeOutcome::Aborted => eprintln!("Merge operation was aborted by the user."),
            }
        }

        Commands::Prefs => {
            println!("{}", serde_json::to_string_pretty(app.prefs())?);
        }
    }

    Ok(())
}

/// Accept short names as well as the exact labels
fn normalize_algorithm(input: &str) -> String {
    let wanted = input.replace('-', "").to_ascii_uppercase();
    Algorithm::ALL
        .into_iter()
        .find(|a| a.label().replace('-', "") == wanted)
        .map(|a| a.label().to_owned())
        .unwrap_or_else(|| input.to_owned())
}

fn normalize_restriction(input: &str) -> String {
    let short = match input.to_ascii_lowercase().as_str() {
        "all" => Some(CharRestriction::All),
        "alnum-underscore" | "underscore" => Some(CharRestriction::AlnumUnderscore),
        "alnum" | "alnum-omit" => Some(CharRestriction::AlnumOmit),
        "alpha" => Some(CharRestriction::AlphaOnly),
        "numeric" | "digits" => Some(CharRestriction::NumericOnly),
        _ => None,
    };
    short
        .map(|r| r.label().to_owned())
        .unwrap_or_else(|| input.to_owned())
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Side-by-side conflict view + [s/o/c] prompt. Unreadable input cancels.
fn prompt_decision(conflict: &Conflict) -> MergeDecision {
    let differing = conflict.differing_fields();

    eprintln!("\n=== Conflict: {} ===", conflict.key);
    eprintln!("{:<12} {:<48} {}", "", "Existing", "Imported");
    for field in differing {
        eprintln!(
            "{:<12} {:<48} {}",
            field.to_string(),
            field.value(&conflict.existing),
            field.value(&conflict.imported)
        );
    }

    loop {
        eprint!("Keep existing, overwrite, or cancel merge? [S/o/c] ");
        if std::io::stderr().flush().is_err() {
            return MergeDecision::Cancel;
        }
        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => return MergeDecision::Cancel,
            Ok(_) => {}
        }
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "skip" | "k" | "keep" => return MergeDecision::Skip,
            "o" | "overwrite" => return MergeDecision::Overwrite,
            "c" | "cancel" => return MergeDecision::Cancel,
            _ => eprintln!("  → please answer s, o or c"),
        }
    }
}
