//! `passport`: developer CLI for Career Passport credential boxes.
//!
//! Boxes live in a local directory (one file per asset), so the same records
//! a deployed application would hold can be created, inspected and edited
//! offline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::WrapErr;
use passport_core::defaults::{BOX_STORE_DIR_NAME, MAX_BOX_SIZE};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "passport", version, about = "Manage Career Passport credential boxes")]
struct Cli {
    /// Directory holding the box files.
    #[arg(long, global = true, env = "PASSPORT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Largest record a box may hold, in bytes.
    #[arg(long, global = true, env = "PASSPORT_MAX_BOX_SIZE", default_value_t = MAX_BOX_SIZE)]
    max_box_size: usize,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Append a credential to an asset's box.
    Add {
        /// Passport asset id.
        asset: u64,
        /// Credential payload, usually JSON.
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        entry: Option<String>,
        /// Read the payload from a file instead.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check that an asset has a credential box.
    View {
        /// Passport asset id.
        asset: u64,
    },
    /// Print the credentials of an asset.
    List {
        /// Passport asset id.
        asset: u64,
    },
    /// Replace the credential at an index.
    Modify {
        /// Passport asset id.
        asset: u64,
        /// Zero-based position of the credential.
        index: u64,
        /// New payload.
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        entry: Option<String>,
        /// Read the payload from a file instead.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove the credential at an index; later credentials shift down.
    Delete {
        /// Passport asset id.
        asset: u64,
        /// Zero-based position of the credential.
        index: u64,
    },
    /// Send a raw application call and print approve or reject.
    ///
    /// Arguments are passed as UTF-8 bytes, except `u64:<n>` (8-byte
    /// big-endian integer) and `hex:<digits>` (raw bytes).
    Call {
        /// Operation name, e.g. `addCredential`.
        operation: String,
        /// Passport asset id.
        asset: u64,
        /// Positional arguments after the operation name.
        args: Vec<String>,
    },
    /// Print the hex box key of an asset.
    Key {
        /// Passport asset id.
        asset: u64,
    },
    /// Compute the VerifyID hash of a passport holder.
    Vid {
        /// Full legal name.
        #[arg(long)]
        name: String,
        /// Date of birth as entered on the form.
        #[arg(long)]
        dob: String,
        /// Passport number.
        #[arg(long)]
        passport: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_data_dir() -> eyre::Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("passport").join(BOX_STORE_DIR_NAME))
        .ok_or_else(|| eyre::eyre!("no platform data directory; pass --data-dir"))
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "opening box store");

    let output = commands::run(&cli, &data_dir).wrap_err("command failed")?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
