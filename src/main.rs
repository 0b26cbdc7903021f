use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use credforge::{Credential, HashingParams, derive, verify};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem", env = "CREDFORGE_ARGON_MEM")]
    mem_cost_kib: Option<u32>,

    /// Argon2 time cost / iterations (default: 3)
    #[arg(long = "argon-time", env = "CREDFORGE_ARGON_TIME")]
    time_cost: Option<u32>,

    /// Argon2 parallelism (default: 1)
    #[arg(long = "argon-parallelism", env = "CREDFORGE_ARGON_PARALLELISM")]
    parallelism: Option<u32>,

    /// Salt length in bytes (default: 16)
    #[arg(long = "salt-len", env = "CREDFORGE_SALT_LEN")]
    salt_len: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-len", env = "CREDFORGE_KEY_LEN")]
    key_len: Option<u32>,
}

impl Argon2Args {
    fn to_hashing_params(&self) -> Result<HashingParams> {
        let default = HashingParams::default();

        Ok(HashingParams::new(
            self.key_len.unwrap_or(default.key_len()),
            self.salt_len.unwrap_or(default.salt_len()),
            self.time_cost.unwrap_or(default.time_cost()),
            self.mem_cost_kib.unwrap_or(default.mem_cost_kib()),
            self.parallelism.unwrap_or(default.parallelism()),
        )?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "credforge")]
#[command(
    version,
    about = "Derive and verify Argon2id password credential records."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derives a credential record for a password
    Hash {
        #[command(flatten)]
        argon2: Argon2Args,

        /// Write the record to PATH instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Verifies a password against a stored credential record
    #[command(arg_required_else_help = true)]
    Verify {
        /// Path to the credential record JSON
        #[arg(long, value_name = "PATH")]
        record: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    match args.command {
        Commands::Hash { argon2, out } => {
            let params = argon2.to_hashing_params()?;
            let password = auth::read_new_password()?;

            let record = derive(&password, params)?;
            let json = serde_json::to_string_pretty(&record)?;

            match out {
                Some(path) => {
                    fs::write(&path, json + "\n")
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("credential record written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Verify { record } => {
            let data = fs::read_to_string(&record)
                .with_context(|| format!("failed to read {}", record.display()))?;
            let parsed: Credential =
                serde_json::from_str(&data).context("failed to parse credential record")?;

            let password = auth::read_password()?;

            if verify(&password, &parsed)? {
                println!("password matches");
            } else {
                bail!("password does not match");
            }
        }
    }

    Ok(())
}
