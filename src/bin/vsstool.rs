use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use qr_vss::batch::share_file_name;
use qr_vss::shares::encode_grid;
use qr_vss::{
    NormalizeOptions, RandomSource, Roster, ShareRole, VssConfig, attend, encode_share,
    generate_batch, issue_session_share, normalize, render_secret, split_secret_image,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vsstool", version, about = "QR visual secret sharing tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render attendance text (usually a URL) as a secret QR image
    Secret {
        #[arg(long)]
        text: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Split a secret QR image into ShareA and ShareB
    Split {
        #[arg(long)]
        secret: PathBuf,
        #[arg(long)]
        out_a: PathBuf,
        #[arg(long)]
        out_b: PathBuf,
        /// Deterministic seed (reproducible runs only)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Issue one ShareB per roster entry, packed into a ZIP archive
    ///
    /// Each student's matching ShareA is written to `--share-a-dir` when
    /// given. Without it, use `session` to issue ShareA for each ShareB.
    Batch {
        #[arg(long)]
        secret: PathBuf,
        #[arg(long)]
        roster: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Directory for `{student_id}_shareA.png` files
        #[arg(long)]
        share_a_dir: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Issue a new session's ShareA for an existing ShareB
    Session {
        #[arg(long)]
        secret: PathBuf,
        #[arg(long)]
        share_b: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Reconstruct from two shares and print the attendance record
    Attend {
        #[arg(long)]
        share_a: PathBuf,
        #[arg(long)]
        share_b: PathBuf,
        #[arg(long)]
        student_id: Option<String>,
        /// Also write the reconstructed QR image here
        #[arg(long)]
        decoded_out: Option<PathBuf>,
    },
}

fn source_for(seed: Option<u64>) -> RandomSource {
    seed.map(RandomSource::Seeded).unwrap_or(RandomSource::Os)
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VssConfig::from_env();

    match cli.command {
        Command::Secret { text, out } => secret_cmd(&text, &out, &config),
        Command::Split {
            secret,
            out_a,
            out_b,
            seed,
        } => split_cmd(&secret, &out_a, &out_b, seed, &config),
        Command::Batch {
            secret,
            roster,
            out,
            share_a_dir,
            seed,
        } => batch_cmd(&secret, &roster, &out, share_a_dir.as_deref(), seed, &config),
        Command::Session {
            secret,
            share_b,
            out,
        } => session_cmd(&secret, &share_b, &out, &config),
        Command::Attend {
            share_a,
            share_b,
            student_id,
            decoded_out,
        } => attend_cmd(
            &share_a,
            &share_b,
            student_id.as_deref(),
            decoded_out.as_deref(),
            &config,
        ),
    }
}

fn secret_cmd(text: &str, out: &Path, config: &VssConfig) -> anyhow::Result<()> {
    let grid = render_secret(text, config.module_px as usize, 4)?;
    write(out, &encode_grid(&grid, 1)?)?;
    println!("Secret: {} ({}x{})", out.display(), grid.width(), grid.height());
    Ok(())
}

fn split_cmd(
    secret: &Path,
    out_a: &Path,
    out_b: &Path,
    seed: Option<u64>,
    config: &VssConfig,
) -> anyhow::Result<()> {
    let split = split_secret_image(&read(secret)?, &source_for(seed), config)?;
    write(out_a, &split.share_a_png)?;
    write(out_b, &split.share_b_png)?;
    println!(
        "ShareA: {}  ShareB: {}  ({}x{} cells)",
        out_a.display(),
        out_b.display(),
        split.pair.a.grid.width(),
        split.pair.a.grid.height()
    );
    Ok(())
}

fn batch_cmd(
    secret: &Path,
    roster: &Path,
    out: &Path,
    share_a_dir: Option<&Path>,
    seed: Option<u64>,
    config: &VssConfig,
) -> anyhow::Result<()> {
    let secret = normalize(&read(secret)?, &NormalizeOptions::native(config.threshold))?;
    let roster_text = fs::read_to_string(roster)
        .with_context(|| format!("failed to read {}", roster.display()))?;
    let roster = Roster::parse(&roster_text);
    if roster.is_empty() {
        bail!("roster has no entries");
    }

    let batch = generate_batch(&secret, &roster, &source_for(seed), config.share_scale)?;
    write(out, &batch.archive)?;

    println!("Archive: {} ({} shares)", out.display(), batch.issued.len());
    for entry in &batch.issued {
        println!("  {} sha256={}", entry.entry_name, entry.integrity_token);
    }
    for failure in &batch.failures {
        println!(
            "  SKIPPED [{}] {:?}: {}",
            failure.index, failure.student_id, failure.error
        );
    }

    match share_a_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for entry in &batch.issued {
                let path = dir.join(share_file_name(&entry.student_id, ShareRole::A));
                write(&path, &encode_share(&entry.pair.a, config.share_scale)?)?;
            }
            println!("ShareA files: {}", dir.display());
        }
        None => println!("ShareA not saved; run `session` against each ShareB"),
    }
    Ok(())
}

fn session_cmd(
    secret: &Path,
    share_b: &Path,
    out: &Path,
    config: &VssConfig,
) -> anyhow::Result<()> {
    let share_a = issue_session_share(&read(secret)?, &read(share_b)?, config)?;
    write(out, &share_a)?;
    println!("Session ShareA: {}", out.display());
    Ok(())
}

fn attend_cmd(
    share_a: &Path,
    share_b: &Path,
    student_id: Option<&str>,
    decoded_out: Option<&Path>,
    config: &VssConfig,
) -> anyhow::Result<()> {
    let share_b_bytes = read(share_b)?;
    let attempt = attend(&read(share_a)?, &share_b_bytes, config)?;

    if let Some(path) = decoded_out {
        write(path, &encode_grid(&attempt.reconstruction.grid, 1)?)?;
        println!("Decoded image: {}", path.display());
    }

    let Some(payload) = attempt.payload else {
        if let Err(miss) = &attempt.reconstruction.outcome {
            println!("QR not found: {}", miss);
        }
        println!("The reconstructed image may be too small, blurred, or from mismatched shares.");
        return Ok(());
    };

    println!("Payload: {}", payload.raw);
    println!("Class: {}", payload.class_id);
    println!("ShareB sha256: {}", payload.integrity_token);
    if let Some(student_id) = student_id {
        println!("{}", payload.record(student_id)?.to_json());
    }
    Ok(())
}
