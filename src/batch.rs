//! Roster batch generation
//!
//! Every student gets an independent split of the secret. ShareB images are
//! packed into a ZIP archive as `{student_id}_shareB.png`. A failing entry is
//! reported and skipped; the rest of the roster still gets its shares.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use rayon::prelude::*;
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::error::{Result, VssError};
use crate::models::{BitGrid, IntegrityToken, SharePair, ShareRole};
use crate::shares::{RandomSource, encode_share, generate_shares};

/// Ordered list of opaque student identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    ids: Vec<String>,
}

impl Roster {
    /// Wrap ids as given
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// One id per line
    ///
    /// Only the first comma-separated field counts. Blank lines, `#`
    /// comments and a leading `student_id` header are skipped.
    pub fn parse(text: &str) -> Self {
        let mut ids = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let id = line.split(',').next().unwrap_or("").trim();
            if ids.is_empty() && id.eq_ignore_ascii_case("student_id") {
                continue;
            }
            ids.push(id.to_string());
        }
        Self { ids }
    }

    /// Identifiers in roster order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the roster has no entries
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// File name for one of a student's shares, e.g. `s1_shareB.png`
pub fn share_file_name(student_id: &str, role: ShareRole) -> String {
    format!("{}_{}.png", student_id, role.file_tag())
}

/// Archive entry name for a student's ShareB
pub fn share_b_entry_name(student_id: &str) -> String {
    share_file_name(student_id, ShareRole::B)
}

/// One student's successfully issued shares
#[derive(Debug, Clone)]
pub struct IssuedShare {
    /// Roster position
    pub index: usize,
    /// Student identifier
    pub student_id: String,
    /// Name of the ShareB entry in the archive
    pub entry_name: String,
    /// Both halves of this student's split
    pub pair: SharePair,
    /// Digest of the ShareB PNG bytes as distributed
    pub integrity_token: IntegrityToken,
}

/// A roster entry that was skipped
#[derive(Debug)]
pub struct BatchFailure {
    /// Roster position
    pub index: usize,
    /// Student identifier as given
    pub student_id: String,
    /// Why the entry failed
    pub error: VssError,
}

/// Outcome of a batch run
#[derive(Debug)]
pub struct RosterBatch {
    /// ZIP archive holding one ShareB PNG per issued student
    pub archive: Vec<u8>,
    /// Issued entries, in roster order
    pub issued: Vec<IssuedShare>,
    /// Skipped entries, in roster order
    pub failures: Vec<BatchFailure>,
}

fn validate_id(student_id: &str) -> Result<()> {
    let invalid = student_id.trim().is_empty()
        || student_id
            .chars()
            .any(|c| matches!(c, '/' | '\\') || c.is_control())
        || student_id == "."
        || student_id == "..";
    if invalid {
        return Err(VssError::InvalidStudentId(student_id.to_string()));
    }
    Ok(())
}

fn issue_one(
    secret: &BitGrid,
    index: usize,
    student_id: &str,
    source: &RandomSource,
    scale: u32,
) -> Result<(IssuedShare, Vec<u8>)> {
    validate_id(student_id)?;
    let mut rng = source.rng(index as u64)?;
    let pair = generate_shares(secret, &mut rng);
    let png = encode_share(&pair.b, scale)?;
    let issued = IssuedShare {
        index,
        student_id: student_id.to_string(),
        entry_name: share_b_entry_name(student_id),
        pair,
        integrity_token: IntegrityToken::of_bytes(&png),
    };
    Ok((issued, png))
}

/// Split `secret` once per roster entry and pack every ShareB
///
/// Entries are generated in parallel. Per-entry failures (bad or duplicate
/// id, random source, encoding) land in [`RosterBatch::failures`]. Only
/// archive I/O aborts the batch.
pub fn generate_batch(
    secret: &BitGrid,
    roster: &Roster,
    source: &RandomSource,
    scale: u32,
) -> Result<RosterBatch> {
    let mut seen = HashSet::new();
    let duplicate: Vec<bool> = roster
        .ids()
        .iter()
        .map(|id| !seen.insert(id.as_str()))
        .collect();

    let results: Vec<Result<(IssuedShare, Vec<u8>)>> = roster
        .ids()
        .par_iter()
        .enumerate()
        .map(|(index, id)| {
            if duplicate[index] {
                return Err(VssError::InvalidStudentId(id.clone()));
            }
            issue_one(secret, index, id, source, scale)
        })
        .collect();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    let mut issued = Vec::new();
    let mut failures = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok((entry, png)) => {
                zip.start_file(entry.entry_name.as_str(), options)?;
                zip.write_all(&png)?;
                issued.push(entry);
            }
            Err(error) => {
                let student_id = roster.ids()[index].clone();
                warn!(index, %student_id, %error, "skipping roster entry");
                failures.push(BatchFailure {
                    index,
                    student_id,
                    error,
                });
            }
        }
    }

    let archive = zip.finish()?.into_inner();
    info!(
        issued = issued.len(),
        failed = failures.len(),
        bytes = archive.len(),
        "roster batch complete"
    );

    Ok(RosterBatch {
        archive,
        issued,
        failures,
    })
}
