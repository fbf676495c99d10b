//! Versioned on-disk snapshot of a [`LanguageIndex`].
//!
//! Layout: magic `LGIX`, format version (u32 LE), BLAKE3 digest of the
//! payload (32 bytes), then the bincode-encoded payload. The payload is a
//! plain table of (trigram, language, weight) triples sorted by trigram and
//! tag, so two snapshots of the same model set are byte-identical.

use crate::error::{LingramError, Result};
use crate::index::LanguageIndex;
use crate::model::ModelSource;
use bincode::{Decode, Encode};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const SNAPSHOT_MAGIC: &[u8; 4] = b"LGIX";
pub const SNAPSHOT_VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 32;

#[derive(Debug, Encode, Decode)]
struct SnapshotPayload {
    languages: Vec<String>,
    entries: Vec<(String, String, f64)>,
}

/// Encode `index` into snapshot bytes.
pub fn encode_snapshot(index: &LanguageIndex) -> Result<Vec<u8>> {
    let payload = SnapshotPayload {
        languages: index.languages().to_vec(),
        entries: index.triples(),
    };
    let cfg = bincode::config::standard();
    let body = bincode::encode_to_vec(&payload, cfg)
        .map_err(|e| LingramError::Serialization(e.to_string()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(SNAPSHOT_MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    out.extend_from_slice(blake3::hash(&body).as_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode and verify snapshot bytes.
pub fn decode_snapshot(data: &[u8]) -> Result<LanguageIndex> {
    if data.len() < HEADER_LEN {
        return Err(LingramError::Snapshot(format!(
            "truncated header ({} bytes)",
            data.len()
        )));
    }
    if &data[..4] != SNAPSHOT_MAGIC {
        return Err(LingramError::Snapshot("bad magic".into()));
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&data[4..8]);
    let version = u32::from_le_bytes(version);
    if version != SNAPSHOT_VERSION {
        return Err(LingramError::Snapshot(format!(
            "unsupported version {} (expected {})",
            version, SNAPSHOT_VERSION
        )));
    }
    let body = &data[HEADER_LEN..];
    if blake3::hash(body).as_bytes() != &data[8..HEADER_LEN] {
        return Err(LingramError::Snapshot("checksum mismatch".into()));
    }

    let cfg = bincode::config::standard();
    let (payload, read): (SnapshotPayload, usize) = bincode::decode_from_slice(body, cfg)
        .map_err(|e| LingramError::Serialization(e.to_string()))?;
    if read != body.len() {
        return Err(LingramError::Snapshot(format!(
            "{} trailing bytes after payload",
            body.len() - read
        )));
    }
    LanguageIndex::from_triples(payload.languages, payload.entries)
}

impl LanguageIndex {
    /// Write a snapshot atomically: temp file in the target directory, then
    /// rename.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let bytes = encode_snapshot(self)?;
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        temp.persist(path).map_err(|e| e.error)?;
        info!(path = %path.display(), bytes = bytes.len(), "index snapshot written");
        Ok(())
    }

    /// Read and verify a snapshot file.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Err(LingramError::Snapshot("empty file".into()));
        }
        // Safety: read-only map of a regular file that we do not modify.
        let mmap = unsafe { Mmap::map(&file)? };
        let index = decode_snapshot(&mmap)?;
        debug!(
            path = %path.display(),
            languages = index.languages().len(),
            "index snapshot loaded"
        );
        Ok(index)
    }

    /// Use the snapshot at `cache_path` when it is valid, otherwise build
    /// from `source` and write a fresh snapshot. Snapshot problems are
    /// logged and never fatal; model problems are.
    pub fn load_or_build(source: &dyn ModelSource, cache_path: Option<&Path>) -> Result<Self> {
        let Some(cache_path) = cache_path else {
            return Self::from_source(source);
        };

        if cache_path.exists() {
            match Self::load_snapshot(cache_path) {
                Ok(index) => return Ok(index),
                Err(e) => warn!(
                    path = %cache_path.display(),
                    error = %e,
                    "discarding index snapshot, rebuilding"
                ),
            }
        }

        let index = Self::from_source(source)?;
        if let Err(e) = index.save_snapshot(cache_path) {
            warn!(path = %cache_path.display(), error = %e, "could not write index snapshot");
        }
        Ok(index)
    }
}
