use crate::{Corpus, Passage};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

/// Bumped whenever the on-disk layout of [`IndexFile`] changes.
pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexFile {
    pub version: u32,
    pub created_at: String,
    pub passages: Vec<Passage>,
    pub tokens: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index_file(&self) -> PathBuf { self.root.join("search_index.bin") }
    fn temp_file(&self) -> PathBuf { self.root.join("search_index.bin.tmp") }
}

/// Serialize the corpus and replace the index file in one rename.
pub fn write_index(paths: &IndexPaths, corpus: &Corpus) -> Result<()> {
    create_dir_all(&paths.root).with_context(|| format!("creating {}", paths.root.display()))?;
    let file = IndexFile {
        version: INDEX_VERSION,
        created_at: time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        passages: corpus.passages().to_vec(),
        tokens: corpus.tokens().to_vec(),
    };
    let bytes = bincode::serialize(&file)?;
    let tmp = paths.temp_file();
    fs::write(&tmp, &bytes).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, paths.index_file()).context("replacing index file")?;
    Ok(())
}

/// Read the whole index file. `Ok(None)` when no index has been written yet.
pub fn read_index(paths: &IndexPaths) -> Result<Option<IndexFile>> {
    let path = paths.index_file();
    if !path.exists() {
        return Ok(None);
    }
    let buf = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let file: IndexFile = bincode::deserialize(&buf).context("decoding index")?;
    if file.version != INDEX_VERSION {
        bail!("index version {} does not match {}", file.version, INDEX_VERSION);
    }
    Ok(Some(file))
}

/// Best-effort cache over [`read_index`] / [`write_index`]; failures become log lines.
#[derive(Debug, Clone)]
pub struct IndexStore {
    paths: IndexPaths,
}

impl IndexStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { paths: IndexPaths::new(root) }
    }

    pub fn paths(&self) -> &IndexPaths { &self.paths }

    pub fn load(&self) -> Option<Corpus> {
        match read_index(&self.paths).and_then(|f| f.map(|f| Corpus::from_parts(f.passages, f.tokens)).transpose()) {
            Ok(Some(corpus)) => {
                tracing::info!(passages = corpus.len(), path = %self.paths.index_file().display(), "loaded index");
                Some(corpus)
            }
            Ok(None) => {
                tracing::debug!(path = %self.paths.index_file().display(), "no index on disk");
                None
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to load index");
                None
            }
        }
    }

    pub fn save(&self, corpus: &Corpus) -> bool {
        match write_index(&self.paths, corpus) {
            Ok(()) => {
                tracing::info!(passages = corpus.len(), path = %self.paths.index_file().display(), "saved index");
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to save index");
                false
            }
        }
    }
}
