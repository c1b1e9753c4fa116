//! Export artifacts and where they go.
//!
//! # Design
//! An export fetches a PDF report or an HL7 message and hands it to an
//! `ArtifactSink`. Artifacts are never cached: each export issues a fresh
//! request and the sink takes ownership of the bytes.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const HL7_CONTENT_TYPE: &str = "text/plain";

/// A downloaded document ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn report(intervention_id: Uuid, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("intervention_{intervention_id}.pdf"),
            content_type: PDF_CONTENT_TYPE,
            bytes,
        }
    }

    /// The message bytes are written as received; HL7 v2 is often Latin-1.
    pub fn hl7(intervention_id: Uuid, message: Vec<u8>) -> Self {
        Self {
            file_name: format!("intervention_{intervention_id}.hl7"),
            content_type: HL7_CONTENT_TYPE,
            bytes: message,
        }
    }
}

/// Receives exported artifacts. Returns where the artifact ended up.
pub trait ArtifactSink {
    fn save(&self, artifact: Artifact) -> io::Result<PathBuf>;
}

/// Writes artifacts as files into one directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: Artifact) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)?;
        info!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
        Ok(path)
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RefCell<Vec<Artifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<Artifact> {
        self.saved.borrow().clone()
    }
}

impl ArtifactSink for MemorySink {
    fn save(&self, artifact: Artifact) -> io::Result<PathBuf> {
        let path = PathBuf::from(&artifact.file_name);
        self.saved.borrow_mut().push(artifact);
        Ok(path)
    }
}
