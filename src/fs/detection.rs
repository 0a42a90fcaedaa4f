// src/fs/detection.rs
//! OpenDocument detection using a fixed-offset signature sniff.
//!
//! An ODF package is a ZIP archive whose first member is an uncompressed file
//! named `mimetype`. The 30-byte local file header is followed by the member
//! name and then its content, so a conformant package reads
//! `mimetypeapplication/vnd.oasis.opendocument.<subtype>` from byte 30 on.
//! Only that prefix is checked; the archive itself is never parsed.

use std::{
    fmt,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};

use infer::Infer;
use mime_guess::MimeGuess;
use thiserror::Error;
use tracing::debug;

/// Text found at [`SIGNATURE_OFFSET`] in every ODF package.
pub const ODF_SIGNATURE: &str = "mimetypeapplication/vnd.oasis.opendocument.";

/// Offset of the first member's name inside the archive.
pub const SIGNATURE_OFFSET: usize = 30;

/// Number of leading bytes read from each candidate.
pub const PROBE_LEN: usize = 96;

/// Files shorter than this are never reported as ODF packages.
pub const MIN_ODF_LEN: u64 = 100;

/// MIME type handed to the viewer for every document.
pub const VIEWER_MIME: &str = "application/vnd.oasis.opendocument.text";

const ODF_MIME_PREFIX: &str = "application/vnd.oasis.opendocument.";
const MIMETYPE_MEMBER: &str = "mimetype";

/// Member of the OpenDocument family a package belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdfKind {
    Text,
    Spreadsheet,
    Presentation,
    Graphics,
    Formula,
    Chart,
    Database,
    Other(String),
    Unknown,
}

impl OdfKind {
    /// Map the part of the MIME type after `application/vnd.oasis.opendocument.`.
    pub fn from_subtype(subtype: &str) -> Self {
        // Templates open in the same application as their documents.
        let base = subtype.strip_suffix("-template").unwrap_or(subtype);
        match base {
            "text" | "text-master" | "text-web" => OdfKind::Text,
            "spreadsheet" => OdfKind::Spreadsheet,
            "presentation" => OdfKind::Presentation,
            "graphics" | "image" => OdfKind::Graphics,
            "formula" => OdfKind::Formula,
            "chart" => OdfKind::Chart,
            "base" | "database" => OdfKind::Database,
            "" => OdfKind::Unknown,
            other => OdfKind::Other(other.to_string()),
        }
    }

    /// Map a full MIME type, or `None` when it is not an OpenDocument type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        mime.strip_prefix(ODF_MIME_PREFIX)
            .filter(|subtype| !subtype.is_empty())
            .map(Self::from_subtype)
    }
}

impl fmt::Display for OdfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OdfKind::Text => "Text",
            OdfKind::Spreadsheet => "Spreadsheet",
            OdfKind::Presentation => "Presentation",
            OdfKind::Graphics => "Graphics",
            OdfKind::Formula => "Formula",
            OdfKind::Chart => "Chart",
            OdfKind::Database => "Database",
            OdfKind::Other(subtype) => subtype.as_str(),
            OdfKind::Unknown => "ODF",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Leading bytes carry the ODF signature.
    Odf(OdfKind),
    /// Too short, short read, not a regular file, or the bytes differ.
    Other,
}

/// The file could not be inspected, so no verdict was reached.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot stat {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Check the leading bytes of `path` against the ODF signature.
pub fn probe(path: &Path) -> Result<Signature, ProbeError> {
    let metadata = fs::metadata(path).map_err(|source| ProbeError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() || metadata.len() < MIN_ODF_LEN {
        return Ok(Signature::Other);
    }

    let prefix = read_prefix(path)?;
    if !matches_signature(&prefix) {
        return Ok(Signature::Other);
    }
    Ok(Signature::Odf(document_kind(path, &prefix)))
}

/// `true` iff `path` looks like an ODF package. Probe errors count as "no".
pub fn is_odf_document(path: &Path) -> bool {
    OdfDetector.detect(path).is_some()
}

/// `true` iff `prefix` is a full probe buffer carrying the signature.
pub fn matches_signature(prefix: &[u8]) -> bool {
    if prefix.len() < PROBE_LEN {
        return false;
    }
    let end = SIGNATURE_OFFSET + ODF_SIGNATURE.len();
    prefix[SIGNATURE_OFFSET..end] == *ODF_SIGNATURE.as_bytes()
}

/// Read at most [`PROBE_LEN`] bytes. The handle is dropped before returning.
fn read_prefix(path: &Path) -> Result<Vec<u8>, ProbeError> {
    let file = File::open(path).map_err(|source| ProbeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut prefix = Vec::with_capacity(PROBE_LEN);
    file.take(PROBE_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(|source| ProbeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(prefix)
}

/// Work out which ODF member a signed package is.
fn document_kind(path: &Path, prefix: &[u8]) -> OdfKind {
    // 1. Magic-number sniffing
    if let Some(kind) = Infer::new()
        .get(prefix)
        .and_then(|t| OdfKind::from_mime(t.mime_type()))
    {
        return kind;
    }

    // 2. Content of the stored `mimetype` member
    if let Some(subtype) = stored_subtype(prefix) {
        return OdfKind::from_subtype(subtype);
    }

    // 3. Fallback to extension-based lookup
    MimeGuess::from_path(path)
        .iter()
        .find_map(|mime| OdfKind::from_mime(mime.essence_str()))
        .unwrap_or(OdfKind::Unknown)
}

/// Subtype stored in the `mimetype` member, sized by the local file header.
fn stored_subtype(prefix: &[u8]) -> Option<&str> {
    let size = u32::from_le_bytes(prefix.get(22..26)?.try_into().ok()?) as usize;
    let start = SIGNATURE_OFFSET + MIMETYPE_MEMBER.len();
    let content = prefix.get(start..start.checked_add(size)?)?;
    std::str::from_utf8(content)
        .ok()?
        .strip_prefix(ODF_MIME_PREFIX)
        .filter(|subtype| !subtype.is_empty())
}

/// Classifies non-directory entries for the navigator.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentDetector {
    /// Document type of `path`, or `None` when it is not an ODF package.
    fn detect(&self, path: &Path) -> Option<OdfKind>;
}

/// Detector backed by [`probe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OdfDetector;

impl DocumentDetector for OdfDetector {
    fn detect(&self, path: &Path) -> Option<OdfKind> {
        match probe(path) {
            Ok(Signature::Odf(kind)) => Some(kind),
            Ok(Signature::Other) => None,
            Err(error) => {
                debug!(%error, "treating unreadable file as non-ODF");
                None
            }
        }
    }
}

/// Bytes of a minimal ODF package whose `mimetype` member names `subtype`,
/// zero-padded to `len`.
#[cfg(test)]
pub(crate) fn odf_package_bytes(subtype: &str, len: usize) -> Vec<u8> {
    let content = format!("{ODF_MIME_PREFIX}{subtype}");
    let mut bytes = Vec::with_capacity(len);
    bytes.extend_from_slice(b"PK\x03\x04");
    bytes.extend_from_slice(&20u16.to_le_bytes()); // version needed
    bytes.extend_from_slice(&0u16.to_le_bytes()); // flags
    bytes.extend_from_slice(&0u16.to_le_bytes()); // stored
    bytes.extend_from_slice(&[0; 8]); // time, date, crc
    bytes.extend_from_slice(&(content.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(content.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(MIMETYPE_MEMBER.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // extra field
    bytes.extend_from_slice(MIMETYPE_MEMBER.as_bytes());
    bytes.extend_from_slice(content.as_bytes());
    bytes.resize(len.max(bytes.len()), 0);
    bytes.truncate(len);
    bytes
}
