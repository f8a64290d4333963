//! Photo attachments per trip phase.
//!
//! The album never keeps photo bytes in memory. Each attachment spools its
//! bytes to a file in a session-scoped spool directory and retains only a
//! [`SpoolHandle`] plus metadata, so the album's own footprint stays
//! O(reference) per attachment. The handle removes its file when dropped,
//! which ties release to detach or session teardown, whichever comes first.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use tracing::{debug, trace};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::trip::{PhaseId, TripPlan};

/// Owning reference to one spooled photo file.
///
/// Dropping the handle removes the file. Removal failures are ignored
/// (the spool directory is deleted at session teardown regardless).
#[derive(Debug)]
pub struct SpoolHandle {
    path: PathBuf,
}

impl SpoolHandle {
    /// Path of the spool file this handle owns.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SpoolHandle {
    fn drop(&mut self) {
        trace!("Releasing spool file {}", self.path.display());
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Metadata for one attached photo.
#[derive(Debug)]
pub struct PhotoAttachment {
    /// Display name, usually the source file name.
    pub name: String,
    /// When the photo was attached.
    pub taken: DateTime<Utc>,
    /// Size of the spooled bytes.
    pub byte_len: u64,
    /// BLAKE3 hash of the content, hex encoded.
    pub content_hash: String,
    /// Owning handle to the spooled bytes.
    pub handle: SpoolHandle,
}

/// Per-phase photo attachments for one session.
#[derive(Debug)]
pub struct PhotoAlbum {
    shots: BTreeMap<PhaseId, Vec<PhotoAttachment>>,
    spool: TempDir,
    /// Monotonic counter so identical content still gets distinct files.
    seq: u64,
    max_attachments: usize,
    max_attachment_bytes: u64,
}

impl PhotoAlbum {
    /// Create an empty album with a fresh spool directory.
    ///
    /// The spool directory is created under `config.spool_dir` when set,
    /// otherwise under the system temporary directory, and is removed when
    /// the album is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the spool directory cannot be created.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let builder_result = match &config.spool_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                    path: dir.clone(),
                    source,
                })?;
                tempfile::Builder::new().prefix("tripdeck-").tempdir_in(dir)
            }
            None => tempfile::Builder::new().prefix("tripdeck-").tempdir(),
        };
        let spool = builder_result
            .map_err(|err| Error::spool(format!("failed to create spool directory: {err}")))?;

        debug!("Spool directory at {}", spool.path().display());
        Ok(Self {
            shots: BTreeMap::new(),
            spool,
            seq: 0,
            max_attachments: config.max_attachments,
            max_attachment_bytes: config.max_attachment_bytes,
        })
    }

    /// Attach a photo to a phase, spooling its bytes to disk.
    ///
    /// Returns the index of the new attachment within the phase's album.
    /// Identical content attached twice is allowed; each attachment owns
    /// its own spool file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPhase`] if the plan has no such phase (this
    /// is also the path taken when a file read finishes for a phase that is
    /// no longer in the plan), [`Error::AttachmentLimit`] when the session
    /// cap is reached, [`Error::AttachmentTooLarge`] when the bytes exceed
    /// the per-attachment cap, and [`Error::Spool`] if the bytes cannot be
    /// written. The album is untouched on every error path.
    pub fn attach(
        &mut self,
        plan: &TripPlan,
        phase_id: PhaseId,
        bytes: &[u8],
        name: &str,
    ) -> Result<usize> {
        if !plan.has_phase(phase_id) {
            return Err(Error::unknown_phase(phase_id));
        }
        if self.attachment_count() >= self.max_attachments {
            return Err(Error::AttachmentLimit {
                limit: self.max_attachments,
            });
        }
        let byte_len = bytes.len() as u64;
        if byte_len > self.max_attachment_bytes {
            return Err(Error::AttachmentTooLarge {
                bytes: byte_len,
                limit: self.max_attachment_bytes,
            });
        }

        let content_hash = blake3::hash(bytes).to_hex().to_string();
        let file_name = format!("{:06}-{}.bin", self.seq, &content_hash[..16]);
        let path = self.spool.path().join(file_name);
        std::fs::write(&path, bytes).map_err(|err| {
            Error::spool(format!("failed to write {}: {err}", path.display()))
        })?;
        self.seq += 1;

        let attachment = PhotoAttachment {
            name: name.to_string(),
            taken: Utc::now(),
            byte_len,
            content_hash,
            handle: SpoolHandle { path },
        };

        let album = self.shots.entry(phase_id).or_default();
        album.push(attachment);
        debug!(
            "Attached '{}' ({} bytes) to phase {}",
            name, byte_len, phase_id
        );
        Ok(album.len() - 1)
    }

    /// Detach and release the attachment at `index` within a phase's album.
    ///
    /// The spool file is removed when the attachment's handle drops, i.e.
    /// before this call returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentOutOfRange`] if the phase has no
    /// attachment at that index.
    pub fn detach(&mut self, phase_id: PhaseId, index: usize) -> Result<()> {
        let album = self
            .shots
            .get_mut(&phase_id)
            .filter(|album| index < album.len())
            .ok_or(Error::AttachmentOutOfRange {
                phase: phase_id,
                index,
            })?;

        let attachment = album.remove(index);
        debug!("Detached '{}' from phase {}", attachment.name, phase_id);
        Ok(())
    }

    /// Attachments for a phase, in attach order. Empty for a phase with no
    /// attachments (including phase ids the plan does not contain).
    #[must_use]
    pub fn photos(&self, phase_id: PhaseId) -> &[PhotoAttachment] {
        self.shots.get(&phase_id).map_or(&[], Vec::as_slice)
    }

    /// Total number of attachments across all phases.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.shots.values().map(Vec::len).sum()
    }

    /// Total spooled bytes across all attachments.
    #[must_use]
    pub fn spooled_bytes(&self) -> u64 {
        self.shots
            .values()
            .flatten()
            .map(|attachment| attachment.byte_len)
            .sum()
    }

    /// Path of the session spool directory.
    #[must_use]
    pub fn spool_path(&self) -> &Path {
        self.spool.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::Phase;

    fn one_phase_plan() -> TripPlan {
        TripPlan {
            name: "Test".to_string(),
            departure: None,
            phases: vec![Phase {
                id: 1,
                name: "Only".to_string(),
                miles: 10.0,
                hours: 1.0,
            }],
            packing: vec![],
            budget: std::collections::BTreeMap::new(),
        }
    }

    fn small_config() -> SessionConfig {
        SessionConfig {
            max_attachments: 3,
            max_attachment_bytes: 1024,
            spool_dir: None,
        }
    }

    #[test]
    fn test_attach_and_list() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        let index = album.attach(&plan, 1, b"jpeg bytes", "sunset.jpg").unwrap();
        assert_eq!(index, 0);

        let photos = album.photos(1);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].name, "sunset.jpg");
        assert_eq!(photos[0].byte_len, 10);
        assert!(!photos[0].content_hash.is_empty());
    }

    #[test]
    fn test_spool_file_exists_and_holds_reference_not_bytes() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        album.attach(&plan, 1, b"payload", "p.jpg").unwrap();
        let path = album.photos(1)[0].handle.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_attach_then_detach_restores_length_and_releases_file() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        let before = album.photos(1).len();
        album.attach(&plan, 1, b"bytes", "p.jpg").unwrap();
        let path = album.photos(1)[0].handle.path().to_path_buf();

        album.detach(1, 0).unwrap();
        assert_eq!(album.photos(1).len(), before);
        assert!(!path.exists());
    }

    #[test]
    fn test_attach_unknown_phase_is_rejected() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        let err = album.attach(&plan, 99, b"bytes", "p.jpg").unwrap_err();
        assert!(err.is_invalid_reference());
        assert_eq!(album.attachment_count(), 0);
    }

    #[test]
    fn test_detach_out_of_range_is_rejected() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        let err = album.detach(1, 0).unwrap_err();
        assert!(err.is_invalid_reference());

        album.attach(&plan, 1, b"bytes", "p.jpg").unwrap();
        let err = album.detach(1, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::AttachmentOutOfRange { phase: 1, index: 5 }
        ));
        assert_eq!(album.photos(1).len(), 1);
    }

    #[test]
    fn test_attachment_limit() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        for i in 0..3 {
            album
                .attach(&plan, 1, b"x", &format!("p{i}.jpg"))
                .unwrap();
        }

        let err = album.attach(&plan, 1, b"x", "over.jpg").unwrap_err();
        assert!(err.is_resource_exhaustion());
        assert_eq!(album.attachment_count(), 3);

        // Detaching frees a slot
        album.detach(1, 0).unwrap();
        assert!(album.attach(&plan, 1, b"x", "again.jpg").is_ok());
    }

    #[test]
    fn test_attachment_too_large() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        let big = vec![0u8; 2048];
        let err = album.attach(&plan, 1, &big, "huge.jpg").unwrap_err();
        assert!(err.is_resource_exhaustion());
        assert_eq!(album.attachment_count(), 0);
    }

    #[test]
    fn test_identical_content_gets_distinct_files() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        album.attach(&plan, 1, b"same", "a.jpg").unwrap();
        album.attach(&plan, 1, b"same", "b.jpg").unwrap();

        let photos = album.photos(1);
        assert_eq!(photos[0].content_hash, photos[1].content_hash);
        assert_ne!(photos[0].handle.path(), photos[1].handle.path());

        // Releasing one copy leaves the other readable
        let surviving = photos[1].handle.path().to_path_buf();
        album.detach(1, 0).unwrap();
        assert!(surviving.exists());
    }

    #[test]
    fn test_photos_empty_for_unknown_phase() {
        let album = PhotoAlbum::new(&small_config()).unwrap();
        assert!(album.photos(42).is_empty());
    }

    #[test]
    fn test_spooled_bytes() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();

        album.attach(&plan, 1, b"12345", "a.jpg").unwrap();
        album.attach(&plan, 1, b"123", "b.jpg").unwrap();
        assert_eq!(album.spooled_bytes(), 8);
    }

    #[test]
    fn test_drop_removes_spool_directory() {
        let plan = one_phase_plan();
        let mut album = PhotoAlbum::new(&small_config()).unwrap();
        album.attach(&plan, 1, b"bytes", "p.jpg").unwrap();

        let spool = album.spool_path().to_path_buf();
        assert!(spool.exists());

        drop(album);
        assert!(!spool.exists());
    }

    #[test]
    fn test_spool_dir_override() {
        let base = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            max_attachments: 3,
            max_attachment_bytes: 1024,
            spool_dir: Some(base.path().to_path_buf()),
        };

        let album = PhotoAlbum::new(&config).unwrap();
        assert!(album.spool_path().starts_with(base.path()));
    }
}
