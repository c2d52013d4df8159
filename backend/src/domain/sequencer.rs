//! Photo sequencing: display order and cyclic navigation for one instance's
//! photos.
//!
//! The sequencer is a pure in-memory component. Persistence of the featured
//! flag is the photo repository's concern; [`PhotoSequencer::set_featured`]
//! only mutates the working set, and callers apply it after the remote write
//! is acknowledged.

use std::fmt;

use uuid::Uuid;

use super::plant_photo::PlantPhoto;

/// Errors raised by sequencer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The photo id does not reference a photo in the working set.
    PhotoNotFound {
        /// The unknown identifier.
        photo_id: Uuid,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhotoNotFound { photo_id } => {
                write!(f, "photo {photo_id} is not in the working set")
            }
        }
    }
}

impl std::error::Error for SequenceError {}

/// Display order and cyclic navigation over one instance's photos.
///
/// Ordering: featured photos first, then most recent effective date
/// (`taken_at`, else `created_at`; undated photos last). Ties beyond those
/// keys keep their input order. The cursor starts at the front item and wraps
/// around in both directions; navigation on an empty set is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSequencer {
    photos: Vec<PlantPhoto>,
    cursor: usize,
}

impl PhotoSequencer {
    /// Sort the photos into display order and place the cursor at the front.
    #[must_use]
    pub fn new(mut photos: Vec<PlantPhoto>) -> Self {
        sort_photos(&mut photos);
        Self { photos, cursor: 0 }
    }

    /// Photos in display order.
    #[must_use]
    pub fn photos(&self) -> &[PlantPhoto] {
        self.photos.as_slice()
    }

    /// Consume the sequencer, returning the ordered photos.
    #[must_use]
    pub fn into_photos(self) -> Vec<PlantPhoto> {
        self.photos
    }

    /// Number of photos in the working set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Whether the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Current cursor position (always 0 for an empty set).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Photo under the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<&PlantPhoto> {
        self.photos.get(self.cursor)
    }

    /// Whether the working set contains the given photo.
    #[must_use]
    pub fn contains(&self, photo_id: Uuid) -> bool {
        self.photos.iter().any(|photo| photo.id() == photo_id)
    }

    /// Advance the cursor cyclically; no-op on an empty set.
    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.cursor = (self.cursor + 1) % self.photos.len();
        }
    }

    /// Retreat the cursor cyclically; no-op on an empty set.
    pub fn previous(&mut self) {
        if !self.photos.is_empty() {
            self.cursor = (self.cursor + self.photos.len() - 1) % self.photos.len();
        }
    }

    /// Feature exactly one photo of the working set.
    ///
    /// On success the named photo is the only featured one, the set is
    /// re-sorted, and the cursor resets to the front. An unknown id leaves
    /// the set and cursor untouched.
    pub fn set_featured(&mut self, photo_id: Uuid) -> Result<(), SequenceError> {
        if !self.contains(photo_id) {
            return Err(SequenceError::PhotoNotFound { photo_id });
        }
        for photo in &mut self.photos {
            photo.set_featured_flag(photo.id() == photo_id);
        }
        sort_photos(&mut self.photos);
        self.cursor = 0;
        Ok(())
    }
}

/// Stable sort: featured flag descending, then effective date descending.
fn sort_photos(photos: &mut [PlantPhoto]) {
    photos.sort_by(|a, b| {
        b.is_featured()
            .cmp(&a.is_featured())
            .then_with(|| b.effective_taken_at().cmp(&a.effective_taken_at()))
    });
}
