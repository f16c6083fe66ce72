//! Logical photo slots over a smaller set of unique images.

/// The photo collection as the core sees it: slot 0 is the cover, slots
/// `1..=slots` cycle over `unique` images. Textures live with the rendering
/// collaborator; the core only hands out image numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhotoLibrary {
    slots: usize,
    unique: usize,
}

impl PhotoLibrary {
    /// Library with one cover plus `slots` cycling slots over `unique`
    /// images (at least one).
    #[must_use]
    pub fn new(slots: usize, unique: usize) -> Self {
        Self {
            slots,
            unique: unique.max(1),
        }
    }

    /// Total slot count including the cover.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots + 1
    }

    /// Always false: the cover slot exists even with no body slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Image number shown in `slot`: 0 for the cover, `1..=unique` for body
    /// slots. Slots past the end wrap around.
    #[must_use]
    pub fn image_for(&self, slot: usize) -> usize {
        let slot = slot % self.len();
        if slot == 0 {
            0
        } else {
            (slot - 1) % self.unique + 1
        }
    }
}

impl Default for PhotoLibrary {
    fn default() -> Self {
        Self::new(44, 31)
    }
}
