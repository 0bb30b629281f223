/// The kind of invalidation a layout change causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DirtyType {
    /// Only the position is stale.
    Layout = 1,
    /// The size is stale, which also invalidates the position.
    Resize = 1 << 1,
    /// The anchor changed and the resolve/apply pair was swapped.
    Generated = 1 << 2,
}

/// A set of [`DirtyType`] flags raised on a layout since it was last applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dirty(u8);

impl Dirty {
    pub const CLEAN: Dirty = Dirty(0);

    #[inline]
    pub fn raise(&mut self, kind: DirtyType) {
        self.0 |= kind as u8;
    }

    #[inline]
    pub fn contains(&self, kind: DirtyType) -> bool {
        self.0 & kind as u8 != 0
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raised flags and resets the set.
    #[inline]
    pub fn take(&mut self) -> Dirty {
        std::mem::take(self)
    }
}

impl From<DirtyType> for Dirty {
    fn from(kind: DirtyType) -> Self {
        Dirty(kind as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_and_take() {
        let mut dirty = Dirty::CLEAN;
        assert!(dirty.is_clean());
        dirty.raise(DirtyType::Layout);
        dirty.raise(DirtyType::Generated);
        assert!(dirty.contains(DirtyType::Layout));
        assert!(!dirty.contains(DirtyType::Resize));
        assert!(dirty.contains(DirtyType::Generated));

        let taken = dirty.take();
        assert!(dirty.is_clean());
        assert!(taken.contains(DirtyType::Generated));
    }
}
