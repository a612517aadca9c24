use core::ops::Range;

use crate::Rgb;

/// Contiguous run of framebuffer cells owned by one light
///
/// `reversed` flips logical indexing for strips mounted the other way round:
/// logical cell 0 is then the last physical cell of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub offset: usize,
    pub count: usize,
    pub reversed: bool,
}

impl CellRange {
    /// Create a forward range
    pub const fn new(offset: usize, count: usize) -> Self {
        Self {
            offset,
            count,
            reversed: false,
        }
    }

    /// Flip the logical direction of the range
    #[must_use]
    pub const fn with_reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Index one past the last cell of the range
    pub const fn end(self) -> usize {
        self.offset + self.count
    }

    /// Physical index range into the framebuffer
    pub const fn as_range(self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Check if the range fits into a framebuffer of `len` cells
    pub const fn fits(self, len: usize) -> bool {
        self.offset <= len && self.count <= len - self.offset
    }

    /// Check if two ranges share any cell
    pub const fn overlaps(self, other: Self) -> bool {
        self.count != 0
            && other.count != 0
            && self.offset < other.end()
            && other.offset < self.end()
    }

    /// Resolve the range against a framebuffer
    ///
    /// Returns an empty view if the range does not fit.
    pub fn view(self, frame: &mut [Rgb]) -> CellView<'_> {
        let cells = frame.get_mut(self.as_range()).unwrap_or_default();
        CellView {
            cells,
            reversed: self.reversed,
        }
    }
}

/// Mutable, direction-aware view into a light's cells
pub struct CellView<'a> {
    cells: &'a mut [Rgb],
    reversed: bool,
}

impl<'a> CellView<'a> {
    /// Wrap a slice of cells
    pub const fn new(cells: &'a mut [Rgb], reversed: bool) -> Self {
        Self { cells, reversed }
    }

    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    const fn physical(&self, index: usize) -> usize {
        if self.reversed {
            self.cells.len() - 1 - index
        } else {
            index
        }
    }

    /// Color of the logical cell `index`
    pub fn get(&self, index: usize) -> Option<Rgb> {
        if index >= self.len() {
            return None;
        }
        self.cells.get(self.physical(index)).copied()
    }

    /// Set the logical cell `index`, ignoring out of range indices
    pub fn set(&mut self, index: usize, color: Rgb) {
        if index >= self.len() {
            return;
        }
        let physical = self.physical(index);
        if let Some(cell) = self.cells.get_mut(physical) {
            *cell = color;
        }
    }

    /// Apply `f` to the logical cell `index`
    pub fn update(&mut self, index: usize, f: impl FnOnce(Rgb) -> Rgb) {
        if let Some(color) = self.get(index) {
            self.set(index, f(color));
        }
    }

    /// Set every cell to one color
    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Replace every cell with `f(cell)`
    pub fn map(&mut self, mut f: impl FnMut(Rgb) -> Rgb) {
        for cell in self.cells.iter_mut() {
            *cell = f(*cell);
        }
    }

    /// Check if every cell satisfies `f`
    pub fn all(&self, f: impl FnMut(&Rgb) -> bool) -> bool {
        self.cells.iter().all(f)
    }
}
