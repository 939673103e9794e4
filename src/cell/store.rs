use super::types::{Cell, Fragment};
use std::collections::HashMap;
use tracing::debug;

/// All cells of the current document, keyed by fragment.
#[derive(Debug, Default)]
pub struct CellStore {
    cells: HashMap<Fragment, Cell>,
}

impl CellStore {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Insert or replace the whole cell for its fragment.
    pub fn put(&mut self, cell: Cell) {
        debug!(
            fragment = cell.fragment,
            position = cell.position,
            "storing cell"
        );
        self.cells.insert(cell.fragment, cell);
    }

    pub fn reset(&mut self) {
        self.cells.clear();
    }

    pub fn get(&self, fragment: Fragment) -> Option<&Cell> {
        self.cells.get(&fragment)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells sorted by `(position, fragment)`.
    pub fn snapshot(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by_key(|c| c.order_key());
        cells
    }

    pub fn clear_executing(&mut self) {
        for cell in self.cells.values_mut() {
            cell.executing = false;
        }
    }

    /// Mark `fragment` as the only executing cell. Returns false if unknown.
    pub fn mark_executing(&mut self, fragment: Fragment) -> bool {
        self.clear_executing();
        match self.cells.get_mut(&fragment) {
            Some(cell) => {
                cell.executing = true;
                true
            }
            None => false,
        }
    }

    pub fn set_executing(&mut self, fragment: Fragment, executing: bool) {
        if let Some(cell) = self.cells.get_mut(&fragment) {
            cell.executing = executing;
        }
    }

    /// Wipe the source of a cell, keeping its place in the notebook.
    pub fn clear_content(&mut self, fragment: Fragment) -> bool {
        match self.cells.get_mut(&fragment) {
            Some(cell) => {
                cell.content.clear();
                true
            }
            None => false,
        }
    }

    pub fn executing_count(&self) -> usize {
        self.cells.values().filter(|c| c.executing).count()
    }
}
