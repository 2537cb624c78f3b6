//! Assignment map: which sample occupies which well.
//!
//! A well holds at most one sample. A sample may sit in any number of wells.
//! Empty wells have no entry at all, so "occupied" is exactly "key present".

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::PlateError;
use crate::geometry::{column_wells, row_major_order, row_wells};
use crate::model::{SampleId, WellId};

/// Mapping from well to the sample placed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentMap {
    wells: BTreeMap<WellId, SampleId>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `sample` into `well`, returning the previous occupant.
    pub fn place(&mut self, well: WellId, sample: SampleId) -> Option<SampleId> {
        self.wells.insert(well, sample)
    }

    /// Empty a well, returning what was in it.
    pub fn clear(&mut self, well: WellId) -> Option<SampleId> {
        self.wells.remove(&well)
    }

    /// Empty every listed well. Returns how many were occupied.
    pub fn clear_many<I>(&mut self, wells: I) -> usize
    where
        I: IntoIterator<Item = WellId>,
    {
        wells
            .into_iter()
            .filter(|&well| self.clear(well).is_some())
            .count()
    }

    /// Empty the whole plate. Returns how many wells were occupied.
    pub fn clear_all(&mut self) -> usize {
        let count = self.wells.len();
        self.wells.clear();
        count
    }

    /// Put `sample` into every well of `row`.
    pub fn fill_row(&mut self, row: usize, sample: &SampleId) -> Result<(), PlateError> {
        for well in row_wells(row)? {
            self.place(well, sample.clone());
        }
        Ok(())
    }

    /// Put `sample` into every well of `col`.
    pub fn fill_column(&mut self, col: usize, sample: &SampleId) -> Result<(), PlateError> {
        for well in column_wells(col)? {
            self.place(well, sample.clone());
        }
        Ok(())
    }

    /// Empty every well of `row`.
    pub fn clear_row(&mut self, row: usize) -> Result<usize, PlateError> {
        Ok(self.clear_many(row_wells(row)?))
    }

    /// Empty every well of `col`.
    pub fn clear_column(&mut self, col: usize) -> Result<usize, PlateError> {
        Ok(self.clear_many(column_wells(col)?))
    }

    pub fn occupant_of(&self, well: WellId) -> Option<&SampleId> {
        self.wells.get(&well)
    }

    pub fn is_occupied(&self, well: WellId) -> bool {
        self.wells.contains_key(&well)
    }

    /// Count of wells with no occupant.
    pub fn unassigned_count(&self) -> usize {
        row_major_order()
            .into_iter()
            .filter(|well| !self.wells.contains_key(well))
            .count()
    }

    /// Number of occupied wells.
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Occupied wells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (WellId, &SampleId)> {
        self.wells.iter().map(|(&well, sample)| (well, sample))
    }

    /// Wells currently holding `sample`, row-major.
    pub fn wells_holding(&self, sample: &str) -> Vec<WellId> {
        self.wells
            .iter()
            .filter(|(_, occupant)| occupant.as_str() == sample)
            .map(|(&well, _)| well)
            .collect()
    }

    /// Samples placed in at least one well.
    pub fn placed_samples(&self) -> HashSet<SampleId> {
        self.wells.values().cloned().collect()
    }

    /// Occupants of the given wells, skipping empty ones.
    pub fn occupants<'a, I>(&'a self, wells: I) -> impl Iterator<Item = &'a SampleId> + 'a
    where
        I: IntoIterator<Item = &'a WellId>,
        I::IntoIter: 'a,
    {
        wells.into_iter().filter_map(|well| self.wells.get(well))
    }
}
