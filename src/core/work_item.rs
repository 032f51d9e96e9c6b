use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Segment, SegmentStyle};
use crate::error::{ChartError, ChartResult};

/// One scheduled piece of work: a stretch of line worked between two dates.
///
/// Locations are in the same distance units as the milepost axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    pub start_location: f64,
    pub end_location: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub style: Option<SegmentStyle>,
}

impl WorkItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        (start_location, start_date): (f64, NaiveDate),
        (end_location, end_date): (f64, NaiveDate),
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_location,
            end_location,
            start_date,
            end_date,
            style: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: SegmentStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id.is_empty() {
            return Err(ChartError::InvalidData(
                "work item id must not be empty".to_owned(),
            ));
        }
        if !self.start_location.is_finite() || !self.end_location.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "work item `{}` locations must be finite",
                self.id
            )));
        }
        if self.start_location < 0.0 || self.end_location < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "work item `{}` locations must be >= 0",
                self.id
            )));
        }
        Ok(())
    }

    /// Data-space segment; `y` counts days since `origin`.
    #[must_use]
    pub fn to_segment(&self, origin: NaiveDate) -> Segment {
        let segment = Segment::new(
            self.start_location,
            (self.start_date - origin).num_days() as f64,
            self.end_location,
            (self.end_date - origin).num_days() as f64,
        );
        match self.style {
            Some(style) => segment.with_style(style),
            None => segment,
        }
    }
}

/// Work items keyed by id, iterated in insertion order.
///
/// Conflict indices refer to this order, so replacing an item keeps its slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkItemSet {
    items: IndexMap<String, WorkItem>,
}

impl WorkItemSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces by id; returns the replaced item.
    pub fn upsert(&mut self, item: WorkItem) -> ChartResult<Option<WorkItem>> {
        item.validate()?;
        Ok(self.items.insert(item.id.clone(), item))
    }

    pub fn remove(&mut self, id: &str) -> Option<WorkItem> {
        self.items.shift_remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.items.get(id)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&WorkItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn to_segments(&self, origin: NaiveDate) -> Vec<Segment> {
        self.items
            .values()
            .map(|item| item.to_segment(origin))
            .collect()
    }
}

impl FromIterator<WorkItem> for WorkItemSet {
    /// Invalid items are skipped.
    fn from_iter<T: IntoIterator<Item = WorkItem>>(iter: T) -> Self {
        let mut set = Self::new();
        for item in iter {
            if item.validate().is_ok() {
                set.items.insert(item.id.clone(), item);
            }
        }
        set
    }
}
