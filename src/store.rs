//! Ordered, capacity-bounded collection of student records.
//!
//! Records keep insertion order; deletion shifts later records down so there
//! are no gaps. Lookups are linear scans, and name lookup returns the first
//! match in store order.

use crate::core::{GradebookError, Identity, Result, StudentRecord};
use std::cmp::Ordering;

/// Default number of records a store accepts
pub const DEFAULT_CAPACITY: usize = 100;

/// Optional identity changes applied by [`RecordStore::update_info`].
///
/// `None` and empty strings leave the field untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoUpdate<'a> {
    pub name: Option<&'a str>,
    pub major: Option<&'a str>,
    pub registration_date: Option<&'a str>,
}

impl<'a> InfoUpdate<'a> {
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn major(mut self, major: &'a str) -> Self {
        self.major = Some(major);
        self
    }

    pub fn registration_date(mut self, date: &'a str) -> Self {
        self.registration_date = Some(date);
        self
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Outcome of offering a parsed record to the store during a bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    Added,
    Duplicate,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    capacity: usize,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl RecordStore {
    /// Create an empty store holding at most `capacity` records.
    ///
    /// Storage for every record is reserved up front; failure to reserve is
    /// reported as [`GradebookError::AllocationError`].
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(capacity)
            .map_err(|_| GradebookError::AllocationError { capacity })?;
        Ok(Self { records, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    pub fn is_duplicate_id(&self, id: i32) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    /// Append a new record with no grades
    pub fn add(&mut self, id: i32, name: &str, major: &str, registration_date: &str) -> Result<()> {
        if self.is_full() {
            return Err(GradebookError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.is_duplicate_id(id) {
            return Err(GradebookError::DuplicateId { id });
        }

        self.records.push(StudentRecord::new(Identity::new(
            id,
            name,
            major,
            registration_date,
        )));
        Ok(())
    }

    /// Remove the record with `id`, keeping the order of the others
    pub fn delete(&mut self, id: i32) -> Result<StudentRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(GradebookError::StudentNotFound { id })?;
        Ok(self.records.remove(index))
    }

    pub fn find_by_id(&self, id: i32) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: i32) -> Option<&mut StudentRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// First record whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut StudentRecord> {
        self.records.iter_mut().find(|r| r.name() == name)
    }

    /// Like [`find_by_id_mut`](Self::find_by_id_mut) but a miss is an error
    pub fn record_mut(&mut self, id: i32) -> Result<&mut StudentRecord> {
        self.find_by_id_mut(id)
            .ok_or(GradebookError::StudentNotFound { id })
    }

    /// Apply the present fields of `update` to the record with `id`
    pub fn update_info(&mut self, id: i32, update: InfoUpdate<'_>) -> Result<()> {
        let record = self.record_mut(id)?;
        let identity = &mut record.identity;

        if let Some(name) = present(update.name) {
            identity.set_name(name);
        }
        if let Some(major) = present(update.major) {
            identity.set_major(major);
        }
        if let Some(date) = present(update.registration_date) {
            identity.set_registration_date(date);
        }
        Ok(())
    }

    /// Ascending by id
    pub fn sort_by_id(&mut self) {
        self.records.sort_by_key(StudentRecord::id);
    }

    /// Lexicographic by name
    pub fn sort_by_name(&mut self) {
        self.records.sort_by(|a, b| a.name().cmp(b.name()));
    }

    /// Descending by GPA; equal GPAs keep their relative order
    pub fn sort_by_gpa(&mut self) {
        self.records.sort_by(compare_gpa_desc);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Offer a record read from a file, enforcing capacity and id uniqueness
    pub(crate) fn admit(&mut self, record: StudentRecord) -> Admission {
        if self.is_full() {
            return Admission::Full;
        }
        if self.is_duplicate_id(record.id()) {
            return Admission::Duplicate;
        }
        self.records.push(record);
        Admission::Added
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Ordering for "highest GPA first"
pub(crate) fn compare_gpa_desc(a: &StudentRecord, b: &StudentRecord) -> Ordering {
    b.gpa().total_cmp(&a.gpa())
}
