use serde::{Deserialize, Serialize};

use eco_model::InspectionRecord;

/// Finished inspection records, most recent first.
///
/// The archive only grows: new records are prepended and stored records are
/// never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordArchive {
    records: Vec<InspectionRecord>,
}

impl RecordArchive {
    pub fn new(records: Vec<InspectionRecord>) -> Self {
        Self { records }
    }

    pub fn find(&self, id: &str) -> Option<&InspectionRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Records whose business name or inspector name contains `query`,
    /// ignoring case. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&InspectionRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.business.name.to_lowercase().contains(&needle)
                    || record.inspector.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Number of records whose embedded inspector snapshot has this id.
    pub fn count_for_inspector(&self, inspector_id: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.inspector.id == inspector_id)
            .count()
    }

    pub fn first(&self) -> Option<&InspectionRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InspectionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn prepend(&mut self, record: InspectionRecord) {
        self.records.insert(0, record);
    }
}
