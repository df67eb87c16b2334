//! # Editor State
//!
//! Record-set state behind the overview screen: display ordering, row
//! marking for delete-by-rewrite, and per-pet weight history.

use crate::core::dates::parse_due_date;
use crate::core::TreatmentRecord;
use std::collections::HashSet;

/// Loaded records plus the overview's selection and deletion marks.
///
/// Records are kept in store order; the overview displays them sorted by
/// next-due date (records without a parseable due date sort last), so the
/// two orderings are tracked separately and marks always refer to store
/// indices.
#[derive(Debug, Default)]
pub struct RecordsState {
    records: Vec<TreatmentRecord>,
    display_order: Vec<usize>,
    /// Cursor position, an index into `display_order`
    pub selected: usize,
    marked: HashSet<usize>,
}

impl RecordsState {
    /// Replace the record set, resetting selection and marks.
    pub fn set_records(&mut self, records: Vec<TreatmentRecord>) {
        let mut order: Vec<usize> = (0..records.len()).collect();
        // Sort by parsed due date, unparseable/empty last, store order as tiebreak
        order.sort_by_key(|&i| match parse_due_date(&records[i].next_due_date) {
            Some(date) => (0, date, i),
            None => (1, chrono::NaiveDate::MAX, i),
        });

        self.records = records;
        self.display_order = order;
        self.selected = 0;
        self.marked.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records in display order, with their store indices.
    pub fn display_rows(&self) -> impl Iterator<Item = (usize, &TreatmentRecord)> {
        self.display_order.iter().map(|&i| (i, &self.records[i]))
    }

    /// The record under the cursor.
    pub fn selected_record(&self) -> Option<&TreatmentRecord> {
        self.display_order
            .get(self.selected)
            .map(|&i| &self.records[i])
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.display_order.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.display_order.len().saturating_sub(1);
    }

    /// Toggle the deletion mark on the row under the cursor.
    pub fn toggle_mark_selected(&mut self) {
        if let Some(&store_index) = self.display_order.get(self.selected) {
            if !self.marked.remove(&store_index) {
                self.marked.insert(store_index);
            }
        }
    }

    pub fn is_marked(&self, store_index: usize) -> bool {
        self.marked.contains(&store_index)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// The collection with marked rows filtered out, in store order.
    ///
    /// This is what delete-by-rewrite sends back to the store.
    pub fn remaining_after_delete(&self) -> Vec<TreatmentRecord> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.marked.contains(i))
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Unique pet names in first-seen order, for the entry form selector.
    pub fn existing_pets(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut pets = Vec::new();
        for record in &self.records {
            if !record.subject_name.is_empty() && seen.insert(record.subject_name.clone()) {
                pets.push(record.subject_name.clone());
            }
        }
        pets
    }

    /// Weight measurements for one pet in store (entry) order.
    pub fn weight_history(&self, subject_name: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.subject_name == subject_name)
            .filter_map(|r| r.weight_kg)
            .collect()
    }

    /// Number of records for one pet.
    pub fn record_count_for(&self, subject_name: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.subject_name == subject_name)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, next_due: &str, weight: Option<f64>) -> TreatmentRecord {
        TreatmentRecord {
            subject_name: subject.to_string(),
            treatment_type: "Kuduz".to_string(),
            applied_date: "2025-01-01".to_string(),
            next_due_date: next_due.to_string(),
            weight_kg: weight,
        }
    }

    fn state(records: Vec<TreatmentRecord>) -> RecordsState {
        let mut state = RecordsState::default();
        state.set_records(records);
        state
    }

    #[test]
    fn test_display_order_sorts_by_due_date_with_blanks_last() {
        let state = state(vec![
            record("Max", "2025-06-10", None),
            record("Luna", "", None),
            record("Rex", "2025-06-03", None),
        ]);
        let order: Vec<&str> = state
            .display_rows()
            .map(|(_, r)| r.subject_name.as_str())
            .collect();
        assert_eq!(order, vec!["Rex", "Max", "Luna"]);
    }

    #[test]
    fn test_marks_follow_store_indices_across_display_sort() {
        let mut state = state(vec![
            record("Max", "2025-06-10", None),
            record("Rex", "2025-06-03", None),
        ]);
        // Cursor starts on Rex (earliest due), which is store index 1
        state.toggle_mark_selected();
        assert!(state.is_marked(1));

        let remaining = state.remaining_after_delete();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].subject_name, "Max");
    }

    #[test]
    fn test_toggle_mark_twice_clears() {
        let mut state = state(vec![record("Max", "2025-06-10", None)]);
        state.toggle_mark_selected();
        state.toggle_mark_selected();
        assert_eq!(state.marked_count(), 0);
    }

    #[test]
    fn test_remaining_preserves_store_order() {
        let mut state = state(vec![
            record("A", "2025-06-10", None),
            record("B", "2025-06-03", None),
            record("C", "2025-06-05", None),
        ]);
        state.select_last(); // display order: B, C, A -> cursor on A (store 0)
        state.toggle_mark_selected();
        let remaining = state.remaining_after_delete();
        let names: Vec<&str> = remaining.iter().map(|r| r.subject_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_existing_pets_unique_in_first_seen_order() {
        let state = state(vec![
            record("Max", "", None),
            record("Luna", "", None),
            record("Max", "", None),
        ]);
        assert_eq!(state.existing_pets(), vec!["Max", "Luna"]);
    }

    #[test]
    fn test_weight_history_for_one_pet() {
        let state = state(vec![
            record("Max", "", Some(11.0)),
            record("Luna", "", Some(4.2)),
            record("Max", "", None),
            record("Max", "", Some(12.5)),
        ]);
        assert_eq!(state.weight_history("Max"), vec![11.0, 12.5]);
        assert_eq!(state.record_count_for("Max"), 3);
    }

    #[test]
    fn test_selection_clamps_at_ends() {
        let mut state = state(vec![record("Max", "", None), record("Luna", "", None)]);
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
    }
}
