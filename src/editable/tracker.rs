//! Reentrant batching of caret/selection change notifications.
//!
//! Compound operations (replace-selection, overwrite typing) perform several
//! low-level mutations. Each opens a scope; only when the outermost scope
//! closes is the caret state compared against the snapshot taken when it
//! opened, yielding at most one notification per batch.

use super::caret::CaretModel;
use crate::tracing::CaretSnapshot;

/// Depth counter plus the snapshot taken at the outermost `begin`
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    depth: u32,
    snapshot: Option<CaretSnapshot>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (0 when idle)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_tracking(&self) -> bool {
        self.depth > 0
    }

    pub fn begin(&mut self, caret: &CaretModel) {
        if self.depth == 0 {
            self.snapshot = Some(CaretSnapshot::from_model(caret));
        }
        self.depth += 1;
    }

    /// Close a scope. Returns true when the outermost scope closed and the
    /// caret or selection differs from the snapshot.
    ///
    /// # Panics
    ///
    /// Panics when no scope is open.
    pub fn end(&mut self, caret: &CaretModel) -> bool {
        assert!(
            self.depth > 0,
            "ChangeTracker::end called without a matching begin"
        );
        self.depth -= 1;
        if self.depth > 0 {
            return false;
        }

        let Some(before) = self.snapshot.take() else {
            return false;
        };
        let after = CaretSnapshot::from_model(caret);
        match before.diff(&after) {
            Some(change) => {
                tracing::trace!(target: "selection", %change, "selection changed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_scope_reports_change() {
        let mut tracker = ChangeTracker::new();
        let mut model = CaretModel::new();
        tracker.begin(&model);
        model.place(3);
        assert!(tracker.end(&model));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_nested_scopes_report_once() {
        let mut tracker = ChangeTracker::new();
        let mut model = CaretModel::new();

        tracker.begin(&model);
        tracker.begin(&model);
        model.place(2);
        assert!(!tracker.end(&model));
        assert_eq!(tracker.depth(), 1);
        tracker.begin(&model);
        model.set_anchor(Some(0));
        assert!(!tracker.end(&model));
        assert!(tracker.end(&model));
    }

    #[test]
    fn test_round_trip_change_is_silent() {
        let mut tracker = ChangeTracker::new();
        let mut model = CaretModel::new();
        model.place(4);

        tracker.begin(&model);
        model.place(0);
        model.place(4);
        assert!(!tracker.end(&model));
    }

    #[test]
    #[should_panic(expected = "without a matching begin")]
    fn test_unbalanced_end_panics() {
        let mut tracker = ChangeTracker::new();
        tracker.end(&CaretModel::new());
    }
}
