use appeals_api_client::AppealSummary;

use crate::resource::{FetchLifecycle, FetchTicket, ResourceState};

/// View model behind the appeals table. Each mount re-fetches; nothing is
/// cached across views.
#[derive(Debug, Default)]
pub struct AppealsListView {
    appeals: FetchLifecycle<Vec<AppealSummary>>,
}

impl AppealsListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.appeals.begin()
    }

    pub fn settle_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<AppealSummary>, String>,
    ) -> bool {
        self.appeals.settle(ticket, outcome)
    }

    #[must_use]
    pub fn state(&self) -> &ResourceState<Vec<AppealSummary>> {
        self.appeals.state()
    }

    /// Navigation target for a selected row: the detail view of that appeal.
    #[must_use]
    pub fn row_target(&self, row: usize) -> Option<u64> {
        self.appeals
            .state()
            .ready()
            .and_then(|appeals| appeals.get(row))
            .map(|appeal| appeal.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_appeals() -> Vec<AppealSummary> {
        vec![
            AppealSummary {
                id: 1,
                title: "appeal 1".to_string(),
            },
            AppealSummary {
                id: 2,
                title: "appeal 2".to_string(),
            },
        ]
    }

    #[test]
    fn rows_render_in_server_order() {
        let mut view = AppealsListView::new();
        let ticket = view.begin_fetch();
        assert!(view.settle_fetch(ticket, Ok(two_appeals())));

        let appeals = view.state().ready().map(Vec::as_slice).unwrap_or(&[]);
        assert_eq!(appeals.len(), 2);
        assert_eq!((appeals[0].id, appeals[0].title.as_str()), (1, "appeal 1"));
        assert_eq!((appeals[1].id, appeals[1].title.as_str()), (2, "appeal 2"));
    }

    #[test]
    fn selecting_the_second_row_targets_appeal_two() {
        let mut view = AppealsListView::new();
        let ticket = view.begin_fetch();
        view.settle_fetch(ticket, Ok(two_appeals()));

        assert_eq!(view.row_target(1), Some(2));
        assert_eq!(view.row_target(5), None);
    }

    #[test]
    fn rows_are_not_selectable_while_loading_or_failed() {
        let mut view = AppealsListView::new();
        view.begin_fetch();
        assert_eq!(view.row_target(0), None);

        let ticket = view.begin_fetch();
        view.settle_fetch(ticket, Err("Unauthorized".to_string()));
        assert_eq!(view.row_target(0), None);
        assert_eq!(view.state().failure(), Some("Unauthorized"));
    }
}
