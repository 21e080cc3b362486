use appeals_api_client::{AddMessageRequest, AppealDetail, AppealMessage};

use crate::resource::{FetchLifecycle, FetchTicket, ResourceState};

/// View model for a single appeal plus its reply box. Owned by the detail
/// view while mounted and discarded on navigation away.
#[derive(Debug, Default)]
pub struct AppealView {
    appeal: FetchLifecycle<AppealDetail>,
    draft: String,
    send_error: Option<String>,
}

impl AppealView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.appeal.begin()
    }

    pub fn settle_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<AppealDetail, String>,
    ) -> bool {
        self.appeal.settle(ticket, outcome)
    }

    #[must_use]
    pub fn state(&self) -> &ResourceState<AppealDetail> {
        self.appeal.state()
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    #[must_use]
    pub fn send_error(&self) -> Option<&str> {
        self.send_error.as_deref()
    }

    /// Builds the outbound payload for the current draft. The draft may be
    /// empty and is submitted as-is; replies from this console are always
    /// admin messages. Nothing to send unless the appeal is loaded.
    #[must_use]
    pub fn send_request(&self) -> Option<AddMessageRequest> {
        self.appeal.state().ready()?;
        Some(AddMessageRequest {
            message: self.draft.clone(),
            is_admin: true,
        })
    }

    /// Confirm-then-apply: called only once the server accepted the send.
    /// Appends exactly the text that went out, clears the draft, and clears
    /// any earlier send error.
    pub fn apply_send_success(&mut self, sent: AddMessageRequest) {
        if let ResourceState::Ready(detail) = self.appeal.state_mut() {
            detail.messages.push(AppealMessage {
                text: sent.message,
                is_admin: sent.is_admin,
            });
        }
        self.draft.clear();
        self.send_error = None;
    }

    /// A failed send leaves both the conversation and the draft untouched so
    /// resubmission needs no retyping; only the status line changes.
    pub fn apply_send_failure(&mut self, message: impl Into<String>) {
        self.send_error = Some(message.into());
    }
}
