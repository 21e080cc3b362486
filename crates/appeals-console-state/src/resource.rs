/// One fetch attempt's observable state. Exactly one variant is active per
/// mounted view, so a loading indicator and a data or error rendering can
/// never coexist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> ResourceState<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued fetch; only the latest ticket may settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The three-state fetch machine shared by the list and detail views.
///
/// `begin` is called on mount and on every re-fetch trigger (a credential
/// change or a navigation to a different resource id — never a timer). The
/// generation counter makes out-of-order settlements harmless: a response
/// belonging to a superseded request is discarded instead of clobbering the
/// state of the newer one.
#[derive(Debug)]
pub struct FetchLifecycle<T> {
    state: ResourceState<T>,
    generation: u64,
}

impl<T> FetchLifecycle<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ResourceState::Pending,
            generation: 0,
        }
    }

    /// Starts a fetch attempt: re-enters `Pending` and invalidates any
    /// response still in flight from an earlier attempt.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = ResourceState::Pending;
        FetchTicket(self.generation)
    }

    /// Applies a settled fetch. Returns false when the ticket is stale, in
    /// which case the state is left untouched.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: Result<T, String>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.state = match outcome {
            Ok(data) => ResourceState::Ready(data),
            Err(message) => ResourceState::Failed(message),
        };
        true
    }

    #[must_use]
    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ResourceState<T> {
        &mut self.state
    }
}

impl<T> Default for FetchLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}
