pub mod detail;
pub mod list;
pub mod login;
pub mod resource;

pub use detail::AppealView;
pub use list::AppealsListView;
pub use login::{LoginForm, LoginSettled};
pub use resource::{FetchLifecycle, FetchTicket, ResourceState};
