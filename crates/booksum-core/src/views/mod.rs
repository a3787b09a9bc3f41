//! UI-agnostic state for each screen.
//!
//! Every view keeps its own form and display state and talks to the backend
//! only through [`SummarizerApi`](crate::api::SummarizerApi). Calls are split
//! into a synchronous `begin_*` half that validates and produces the request,
//! and a `finish_*` half that folds the result back in, so a front-end can
//! run the network part wherever it likes.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod format;
pub mod landing;

pub use admin::{AdminDashboard, AdminStats, AdminTab};
pub use auth::{LoginForm, RegisterForm};
pub use dashboard::{DashboardTab, SummaryInput, UserDashboard};
pub use landing::{LandingAction, Step, Feature};
