//! UI layer for the desktop GUI: app shell and the derived view model it renders.

pub mod app;
pub mod view_model;

pub use app::UserAdminApp;
