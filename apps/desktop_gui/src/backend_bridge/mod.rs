//! Bridge between the UI thread and the worker that talks to the user service.

pub mod commands;
pub mod runtime;
