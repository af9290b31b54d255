//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - The task form's state container and its reducer
//! - Navigation types (form routes and destinations)
//! - The input-layer `State` wrapping the form for the terminal UI
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{Action, FormField, PROJECTS_LOAD_ERROR, SAVE_ERROR, TASK_LOAD_ERROR};
pub use navigation::{FormRoute, Route};

// State struct and its methods are in state_impl.rs
mod state_impl;

pub use state_impl::State;
