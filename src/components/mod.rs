//! Shared UI components: the route gates and the application chrome.

pub mod chrome;
pub mod gate;
