//! Core functionality: the banner record, its stores and editing state

pub mod banner;
pub mod config;
pub mod editor;
pub mod session;
pub mod store;
pub mod tasks;
