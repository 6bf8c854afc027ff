//! UI components for the banner editor

pub mod form;
pub mod gallery;
pub mod saved_dialog;
