pub mod build_tool;
pub mod cli;
pub mod config;
pub mod docs;
pub mod domain;
pub mod error;
pub mod git;
pub mod process;
pub mod steps;
pub mod ui;
pub mod validator;

pub use error::{ReleaseError, Result};
