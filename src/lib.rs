//! jobsniper - upload validation, provider gating and analysis history
//! for the JobSniper AI resume assistant.
//!
//! The validators decide whether an analysis may run at all; the history
//! store records what the analysis produced. Neither ever fails the
//! caller: validators report problems in result values and the store
//! degrades to empty results.

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
