//! Configuration module for audiograb.
//!
//! Handles loading and saving the persisted destination folder.

mod settings;

pub use settings::{ConfigStore, Settings};
