//! gosetup: wire an installed toolchain into the system shell profile
//!
//! The binary verifies the installation, creates the workspace directory and
//! patches the profile through [`gosetup_profile`], asking for confirmation
//! on the terminal before anything is written.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod install;
pub mod prompt;
pub mod settings;
pub mod tracing;
