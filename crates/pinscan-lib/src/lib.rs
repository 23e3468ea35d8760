//! Inventory of the external dependencies of GitHub Actions workflows.
//!
//! [`domain::analyze_workflow`] turns the text of a workflow into an ordered list
//! of actions, container images and runner labels, each classified by how
//! tightly its version is pinned. The rest of the crate feeds it: local
//! repository scanning, queue event decoding and the Github contents API.

pub mod commands;
pub mod config;
pub mod domain;
pub mod infrastructure;
