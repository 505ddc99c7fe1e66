//! # pharmadesk-cli
//!
//! Command-line front end for the pharmadesk backend.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pharmadesk login` | Exchange credentials for a bearer token |
//! | `pharmadesk list <resource>` | List every record of a resource |
//! | `pharmadesk get <resource> <id>` | Fetch one record |
//! | `pharmadesk create <resource> --field k=v ...` | Validate and create a record |
//! | `pharmadesk update <resource> <id> --field k=v ...` | Validate and patch a record |
//! | `pharmadesk delete <resource> <id>` | Delete a record |
//! | `pharmadesk resolve-alert <id>` | Mark an alert as resolved |
//! | `pharmadesk invoicing <id>` | Report missing fiscal data for a client |
//! | `pharmadesk dashboard` | Print the dashboard statistics |
//!
//! Every command prints pretty JSON on success. Forms are validated locally,
//! so a rejected form never reaches the backend.

pub mod commands;

pub use commands::CommandError;
