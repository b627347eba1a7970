//! Nimbus command line: authenticate against the identity service, inspect
//! the service catalog and send authenticated requests.

pub use cmd::{Cli, Command};

pub mod cmd;
