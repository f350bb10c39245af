//! One module per subcommand.

pub mod completions;
pub mod config;
pub mod entity;
pub mod feature;
pub mod generate;
pub mod init;
pub mod list;
pub mod model;
pub mod new;
pub mod repository;
