pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{BotConfig, CliArgs};
pub use self::core::{lookup::HttpLookupClient, pipeline::LookupPipeline};
pub use domain::model::{Identifier, LookupResult, Reply};
pub use utils::error::{BotError, Result};
