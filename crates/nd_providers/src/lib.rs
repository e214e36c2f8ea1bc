pub mod cli;
pub mod logging;
pub mod providers;
pub mod resolver;

pub use cli::{handle_command, NewsCommands};
pub use logging::{init_logging, Logger};
pub use resolver::{filter_removed, NewsResolver};

pub mod prelude {
    pub use super::resolver::NewsResolver;
    pub use nd_core::{Article, Category, Error, NewsProvider, NewsRequest, Result};
}
