pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use services::projects::ProjectService;
pub use services::providers::{rest::RestProjectSource, ProjectSource};
pub use services::recommendations::{Recommender, Strategy, DEFAULT_MAX_RECOMMENDATIONS};
pub use session::Session;
