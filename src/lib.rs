pub mod app;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod palette;
pub mod report;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
