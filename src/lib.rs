pub mod app;
pub mod config;
pub mod errors;
pub mod feed;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod sample;
pub mod series;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::load_data;
