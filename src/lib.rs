pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod offers;
pub mod score;
pub mod state;
pub mod stats;
pub mod storage;
pub mod trend;

pub use app::router;
pub use config::AppConfig;
pub use score::calculate_score;
pub use state::AppState;
pub use stats::aggregate;
pub use storage::load_data;
pub use trend::calculate_trend;
