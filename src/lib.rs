pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod quotes;
pub mod search;
pub mod settings;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod ui;
pub mod widget;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::KeyValueStore;
pub use widget::Widget;
