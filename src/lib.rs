pub mod app;
pub mod calendar;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod status;
pub mod storage;
pub mod ui;

pub use app::router;
pub use calendar::{build_grid, month_view, summarize};
pub use state::AppState;
pub use status::{classify, label};
pub use storage::{load_store, resolve_data_path};
