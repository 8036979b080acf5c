pub use app_state::AppState;

mod app_state;
