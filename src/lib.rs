//! Single-user workout log: workouts with target sets/reps, per-session
//! results, all kept in one JSON document.

pub mod app;
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

pub use app::{Action, AppState, Notice, View};
pub use collection::{stage_exercise, WorkoutCollection};
pub use config::AppConfig;
pub use error::{Result, WorkoutError};
pub use models::{Exercise, Session, SetResult, WorkoutMap, DATE_FORMAT};
pub use store::Store;
