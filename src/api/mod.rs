pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ApiError, MenuRequest, WorkoutBackend};
pub use http::HttpBackend;
pub use types::{AiCall, RpeLevel, WorkoutSet};
