//! HTTP API handlers for proctord

pub mod buildinfo;
pub mod generate;
pub mod health;
pub mod submit;
pub mod violations;

pub use buildinfo::get_build_info;
pub use generate::generate_ai_response;
pub use health::health_routes;
pub use submit::submit_test;
pub use violations::{get_violations, log_violation};
