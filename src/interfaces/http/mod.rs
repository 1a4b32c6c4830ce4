//! HTTP interface
//!
//! - `common`: response envelope, error mapping, validated JSON bodies
//! - `middleware`: session resolution, auth extractors, page route guard
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table and OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::{build_router, ApiDoc};
pub use state::AppState;
