//! Item Board Core
//!
//! Wire model, API configuration, REST client and board state for the item
//! board. Shared by the Leptos frontend (wasm32) and the native e2e harness.

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod models;

pub use api::{HttpItemApi, ItemApi};
pub use board::{
    Board, BoardState, MSG_CREATED, MSG_CREATE_FAILED, MSG_DELETED,
};
pub use config::{ApiConfig, API_QUERY_PARAM, DEFAULT_API_BASE};
pub use error::{ApiError, ApiResult, ConfigError, UnknownField};
pub use models::{
    items_from_values, placeholder_image_url, FormField, FormState, Item, ItemId,
    PLACEHOLDER_IMAGE_BASE,
};
