//! Supabase auth and storage client.
//!
//! Covers the two concerns the backend delegates to Supabase: resolving the
//! signed-in user from an access token, and storing place images in a
//! public bucket.

pub mod client;
pub mod error;
pub mod object_key;
pub mod types;

pub use client::{SupabaseClient, CACHE_CONTROL_SECS};
pub use error::SupabaseError;
pub use object_key::{format_object_key, place_image_key};
pub use types::AuthUser;
