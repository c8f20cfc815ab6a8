//! Transport resolution.
//!
//! Every upstream call goes through [`fetch_text`], which rewrites the target
//! URL according to the selected [`Transport`]:
//! - `Direct`: the target as-is
//! - `CorsAnywhere`: relay prefix plus the raw target, with `Origin` and
//!   `X-Requested-With` headers
//! - `AllOrigins`: relay with the percent-encoded target in `?url=`
//! - `Custom`: user template, `{target}` replaced by the percent-encoded target
//!
//! Callers never need to know which strategy is active.

mod request;
mod strategy;

pub use request::{fetch_text, resolve_request, ResolvedRequest};
pub use strategy::Transport;
