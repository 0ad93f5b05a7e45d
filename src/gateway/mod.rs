//! Core request pipeline: permissions, cache and dispatch.

pub mod cache;
pub mod clock;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod permissions;

pub use cache::{CacheEntry, CacheError, CacheKey, ResultCache};
pub use clock::{Clock, SystemClock};
pub use context::RequestContext;
pub use dispatcher::{Dispatcher, Fetched};
pub use error::{GatewayError, GatewayResult};
pub use permissions::PermissionFilter;
