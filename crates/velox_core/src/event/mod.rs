//! In-process publish/subscribe between managers and the render layer.
//!
//! # Responsibility
//! - Name every cross-component event and its payload.
//! - Dispatch synchronously in subscription order.
//!
//! # See also
//! - `bus` for dispatch and failure isolation rules.

pub mod bus;
mod types;

pub use bus::{EventBus, HandlerResult, PublishReport, SubscriptionId};
pub use types::{AppEvent, EventName};
