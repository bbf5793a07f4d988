//! Flutter-facing bindings for `velox_core`.

pub mod api;
