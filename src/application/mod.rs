//! Application layer containing the block lifecycle orchestration.
//!
//! This module defines `BlockLifecycle`, which applies the block, unblock and
//! status rules on top of an injected `BlockStore`.

pub mod lifecycle;
