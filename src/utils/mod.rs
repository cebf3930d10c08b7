//! Shared helpers.

pub mod slug;
