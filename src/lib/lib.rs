//! keepd — server-side secrets vault: synchronization engine, auth surface, and
//! storage adapters for a multi-device credential/card/note/blob keeper.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
