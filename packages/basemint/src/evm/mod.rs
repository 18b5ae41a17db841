//! Live EVM collaborators backed by alloy
//!
//! Everything under this module talks to a real node: typed contract
//! bindings, provider construction, the write/receipt submitter, and the
//! batched reader. The core state machines in the crate root only see these
//! through the `TxCollaborator` and `TokenReads` traits.

pub mod client;
pub mod contracts;
pub mod reader;
pub mod submit;

pub use client::read_provider;
pub use reader::EvmReader;
pub use submit::EvmSubmitter;
