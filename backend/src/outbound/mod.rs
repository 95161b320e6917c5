//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **storage**: key-value stores backing the per-user ledgers.
//!
//! Adapters translate between bytes on a medium and the port contract. They
//! contain no ledger logic.

pub mod storage;
