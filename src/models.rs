//! The objects passed between agents and providers. Conversations are built
//! fresh for every task and never retained past the call that sent them.
pub mod message;
