//! # lumina-adapter-rpc
//!
//! Outbound adapter for the controllers' HTTP RPC interface.
//!
//! - [`RpcActuator`] implements the [`Actuator`](lumina_app::ports::Actuator)
//!   port: one `GET /rpc/<Method>?id=…` call per command.
//! - [`RpcScheduleStore`] implements the
//!   [`ScheduleStore`](lumina_app::ports::ScheduleStore) port with JSON-RPC
//!   frames posted to `/rpc`. Created entries call back into lumina's HTTP
//!   surface with `HTTP.GET` when they fire.

pub mod actuator;
pub mod client;
pub mod config;
pub mod error;
pub mod schedule_store;

pub use actuator::RpcActuator;
pub use client::RpcClient;
pub use config::RpcConfig;
pub use error::RpcError;
pub use schedule_store::RpcScheduleStore;
