// eos-api: Async Rust client for the Arista EOS command API (eAPI)

pub mod client;
pub mod error;
pub mod models;
pub mod parse;
pub mod rpc;
pub mod transport;

mod aaa;
mod dns;
mod interfaces;
mod logging;
mod ntp;
mod port_channels;
mod snmp;
mod switchports;
mod system;
mod vlans;

pub use aaa::{RadiusGlobal, TacacsGlobal};
pub use client::{ClientConfig, EosClient};
pub use port_channels::channel_group_number;
pub use error::Error;
pub use models::*;
pub use rpc::{Format, RequestOptions, RpcError, RpcResponse};
pub use transport::{Endpoint, TlsMode, TransportConfig};
