//! Desired-state providers between `eos-api` and the `eosctl` front-end.
//!
//! Each resource family gets a typed resource struct and a provider that
//! implements [`Provider`]:
//!
//! - [`instances()`](Provider::instances) reads the switch and returns the
//!   resources as they currently exist.
//! - [`apply()`](Provider::apply) re-reads the switch, diffs it against a
//!   desired resource, and issues the `EosClient` operations that converge
//!   the two. Properties left as `None` are not managed.
//!
//! The switch is the only source of truth; providers keep no state between
//! calls.

pub mod convert;
pub mod error;
pub mod provider;
pub mod resources;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use provider::{ApplyReport, Change, Ensure, Provider};
pub use resources::*;

// Client construction is part of this crate's public surface so the CLI
// and config layers need not depend on `eos-api` directly.
pub use eos_api::{
    ClientConfig, CommunityGroup, EosClient, GroupKind, NotificationKind, PortChannelMode,
    SnmpVersion, TlsMode, TransportConfig,
};
