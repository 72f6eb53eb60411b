//#![warn(missing_docs)]

//! Named Data Networking names and a forwarding agent for mobile producers.
//!
//! A [`HandoffAgent`] stands in for a producer that is about to move. Before
//! the handoff it can hold back the Interests it receives, and afterwards it
//! relays them, tagged with a locator, to where the producer went.

pub mod tlv;

pub mod name;

pub mod clock;

pub mod nonce;

pub mod packet;

pub mod face;

pub mod tables;

pub mod config;

pub mod agent;

pub mod platform;

pub use agent::{AgentState, BufferState, DropReason, HandoffAgent, InterestOutcome, LifecycleError};
pub use clock::{Clock, ManualClock, Timestamp};
pub use config::AgentConfig;
pub use face::{AdmissionGate, FaceToken, InterestSender, LimitedFace};
pub use name::Name;
pub use nonce::NonceSource;
pub use packet::Interest;
pub use tables::{ReferenceRoutes, RoutePreference, RouteTable};
