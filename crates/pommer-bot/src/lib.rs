#![deny(warnings)]
pub mod action;
pub mod agent;
pub mod policy;

pub use action::Action;
pub use agent::{AgentError, TrackingAgent};
pub use policy::{IdlePolicy, Policy, PolicyContext};
