//! # Integration Flows

pub mod keeper_flow;
pub mod quorum_roots;
pub mod subscription_lifecycle;
