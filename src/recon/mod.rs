// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Discovery layer on top of the Aura protocol
//!
//! Session state, route collection, component mining and the pipeline
//! orchestrator tying the stages together.

mod components;
mod pipeline;
mod routes;
mod session;

pub use components::{ComponentMiner, MAX_WALK_DEPTH};
pub use pipeline::Recon;
pub use routes::{Route, RouteCollector};
pub use session::Session;
