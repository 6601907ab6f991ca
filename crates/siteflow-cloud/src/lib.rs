//! siteflow Cloud Declarations
//!
//! Provider-agnostic model for declaring cloud resources and handing them to an
//! external provisioning engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 siteflow CLI                     │
//! │                (siteflow synth)                  │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               siteflow-cloud                     │
//! │  ┌──────────────┐  ┌──────────────────────────┐ │
//! │  │ StackContext │  │ ResourceGraph + $ref      │ │
//! │  └──────────────┘  └──────────────────────────┘ │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait Engine { submit(manifest) }        │   │
//! │  └──────────────────────────────────────────┘   │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼────────────┐      ┌────────────────────┐
//! │ siteflow-cloud-aws │      │ provisioning engine │
//! │  typed resources   │      │   (external)        │
//! └────────────────────┘      └────────────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod manifest;
pub mod resource;
pub mod stack;

// Re-exports
pub use engine::{Engine, Receipt};
pub use error::{CloudError, Result};
pub use manifest::{Manifest, ManifestStore};
pub use resource::{
    GraphSummary, Input, REF_KEY, Reference, ResourceConfig, ResourceGraph, ResourceHandle,
};
pub use stack::{ResourceArgs, Stack, StackContext, env_from_stack_name};
