//! AWS static site declarations for siteflow
//!
//! This crate turns a siteflow project into a typed AWS resource graph:
//! a Route 53 zone, a DNS-validated ACM certificate, a private S3 bucket holding
//! the site's build output, and a CloudFront distribution in front of it.
//!
//! # Example
//!
//! ```ignore
//! use siteflow_cloud::{Engine, ManifestStore};
//! use siteflow_cloud_aws::declare_site;
//!
//! let project = siteflow_core::load_project(path)?;
//! let outputs = declare_site(&project, "org.portal.dev")?;
//!
//! let store = ManifestStore::new(".");
//! let receipt = store.submit(&outputs.stack.manifest()).await?;
//! ```

pub mod error;
pub mod provider;
pub mod resources;
pub mod site;
pub mod sync;

pub use error::{AwsError, Result};
pub use provider::{AwsProvider, PROVIDER_TYPE, aws_context};
pub use site::{SiteOutputs, declare_site};
pub use sync::{content_type, folder_to_s3, folder_to_s3_with, object_entries};
