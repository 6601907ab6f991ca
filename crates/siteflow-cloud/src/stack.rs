//! Stack context and resource declaration
//!
//! A [`Stack`] owns the [`StackContext`] built once at startup and the graph of
//! resources declared against it. Every component that declares a resource
//! receives the stack explicitly.

use crate::error::Result;
use crate::manifest::Manifest;
use crate::resource::{ResourceConfig, ResourceGraph, ResourceHandle};
use serde::{Deserialize, Serialize};

/// Typed resource arguments with a fixed type token
pub trait ResourceArgs: Serialize {
    /// Resource type token (e.g., "aws:s3/bucket:Bucket")
    const TYPE: &'static str;
}

/// Process-wide configuration shared by every declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackContext {
    /// Project name
    pub project: String,

    /// Full stack name (e.g., "org.portal.dev")
    pub stack: String,

    /// Environment name resolved from the stack name
    pub env: String,

    /// Provider resource every declaration is bound to
    pub provider: ResourceHandle,
}

impl StackContext {
    pub fn new(
        project: impl Into<String>,
        stack: impl Into<String>,
        provider: ResourceHandle,
    ) -> Self {
        let stack = stack.into();
        Self {
            project: project.into(),
            env: env_from_stack_name(&stack),
            stack,
            provider,
        }
    }
}

/// Environment name is the last `.` separated segment of the stack name
pub fn env_from_stack_name(stack: &str) -> String {
    stack.rsplit('.').next().unwrap_or(stack).to_string()
}

/// Resource graph under construction, bound to its context
#[derive(Debug, Clone)]
pub struct Stack {
    context: StackContext,
    graph: ResourceGraph,
}

impl Stack {
    pub fn new(context: StackContext) -> Self {
        Self {
            context,
            graph: ResourceGraph::new(),
        }
    }

    pub fn context(&self) -> &StackContext {
        &self.context
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    pub fn into_graph(self) -> ResourceGraph {
        self.graph
    }

    /// Declare the provider node the context points to
    pub fn declare_provider(&mut self, config: serde_json::Value) -> Result<ResourceHandle> {
        let handle = self.context.provider.clone();
        self.graph.add(ResourceConfig::new(
            &handle.resource_type,
            &handle.id,
            None,
            config,
        ))?;
        tracing::debug!(provider = %handle.key(), "Declared provider");
        Ok(handle)
    }

    /// Declare a resource bound to the context's provider
    pub fn declare(
        &mut self,
        resource_type: &str,
        id: &str,
        config: serde_json::Value,
    ) -> Result<ResourceHandle> {
        let resource = ResourceConfig::new(
            resource_type,
            id,
            Some(self.context.provider.key()),
            config,
        );
        let handle = resource.handle();
        self.graph.add(resource)?;
        tracing::debug!(resource = %handle.key(), "Declared resource");
        Ok(handle)
    }

    /// Declare a resource from typed arguments
    pub fn declare_resource<R: ResourceArgs>(&mut self, id: &str, args: &R) -> Result<ResourceHandle> {
        let config = serde_json::to_value(args)?;
        self.declare(R::TYPE, id, config)
    }

    /// Snapshot of the graph for the provisioning engine
    pub fn manifest(&self) -> Manifest {
        Manifest::new(&self.context, self.graph.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudError;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestBucket {
        bucket_prefix: String,
    }

    impl ResourceArgs for TestBucket {
        const TYPE: &'static str = "test:bucket";
    }

    fn stack() -> Stack {
        Stack::new(StackContext::new(
            "portal",
            "org.portal.dev",
            ResourceHandle::new("test:provider", "local"),
        ))
    }

    #[test]
    fn test_env_from_stack_name() {
        assert_eq!(env_from_stack_name("org.portal.dev"), "dev");
        assert_eq!(env_from_stack_name("prod"), "prod");
        assert_eq!(env_from_stack_name("portal."), "");
    }

    #[test]
    fn test_context_resolves_env() {
        let stack = stack();
        assert_eq!(stack.context().env, "dev");
        assert_eq!(stack.context().stack, "org.portal.dev");
    }

    #[test]
    fn test_declare_binds_provider() {
        let mut stack = stack();
        stack.declare_provider(json!({ "region": "us-west-2" })).unwrap();
        let handle = stack
            .declare_resource(
                "site",
                &TestBucket {
                    bucket_prefix: "portal-".to_string(),
                },
            )
            .unwrap();

        let resource = stack.graph().get("test:bucket", "site").unwrap();
        assert_eq!(handle.key(), "test:bucket::site");
        assert_eq!(resource.provider.as_deref(), Some("test:provider::local"));
        assert_eq!(resource.config, json!({ "bucketPrefix": "portal-" }));
        assert_eq!(resource.depends_on, vec!["test:provider::local"]);
        assert!(stack.graph().validate().is_ok());
    }

    #[test]
    fn test_provider_has_no_provider() {
        let mut stack = stack();
        stack.declare_provider(json!({})).unwrap();

        let provider = stack.graph().get("test:provider", "local").unwrap();
        assert!(provider.provider.is_none());
        assert!(provider.depends_on.is_empty());
    }

    #[test]
    fn test_missing_provider_fails_validation() {
        let mut stack = stack();
        stack.declare("test:bucket", "site", json!({})).unwrap();

        assert!(matches!(
            stack.graph().validate(),
            Err(CloudError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut stack = stack();
        stack.declare("test:bucket", "site", json!({})).unwrap();
        assert!(matches!(
            stack.declare("test:bucket", "site", json!({})),
            Err(CloudError::DuplicateResource(_))
        ));
    }
}
