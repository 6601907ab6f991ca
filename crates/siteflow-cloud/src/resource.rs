//! Declared resources and the graph they form

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// JSON key marking a deferred reference inside a resource config
pub const REF_KEY: &str = "$ref";

/// Placeholder replaced by the resolved value in a reference template
const TEMPLATE_SLOT: &str = "{}";

/// Handle to a declared resource, used to reference its outputs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub resource_type: String,
    pub id: String,
}

impl ResourceHandle {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Full resource key (type::id)
    pub fn key(&self) -> String {
        resource_key(&self.resource_type, &self.id)
    }

    /// Reference to an output attribute, resolved later by the engine
    pub fn output(&self, attribute: impl Into<String>) -> Reference {
        Reference {
            resource: self.key(),
            attribute: attribute.into(),
            template: None,
        }
    }

    /// Reference whose resolved value is substituted into `template` at `{}`
    pub fn output_with(
        &self,
        attribute: impl Into<String>,
        template: impl Into<String>,
    ) -> Reference {
        Reference {
            resource: self.key(),
            attribute: attribute.into(),
            template: Some(template.into()),
        }
    }
}

/// A value not known until the provisioning engine resolves an upstream resource.
///
/// Serialized inline as `{"$ref": "<type>::<id>", "attribute": "...", "template": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub resource: String,

    /// Attribute path on the referenced resource (e.g. `arn`, `domainValidationOptions[0].resourceRecordName`)
    pub attribute: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Reference {
    /// Final value once the engine has resolved the attribute
    pub fn apply(&self, resolved: &str) -> String {
        match &self.template {
            Some(template) => template.replacen(TEMPLATE_SLOT, resolved, 1),
            None => resolved.to_string(),
        }
    }

    /// Parse a reference object, if `value` is one
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value.get(REF_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }
}

impl From<Reference> for serde_json::Value {
    fn from(reference: Reference) -> Self {
        let mut object = serde_json::Map::new();
        object.insert(REF_KEY.to_string(), reference.resource.into());
        object.insert("attribute".to_string(), reference.attribute.into());
        if let Some(template) = reference.template {
            object.insert("template".to_string(), template.into());
        }
        serde_json::Value::Object(object)
    }
}

/// Resource argument that is either known now or deferred to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input<T> {
    Ref(Reference),
    Value(T),
}

impl<T> From<Reference> for Input<T> {
    fn from(reference: Reference) -> Self {
        Input::Ref(reference)
    }
}

impl From<String> for Input<String> {
    fn from(value: String) -> Self {
        Input::Value(value)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Input::Value(value.to_string())
    }
}

pub(crate) fn resource_key(resource_type: &str, id: &str) -> String {
    format!("{}::{}", resource_type, id)
}

/// Declaration of a single cloud resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource type token (e.g., "aws:s3/bucket:Bucket")
    pub resource_type: String,

    /// Logical resource name, unique per type
    pub id: String,

    /// Key of the provider resource; `None` for provider nodes themselves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Resource arguments, possibly containing references
    pub config: serde_json::Value,

    /// Keys of resources this one references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ResourceConfig {
    pub fn new(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        provider: Option<String>,
        config: serde_json::Value,
    ) -> Self {
        let mut resource = Self {
            resource_type: resource_type.into(),
            id: id.into(),
            provider,
            config,
            depends_on: Vec::new(),
        };

        let mut depends_on: Vec<String> = Vec::new();
        for reference in resource.references() {
            if !depends_on.contains(&reference.resource) {
                depends_on.push(reference.resource);
            }
        }
        if let Some(provider) = &resource.provider {
            if !depends_on.contains(provider) {
                depends_on.push(provider.clone());
            }
        }
        resource.depends_on = depends_on;
        resource
    }

    /// Get the full resource key (type::id)
    pub fn key(&self) -> String {
        resource_key(&self.resource_type, &self.id)
    }

    pub fn handle(&self) -> ResourceHandle {
        ResourceHandle::new(&self.resource_type, &self.id)
    }

    /// Get a configuration value as a specific type
    pub fn get_config<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// All references contained in the config, in document order
    pub fn references(&self) -> Vec<Reference> {
        let mut found = Vec::new();
        collect_references(&self.config, &mut found);
        found
    }
}

fn collect_references(value: &serde_json::Value, found: &mut Vec<Reference>) {
    if let Some(reference) = Reference::from_value(value) {
        found.push(reference);
        return;
    }
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_references(item, found);
            }
        }
        _ => {}
    }
}

/// Ordered set of declared resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ResourceConfig>", into = "Vec<ResourceConfig>")]
pub struct ResourceGraph {
    resources: Vec<ResourceConfig>,
    index: HashMap<String, usize>,
}

impl TryFrom<Vec<ResourceConfig>> for ResourceGraph {
    type Error = CloudError;

    fn try_from(resources: Vec<ResourceConfig>) -> Result<Self> {
        let mut graph = Self::new();
        for resource in resources {
            graph.add(resource)?;
        }
        Ok(graph)
    }
}

impl From<ResourceGraph> for Vec<ResourceConfig> {
    fn from(graph: ResourceGraph) -> Self {
        graph.resources
    }
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, resource: ResourceConfig) -> Result<()> {
        let key = resource.key();
        if self.index.contains_key(&key) {
            return Err(CloudError::DuplicateResource(key));
        }
        self.index.insert(key, self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    pub fn get(&self, resource_type: &str, id: &str) -> Option<&ResourceConfig> {
        self.get_by_key(&resource_key(resource_type, id))
    }

    pub fn get_by_key(&self, key: &str) -> Option<&ResourceConfig> {
        self.index.get(key).map(|&i| &self.resources[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Resources in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.iter()
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<&ResourceConfig> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Check that every dependency names a declared resource
    pub fn validate(&self) -> Result<()> {
        for resource in &self.resources {
            for target in &resource.depends_on {
                if !self.contains(target) {
                    return Err(CloudError::DanglingReference {
                        resource: resource.key(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Count of resources per type
    pub fn summary(&self) -> GraphSummary {
        let mut counts = BTreeMap::new();
        for resource in &self.resources {
            *counts.entry(resource.resource_type.clone()).or_insert(0) += 1;
        }
        GraphSummary { counts }
    }
}

/// Summary of declared resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    pub counts: BTreeMap<String, usize>,
}

impl GraphSummary {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, resource_type: &str) -> usize {
        self.counts.get(resource_type).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(resource_type, count)| format!("{} {}", count, resource_type))
            .collect();
        write!(f, "{} resources ({})", self.total(), parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bucket() -> ResourceConfig {
        ResourceConfig::new("test:bucket", "site", None, json!({ "acl": "private" }))
    }

    #[test]
    fn test_reference_serialization() {
        let handle = ResourceHandle::new("test:bucket", "site");
        let value: serde_json::Value = handle.output_with("arn", "{}/frontend/*").into();

        assert_eq!(
            value,
            json!({ "$ref": "test:bucket::site", "attribute": "arn", "template": "{}/frontend/*" })
        );
        assert_eq!(
            Reference::from_value(&value),
            Some(handle.output_with("arn", "{}/frontend/*"))
        );
    }

    #[test]
    fn test_reference_apply() {
        let handle = ResourceHandle::new("test:bucket", "site");
        assert_eq!(
            handle
                .output_with("arn", "{}/logs/*")
                .apply("arn:aws:s3:::portal-1"),
            "arn:aws:s3:::portal-1/logs/*"
        );
        assert_eq!(handle.output("id").apply("portal-1"), "portal-1");
    }

    #[test]
    fn test_input_serializes_inline() {
        let handle = ResourceHandle::new("test:zone", "main");
        let deferred: Input<String> = handle.output("zoneId").into();
        let known: Input<String> = "Z123".into();

        let value = serde_json::to_value(vec![deferred, known]).unwrap();
        assert_eq!(
            value,
            json!([{ "$ref": "test:zone::main", "attribute": "zoneId" }, "Z123"])
        );

        let resource = ResourceConfig::new("test:record", "www", None, json!({ "zoneId": value[0].clone() }));
        assert_eq!(resource.depends_on, vec!["test:zone::main"]);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        let resources = json!([
            { "resource_type": "test:object", "id": "x", "config": { "v": 1 } },
            { "resource_type": "test:object", "id": "x", "config": { "v": 2 } }
        ]);

        let err = serde_json::from_value::<ResourceGraph>(resources).unwrap_err();
        assert!(err.to_string().contains("test:object::x"));
    }

    #[test]
    fn test_deserialize_keeps_order_and_index() {
        let resources = json!([
            { "resource_type": "test:bucket", "id": "site", "config": {} },
            { "resource_type": "test:object", "id": "x", "config": { "v": 1 } }
        ]);

        let graph: ResourceGraph = serde_json::from_value(resources).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.iter().next().unwrap().id, "site");
        assert_eq!(graph.get("test:object", "x").unwrap().config["v"], 1);
    }

    #[test]
    fn test_plain_object_is_not_reference() {
        assert!(Reference::from_value(&json!({ "attribute": "arn" })).is_none());
        assert!(Reference::from_value(&json!("arn")).is_none());
    }

    #[test]
    fn test_depends_on_collected_from_nested_references() {
        let site = ResourceHandle::new("test:bucket", "site");
        let oai = ResourceHandle::new("test:oai", "oai");
        let config = json!({
            "bucket": serde_json::Value::from(site.output("id")),
            "statements": [
                { "principal": serde_json::Value::from(oai.output("iamArn")) },
                { "resource": serde_json::Value::from(site.output_with("arn", "{}/*")) },
            ],
        });

        let policy = ResourceConfig::new(
            "test:policy",
            "p",
            Some("test:provider::local".to_string()),
            config,
        );
        assert_eq!(
            policy.depends_on,
            vec![
                "test:bucket::site".to_string(),
                "test:oai::oai".to_string(),
                "test:provider::local".to_string(),
            ]
        );
        assert_eq!(policy.references().len(), 3);
    }

    #[test]
    fn test_graph_rejects_duplicates() {
        let mut graph = ResourceGraph::new();
        graph.add(bucket()).unwrap();

        match graph.add(bucket()) {
            Err(CloudError::DuplicateResource(key)) => assert_eq!(key, "test:bucket::site"),
            other => panic!("Expected DuplicateResource, got {:?}", other),
        }
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_graph_keeps_declaration_order() {
        let mut graph = ResourceGraph::new();
        for id in ["zeta", "alpha", "mid"] {
            graph
                .add(ResourceConfig::new("test:object", id, None, json!({})))
                .unwrap();
        }

        let ids: Vec<&str> = graph.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert!(graph.get("test:object", "alpha").is_some());
        assert_eq!(graph.by_type("test:object").len(), 3);
    }

    #[test]
    fn test_validate_detects_dangling_reference() {
        let missing = ResourceHandle::new("test:bucket", "missing");
        let mut graph = ResourceGraph::new();
        graph
            .add(ResourceConfig::new(
                "test:object",
                "index.html",
                None,
                json!({ "bucket": serde_json::Value::from(missing.output("id")) }),
            ))
            .unwrap();

        match graph.validate() {
            Err(CloudError::DanglingReference { resource, target }) => {
                assert_eq!(resource, "test:object::index.html");
                assert_eq!(target, "test:bucket::missing");
            }
            other => panic!("Expected DanglingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_graph_serialization_rebuilds_index() {
        let mut graph = ResourceGraph::new();
        graph.add(bucket()).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.starts_with('['));

        let restored: ResourceGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
        assert!(restored.contains("test:bucket::site"));
    }

    #[test]
    fn test_summary() {
        let mut graph = ResourceGraph::new();
        graph.add(bucket()).unwrap();
        for id in ["a.html", "b.html"] {
            graph
                .add(ResourceConfig::new("test:object", id, None, json!({})))
                .unwrap();
        }

        let summary = graph.summary();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.count("test:object"), 2);
        assert_eq!(
            summary.to_string(),
            "3 resources (1 test:bucket, 2 test:object)"
        );
    }

    #[test]
    fn test_get_config() {
        let resource = bucket();
        let acl: Option<String> = resource.get_config("acl");
        assert_eq!(acl.as_deref(), Some("private"));
        assert!(resource.get_config::<String>("missing").is_none());
    }
}
