//! Typed AWS resource arguments
//!
//! Each struct serializes to the camelCase argument object the provisioning engine
//! expects for its resource type. Values known only after apply are [`Input::Ref`].

use serde::{Deserialize, Serialize};
use siteflow_cloud::{Input, ResourceArgs};

/// Hosted zone id of every CloudFront distribution, used for alias records
pub const CLOUDFRONT_ZONE_ID: &str = "Z2FDTNDATAQYW2";

// ---- Route 53 ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: String,
    pub force_destroy: bool,
}

impl ResourceArgs for Zone {
    const TYPE: &'static str = "aws:route53/zone:Zone";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub zone_id: Input<String>,
    pub name: Input<String>,
    #[serde(rename = "type")]
    pub record_type: Input<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Input<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_overwrite: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<RecordAlias>,
}

impl Record {
    /// `A` record aliasing a CloudFront distribution's domain name
    pub fn cloudfront_alias(
        zone_id: impl Into<Input<String>>,
        name: impl Into<Input<String>>,
        distribution_domain: impl Into<Input<String>>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            record_type: "A".into(),
            ttl: None,
            records: Vec::new(),
            allow_overwrite: None,
            aliases: vec![RecordAlias {
                evaluate_target_health: false,
                zone_id: CLOUDFRONT_ZONE_ID.to_string(),
                name: distribution_domain.into(),
            }],
        }
    }
}

impl ResourceArgs for Record {
    const TYPE: &'static str = "aws:route53/record:Record";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAlias {
    pub evaluate_target_health: bool,
    pub zone_id: String,
    pub name: Input<String>,
}

// ---- ACM ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub domain_name: String,
    pub validation_method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_alternative_names: Vec<String>,
}

impl ResourceArgs for Certificate {
    const TYPE: &'static str = "aws:acm/certificate:Certificate";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateValidation {
    pub certificate_arn: Input<String>,
    pub validation_record_fqdns: Vec<Input<String>>,
}

impl ResourceArgs for CertificateValidation {
    const TYPE: &'static str = "aws:acm/certificateValidation:CertificateValidation";
}

// ---- S3 ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub bucket_prefix: String,
    pub force_destroy: bool,
    pub versioning: Versioning,
    pub acl: String,
    pub cors_rules: Vec<CorsRule>,
}

impl ResourceArgs for Bucket {
    const TYPE: &'static str = "aws:s3/bucket:Bucket";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioning {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsRule {
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age_seconds: u32,
}

impl CorsRule {
    /// Browser uploads through signed URLs from `origins`
    pub fn signed_upload(origins: &[String]) -> Self {
        Self {
            allowed_headers: vec!["*".to_string()],
            allowed_methods: vec!["PUT".to_string(), "POST".to_string()],
            allowed_origins: origins.to_vec(),
            expose_headers: vec!["ETag".to_string()],
            max_age_seconds: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketPublicAccessBlock {
    pub bucket: Input<String>,
    pub block_public_acls: bool,
    pub block_public_policy: bool,
    pub ignore_public_acls: bool,
    pub restrict_public_buckets: bool,
}

impl BucketPublicAccessBlock {
    /// Block every form of public access
    pub fn all(bucket: impl Into<Input<String>>) -> Self {
        Self {
            bucket: bucket.into(),
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }
}

impl ResourceArgs for BucketPublicAccessBlock {
    const TYPE: &'static str = "aws:s3/bucketPublicAccessBlock:BucketPublicAccessBlock";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketPolicy {
    pub bucket: Input<String>,
    pub policy: PolicyDocument,
}

impl ResourceArgs for BucketPolicy {
    const TYPE: &'static str = "aws:s3/bucketPolicy:BucketPolicy";
}

/// IAM policy document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: "2012-10-17".to_string(),
            statement,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: String,
    pub resource: Input<String>,
    pub principal: Principal,
}

impl PolicyStatement {
    pub fn allow(
        action: impl Into<String>,
        resource: impl Into<Input<String>>,
        principal: Principal,
    ) -> Self {
        Self {
            action: action.into(),
            effect: "Allow".to_string(),
            resource: resource.into(),
            principal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    #[serde(rename = "AWS", default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<Input<String>>,
    #[serde(rename = "Service", default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Principal {
    pub fn aws(arn: impl Into<Input<String>>) -> Self {
        Self {
            aws: Some(arn.into()),
            service: None,
        }
    }

    pub fn service(name: impl Into<String>) -> Self {
        Self {
            aws: None,
            service: Some(name.into()),
        }
    }
}

/// Local file whose bytes the engine reads at apply time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "asset", rename = "file")]
pub struct FileAsset {
    pub path: String,
}

impl FileAsset {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketObject {
    pub bucket: Input<String>,
    pub key: String,
    pub source: FileAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ResourceArgs for BucketObject {
    const TYPE: &'static str = "aws:s3/bucketObject:BucketObject";
}

// ---- CloudFront ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginAccessIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ResourceArgs for OriginAccessIdentity {
    const TYPE: &'static str = "aws:cloudfront/originAccessIdentity:OriginAccessIdentity";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub origins: Vec<DistributionOrigin>,
    pub enabled: bool,
    pub is_ipv6_enabled: bool,
    pub comment: String,
    pub default_root_object: String,
    pub logging_config: LoggingConfig,
    pub aliases: Vec<String>,
    pub default_cache_behavior: CacheBehavior,
    pub ordered_cache_behaviors: Vec<CacheBehavior>,
    pub price_class: String,
    pub restrictions: Restrictions,
    pub viewer_certificate: ViewerCertificate,
    pub custom_error_responses: Vec<CustomErrorResponse>,
}

impl ResourceArgs for Distribution {
    const TYPE: &'static str = "aws:cloudfront/distribution:Distribution";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionOrigin {
    pub domain_name: Input<String>,
    pub origin_id: String,
    pub origin_path: String,
    pub custom_headers: Vec<OriginCustomHeader>,
    pub s3_origin_config: S3OriginConfig,
    pub origin_shield: OriginShield,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginCustomHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3OriginConfig {
    pub origin_access_identity: Input<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginShield {
    pub enabled: bool,
    pub origin_shield_region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub include_cookies: bool,
    pub bucket: Input<String>,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheBehavior {
    pub allowed_methods: Vec<String>,
    pub cached_methods: Vec<String>,
    pub target_origin_id: String,
    pub forwarded_values: ForwardedValues,
    pub compress: bool,
    pub viewer_protocol_policy: String,
    pub min_ttl: u64,
    pub default_ttl: u64,
    pub max_ttl: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedValues {
    pub query_string: bool,
    pub cookies: CookiesForward,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookiesForward {
    pub forward: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    pub geo_restriction: GeoRestriction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRestriction {
    pub restriction_type: String,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerCertificate {
    pub acm_certificate_arn: Input<String>,
    pub minimum_protocol_version: String,
    pub ssl_support_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomErrorResponse {
    pub error_code: u16,
    pub error_caching_min_ttl: u64,
    pub response_code: u16,
    pub response_page_path: String,
}

impl CustomErrorResponse {
    /// Serve `page` with 200 for `error_code`, so client-side routes resolve
    pub fn spa_fallback(error_code: u16, page: &str) -> Self {
        Self {
            error_code,
            error_caching_min_ttl: 10,
            response_code: 200,
            response_page_path: page.to_string(),
        }
    }
}
