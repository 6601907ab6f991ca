//! Static site stack
//!
//! Declares the full graph for a static site served from a private bucket through
//! CloudFront: DNS zone, DNS-validated certificate, bucket, uploads, origin access
//! identity, bucket policy, distribution and the alias record.

use crate::error::{AwsError, Result};
use crate::provider::{AwsProvider, aws_context};
use crate::resources::*;
use crate::sync::folder_to_s3_with;
use siteflow_cloud::{ResourceHandle, Stack};
use siteflow_core::Project;
use siteflow_core::path::{
    ensure_leading_slash, normalize_path, normalize_s3_prefix, strip_trailing_slash,
};
use tracing::{info, instrument};

const S3_ORIGIN_ID: &str = "s3Origin";
const LOG_DELIVERY_SERVICE: &str = "delivery.logs.amazonaws.com";

/// Handles to the declared site resources
#[derive(Debug)]
pub struct SiteOutputs {
    /// Stack holding every declaration
    pub stack: Stack,

    pub provider: ResourceHandle,
    pub zone: ResourceHandle,
    pub certificate: ResourceHandle,
    pub validation_records: Vec<ResourceHandle>,
    pub certificate_validation: ResourceHandle,
    pub bucket: ResourceHandle,
    pub public_access_block: ResourceHandle,
    /// One per content file, in sorted order
    pub objects: Vec<ResourceHandle>,
    pub origin_access_identity: ResourceHandle,
    pub bucket_policy: ResourceHandle,
    pub distribution: ResourceHandle,
    pub alias_record: ResourceHandle,
}

/// Declare the whole site for `project` under `stack_name`
#[instrument(skip(project), fields(project = %project.name))]
pub fn declare_site(project: &Project, stack_name: &str) -> Result<SiteOutputs> {
    let site = &project.site;
    let domains = site.certificate_domains();
    for (i, domain) in domains.iter().enumerate() {
        if domains[..i].contains(domain) {
            return Err(AwsError::InvalidConfig(format!(
                "Duplicate certificate domain: {}",
                domain
            )));
        }
    }

    let mut stack = Stack::new(aws_context(
        &project.name,
        stack_name,
        &project.provider.name,
    ));

    let provider_args = AwsProvider::from_settings(&project.provider);
    let provider = stack.declare_provider(serde_json::to_value(&provider_args)?)?;

    let zone = stack.declare_resource(
        "route53LocalZone",
        &Zone {
            name: site.hosted_zone.clone(),
            force_destroy: true,
        },
    )?;

    let certificate = stack.declare_resource(
        "siteCert",
        &Certificate {
            domain_name: site.domain.clone(),
            validation_method: "DNS".to_string(),
            subject_alternative_names: site.alternative_names.clone(),
        },
    )?;

    // one validation record per certificate domain; ACM lists the validation
    // options as domain_name first, then subject_alternative_names in order
    let mut validation_records = Vec::with_capacity(domains.len());
    for (i, domain) in domains.iter().enumerate() {
        let option = |attr: &str| {
            certificate.output(format!("domainValidationOptions[{}].{}", i, attr))
        };
        let record = Record {
            zone_id: zone.output("zoneId").into(),
            name: option("resourceRecordName").into(),
            record_type: option("resourceRecordType").into(),
            ttl: Some(60),
            records: vec![option("resourceRecordValue").into()],
            allow_overwrite: Some(true),
            aliases: Vec::new(),
        };
        validation_records.push(stack.declare_resource(&format!("dvRecord-{}", domain), &record)?);
    }

    let certificate_validation = stack.declare_resource(
        "certificateValidation",
        &CertificateValidation {
            certificate_arn: certificate.output("arn").into(),
            validation_record_fqdns: validation_records
                .iter()
                .map(|record| record.output("fqdn").into())
                .collect(),
        },
    )?;

    let bucket = stack.declare_resource(
        "frontend-bucket",
        &Bucket {
            bucket_prefix: site.bucket_prefix.clone(),
            force_destroy: true,
            versioning: Versioning { enabled: false },
            acl: "private".to_string(),
            cors_rules: vec![CorsRule::signed_upload(&site.cors_origins)],
        },
    )?;

    let public_access_block = stack.declare_resource(
        "siteBucketPublicAccessBlock",
        &BucketPublicAccessBlock::all(bucket.output("id")),
    )?;

    let content_dir = normalize_path(&project.content_dir().to_string_lossy());
    let options = siteflow_core::upload_options(project)?;
    let objects = folder_to_s3_with(
        &mut stack,
        &content_dir,
        &bucket,
        &site.content_prefix,
        &options,
    )?;

    let origin_access_identity = stack.declare_resource("oai", &OriginAccessIdentity::default())?;

    // origin path "/frontend", or "" for the bucket root; log prefix "logs/"
    let origin_path = origin_path(&site.content_prefix);
    let log_prefix = normalize_s3_prefix(&site.log_prefix);

    let bucket_policy = stack.declare_resource(
        "s3AllowCfPolicy",
        &BucketPolicy {
            bucket: bucket.output("id").into(),
            policy: PolicyDocument::new(vec![
                PolicyStatement::allow(
                    "s3:GetObject",
                    bucket.output_with("arn", format!("{{}}{}/*", origin_path)),
                    Principal::aws(origin_access_identity.output("iamArn")),
                ),
                PolicyStatement::allow(
                    "s3:PutObject",
                    bucket.output_with("arn", format!("{{}}/{}*", log_prefix)),
                    Principal::service(LOG_DELIVERY_SERVICE),
                ),
            ]),
        },
    )?;

    let distribution = stack.declare_resource(
        "cfDistribution",
        &Distribution {
            origins: vec![DistributionOrigin {
                domain_name: bucket.output("bucketRegionalDomainName").into(),
                origin_id: S3_ORIGIN_ID.to_string(),
                origin_path,
                custom_headers: Vec::new(),
                s3_origin_config: S3OriginConfig {
                    origin_access_identity: origin_access_identity
                        .output("cloudfrontAccessIdentityPath")
                        .into(),
                },
                origin_shield: OriginShield {
                    enabled: true,
                    origin_shield_region: project.provider.region.clone(),
                },
            }],
            enabled: true,
            is_ipv6_enabled: true,
            comment: project.name.clone(),
            default_root_object: "index.html".to_string(),
            logging_config: LoggingConfig {
                include_cookies: false,
                bucket: bucket.output("bucketRegionalDomainName").into(),
                prefix: log_prefix,
            },
            aliases: domains.clone(),
            default_cache_behavior: CacheBehavior {
                allowed_methods: strings(&["GET", "HEAD", "OPTIONS"]),
                cached_methods: strings(&["GET", "HEAD"]),
                target_origin_id: S3_ORIGIN_ID.to_string(),
                forwarded_values: ForwardedValues {
                    query_string: false,
                    cookies: CookiesForward {
                        forward: "none".to_string(),
                    },
                    headers: Vec::new(),
                },
                compress: true,
                viewer_protocol_policy: "redirect-to-https".to_string(),
                min_ttl: 1,
                default_ttl: 86400,
                max_ttl: 31536000,
            },
            ordered_cache_behaviors: Vec::new(),
            price_class: site.price_class.clone(),
            restrictions: Restrictions {
                geo_restriction: GeoRestriction {
                    restriction_type: "whitelist".to_string(),
                    locations: site.geo_locations.clone(),
                },
            },
            viewer_certificate: ViewerCertificate {
                acm_certificate_arn: certificate.output("arn").into(),
                minimum_protocol_version: "TLSv1.2_2021".to_string(),
                ssl_support_method: "sni-only".to_string(),
            },
            custom_error_responses: vec![
                CustomErrorResponse::spa_fallback(403, "/index.html"),
                CustomErrorResponse::spa_fallback(404, "/index.html"),
            ],
        },
    )?;

    let alias_record = stack.declare_resource(
        "cfHostRecord",
        &Record::cloudfront_alias(
            zone.output("zoneId"),
            site.domain.as_str(),
            distribution.output("domainName"),
        ),
    )?;

    info!(
        stack = %stack.context().stack,
        resources = stack.graph().len(),
        files = objects.len(),
        "Site declared"
    );

    Ok(SiteOutputs {
        stack,
        provider,
        zone,
        certificate,
        validation_records,
        certificate_validation,
        bucket,
        public_access_block,
        objects,
        origin_access_identity,
        bucket_policy,
        distribution,
        alias_record,
    })
}

/// CloudFront origin path for a content prefix (leading `/`, no trailing `/`)
fn origin_path(content_prefix: &str) -> String {
    let prefix = strip_trailing_slash(&normalize_s3_prefix(content_prefix));
    if prefix.is_empty() {
        String::new()
    } else {
        ensure_leading_slash(&prefix)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
