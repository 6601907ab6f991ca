//! site ノードのパース

use super::{first_string, string_args};
use crate::error::{Result, SiteError};
use crate::files::compile_pattern;
use crate::model::SiteSettings;
use kdl::KdlNode;
use tracing::debug;

/// site ノードをパース
///
/// 指定されなかった項目は既定値のまま残る。
pub fn parse_site(node: &KdlNode) -> Result<SiteSettings> {
    let mut site = SiteSettings::default();
    let mut cors_specified = false;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            let name = child.name().value();
            match name {
                "hosted_zone" | "hosted-zone" => set_string(child, &mut site.hosted_zone),
                "domain" => set_string(child, &mut site.domain),
                "alternative_names" | "alternative-names" => {
                    site.alternative_names = string_args(child);
                }
                "bucket_prefix" | "bucket-prefix" => set_string(child, &mut site.bucket_prefix),
                "content_dir" | "content-dir" => set_string(child, &mut site.content_dir),
                "content_prefix" | "content-prefix" => set_string(child, &mut site.content_prefix),
                "log_prefix" | "log-prefix" => set_string(child, &mut site.log_prefix),
                "cors_origins" | "cors-origins" => {
                    site.cors_origins = string_args(child);
                    cors_specified = true;
                }
                "geo_locations" | "geo-locations" => site.geo_locations = string_args(child),
                "price_class" | "price-class" => set_string(child, &mut site.price_class),
                "include" | "exclude" => {
                    let pattern = first_string(child).ok_or_else(|| {
                        SiteError::InvalidConfig(format!("site {} requires a pattern", name))
                    })?;
                    // 読み込み時点で正規表現を検証しておく
                    compile_pattern(&pattern)?;
                    if name == "include" {
                        site.include = Some(pattern);
                    } else {
                        site.exclude = Some(pattern);
                    }
                }
                other => {
                    debug!(node = other, "Skipping unknown site node");
                }
            }
        }
    }

    // CORS未指定ならドメインに合わせて既定オリジンを組み立て直す
    if !cors_specified {
        site.cors_origins = vec![
            format!("https://{}", site.domain),
            "http://localhost:4200".to_string(),
        ];
    }

    if site.domain.is_empty() {
        return Err(SiteError::InvalidConfig("site domain is empty".to_string()));
    }

    Ok(site)
}

fn set_string(node: &KdlNode, target: &mut String) {
    if let Some(value) = first_string(node) {
        *target = value;
    }
}
