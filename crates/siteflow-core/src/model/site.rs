//! 静的サイトのリソース設定モデル

use serde::{Deserialize, Serialize};

/// 静的サイト設定
///
/// DNSゾーン、証明書、バケット、CDN配信の組み立てに使う値。
/// 未指定の項目はローカル開発向けの既定値になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// ホストゾーン名
    pub hosted_zone: String,

    /// サイトのドメイン名（証明書とCDNエイリアス）
    pub domain: String,

    /// 証明書に追加するドメイン
    pub alternative_names: Vec<String>,

    /// バケット名のプレフィックス
    pub bucket_prefix: String,

    /// アップロードするビルド成果物のディレクトリ
    pub content_dir: String,

    /// バケット内のキープレフィックス（CDNのoriginPathにもなる）
    pub content_prefix: String,

    /// CDNアクセスログのキープレフィックス
    pub log_prefix: String,

    /// CORSで許可するオリジン
    pub cors_origins: Vec<String>,

    /// 配信を許可する国コード（ホワイトリスト）
    pub geo_locations: Vec<String>,

    pub price_class: String,

    /// アップロード対象に含めるパス（正規表現）
    pub include: Option<String>,

    /// アップロード対象から除外するパス（正規表現）
    pub exclude: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        let domain = "dp.localhost.localstack.cloud".to_string();
        Self {
            hosted_zone: "localhost.localstack.cloud".to_string(),
            cors_origins: vec![
                format!("https://{}", domain),
                "http://localhost:4200".to_string(),
            ],
            domain,
            alternative_names: Vec::new(),
            bucket_prefix: "portal-".to_string(),
            content_dir: "frontend".to_string(),
            content_prefix: "/frontend".to_string(),
            log_prefix: "logs/".to_string(),
            geo_locations: ["US", "CA", "GB", "MT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            price_class: "PriceClass_100".to_string(),
            include: None,
            exclude: None,
        }
    }
}

impl SiteSettings {
    /// 証明書の対象ドメイン（メイン + 追加ドメイン）
    pub fn certificate_domains(&self) -> Vec<String> {
        std::iter::once(self.domain.clone())
            .chain(self.alternative_names.iter().cloned())
            .collect()
    }
}
