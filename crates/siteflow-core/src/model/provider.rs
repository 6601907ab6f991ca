//! プロバイダー設定モデル

use serde::{Deserialize, Serialize};

/// LocalStack がエミュレートするサービスのエンドポイント名一覧
pub const EMULATED_SERVICES: &[&str] = &[
    "acm",
    "amplify",
    "apigateway",
    "apigatewayv2",
    "appconfig",
    "applicationautoscaling",
    "appsync",
    "athena",
    "backup",
    "batch",
    "cloudformation",
    "cloudfront",
    "cloudtrail",
    "cloudwatch",
    "cloudwatchlogs",
    "codecommit",
    "cognitoidentity",
    "cognitoidp",
    "docdb",
    "dynamodb",
    "dynamodbstreams",
    "ec2",
    "ecr",
    "ecs",
    "efs",
    "eks",
    "elasticache",
    "elasticbeanstalk",
    "elasticsearchservice",
    "elb",
    "elbv2",
    "emr",
    "eventbridge",
    "firehose",
    "glacier",
    "glue",
    "iam",
    "iot",
    "iotanalytics",
    "kafka",
    "kinesis",
    "kinesisanalytics",
    "kms",
    "lakeformation",
    "lambda",
    "mediastore",
    "neptune",
    "organizations",
    "qldb",
    "rds",
    "rdsdata",
    "redshift",
    "redshiftdata",
    "route53",
    "s3",
    "sagemaker",
    "secretsmanager",
    "ses",
    "sns",
    "sqs",
    "ssm",
    "stepfunctions",
    "sts",
    "timestreamquery",
    "timestreamwrite",
    "transfer",
    "xray",
];

pub const DEFAULT_PROVIDER_NAME: &str = "localstack";
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4566";

/// クラウドプロバイダー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// プロバイダー名（リソース宣言から参照される）
    pub name: String,

    /// リージョン（us-west-2 など）
    pub region: String,

    /// 全サービス共通のエンドポイントURL
    pub endpoint: String,

    pub access_key: String,
    pub secret_key: String,

    /// エンドポイントを割り当てるサービス名
    pub services: Vec<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROVIDER_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            services: EMULATED_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProviderSettings {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
