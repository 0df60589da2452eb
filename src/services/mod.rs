//! Static check catalogs for the monitored services
//!
//! Each service module builds one [`CheckGroup`](crate::check::CheckGroup)
//! from an already-configured client plus its target identifiers. Catalogs
//! are fixed at construction; adding a checked operation means adding a
//! named chain here.

pub mod dynamodb;
pub mod s3;
pub mod sqs;

use crate::check::CheckGroup;
use crate::config::Config;

/// Build the full set of per-service check groups
pub fn check_groups(aws_config: &aws_config::SdkConfig, config: &Config) -> Vec<CheckGroup> {
    vec![
        s3::check_group(
            aws_sdk_s3::Client::new(aws_config),
            config.s3_bucket.clone(),
            config.s3_key.clone(),
        ),
        dynamodb::check_group(
            aws_sdk_dynamodb::Client::new(aws_config),
            config.dynamodb_table.clone(),
        ),
        sqs::check_group(
            aws_sdk_sqs::Client::new(aws_config),
            config.sqs_queue_url.clone(),
        ),
    ]
}
