//! S3 check catalog

use aws_sdk_s3::Client;

use crate::check::{CheckChain, CheckGroup, CheckStep};

/// Build the S3 check group against one bucket/key
pub fn check_group(client: Client, bucket: String, key: String) -> CheckGroup {
    let get_object = CheckStep::new("GetObject", move || {
        let client = client.clone();
        let bucket = bucket.clone();
        let key = key.clone();
        async move {
            client.get_object().bucket(bucket).key(key).send().await?;
            Ok(())
        }
    });

    CheckGroup::new("S3", vec![CheckChain::single("GetObject", get_object)])
}
