//! SQS check catalog

use aws_sdk_sqs::Client;

use crate::check::{CheckChain, CheckGroup, CheckStep};

/// Build the SQS check group against one queue URL
pub fn check_group(client: Client, queue_url: String) -> CheckGroup {
    let receive_message = CheckStep::new("ReceiveMessage", move || {
        let client = client.clone();
        let queue_url = queue_url.clone();
        async move {
            client.receive_message().queue_url(queue_url).send().await?;
            Ok(())
        }
    });

    CheckGroup::new(
        "SQS",
        vec![CheckChain::single("ReceiveMessage", receive_message)],
    )
}
