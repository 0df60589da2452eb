//! DynamoDB check catalog
//!
//! Exercises the table's write, update, delete, read (eventually and
//! strongly consistent), query, and scan paths, plus a write-then-read
//! chain that observes strong consistency end to end. All operations work
//! on one probe item so the catalog leaves no data behind beyond it.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::check::{CheckChain, CheckGroup, CheckStep};

/// Hash key value of the probe item (the table's key attribute is `id`)
const PROBE_ID: &str = "aws-checker-probe";

fn probe_key() -> AttributeValue {
    AttributeValue::S(PROBE_ID.to_string())
}

fn put_item_step(client: &Client, table: &str) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new("PutItem", move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client
                .put_item()
                .table_name(table)
                .item("id", probe_key())
                .item("value", AttributeValue::S("probe".to_string()))
                .send()
                .await?;
            Ok(())
        }
    })
}

fn update_item_step(client: &Client, table: &str) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new("UpdateItem", move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client
                .update_item()
                .table_name(table)
                .key("id", probe_key())
                .update_expression("SET #v = :v")
                .expression_attribute_names("#v", "value")
                .expression_attribute_values(":v", AttributeValue::S("updated".to_string()))
                .send()
                .await?;
            Ok(())
        }
    })
}

fn delete_item_step(client: &Client, table: &str) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new("DeleteItem", move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client
                .delete_item()
                .table_name(table)
                .key("id", probe_key())
                .send()
                .await?;
            Ok(())
        }
    })
}

fn get_item_step(client: &Client, table: &str, name: &'static str, consistent: bool) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new(name, move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client
                .get_item()
                .table_name(table)
                .key("id", probe_key())
                .consistent_read(consistent)
                .send()
                .await?;
            Ok(())
        }
    })
}

fn query_step(client: &Client, table: &str, name: &'static str, consistent: bool) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new(name, move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client
                .query()
                .table_name(table)
                .key_condition_expression("#id = :id")
                .expression_attribute_names("#id", "id")
                .expression_attribute_values(":id", probe_key())
                .consistent_read(consistent)
                .send()
                .await?;
            Ok(())
        }
    })
}

fn scan_step(client: &Client, table: &str) -> CheckStep {
    let client = client.clone();
    let table = table.to_string();
    CheckStep::new("Scan", move || {
        let client = client.clone();
        let table = table.clone();
        async move {
            client.scan().table_name(table).send().await?;
            Ok(())
        }
    })
}

/// Build the DynamoDB check group against one table
pub fn check_group(client: Client, table: String) -> CheckGroup {
    CheckGroup::new(
        "DynamoDB",
        vec![
            CheckChain::single("PutItem", put_item_step(&client, &table)),
            CheckChain::single("UpdateItem", update_item_step(&client, &table)),
            CheckChain::single("GetItem", get_item_step(&client, &table, "GetItem", false)),
            CheckChain::single(
                "GetItemConsistent",
                get_item_step(&client, &table, "GetItemConsistent", true),
            ),
            CheckChain::single("Query", query_step(&client, &table, "Query", false)),
            CheckChain::single(
                "QueryConsistent",
                query_step(&client, &table, "QueryConsistent", true),
            ),
            CheckChain::single("Scan", scan_step(&client, &table)),
            CheckChain::single("DeleteItem", delete_item_step(&client, &table)),
            // Write-then-strongly-consistent-read, scored as one unit.
            CheckChain::new(
                "PutGetItemConsistent",
                vec![
                    put_item_step(&client, &table),
                    get_item_step(&client, &table, "GetItemConsistent", true),
                ],
            ),
        ],
    )
}
