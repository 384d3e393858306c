use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use todo_domain::{Todo, TodoId};

use super::{StoreError, TodoStore};

/// All records share one partition; the sort key is the todo id.
const PARTITION: &str = "TODO";

/// DynamoDB-backed store.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub async fn new(table_name: &str) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl TodoStore for DynamoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(PARTITION.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        result.items().iter().map(item_to_todo).collect()
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(PARTITION.to_string()))
            .key("SK", AttributeValue::S(id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        result.item().map(item_to_todo).transpose()
    }

    async fn find_by_order(&self, order: i64) -> Result<Option<Todo>, StoreError> {
        // No index on the rank; filter the partition server-side.
        // `order` is a DynamoDB reserved word, hence the name placeholder.
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk")
            .filter_expression("#ord = :ord")
            .expression_attribute_names("#ord", "order")
            .expression_attribute_values(":pk", AttributeValue::S(PARTITION.to_string()))
            .expression_attribute_values(":ord", AttributeValue::N(order.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        result.items().first().map(item_to_todo).transpose()
    }

    async fn max_order(&self) -> Result<Option<i64>, StoreError> {
        let todos = self.list().await?;
        Ok(todos.iter().map(|t| t.order).max())
    }

    async fn put(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut builder = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(PARTITION.to_string()))
            .item("SK", AttributeValue::S(todo.id.as_str().to_string()))
            .item("id", AttributeValue::S(todo.id.as_str().to_string()))
            .item("value", AttributeValue::S(todo.value.clone()))
            .item("order", AttributeValue::N(todo.order.to_string()))
            .item(
                "created_at",
                AttributeValue::S(todo.created_at.to_rfc3339()),
            )
            .item(
                "updated_at",
                AttributeValue::S(todo.updated_at.to_rfc3339()),
            );

        if let Some(done_at) = todo.done_at {
            builder = builder.item("done_at", AttributeValue::S(done_at.to_rfc3339()));
        }

        builder
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(PARTITION.to_string()))
            .key("SK", AttributeValue::S(id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}

fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, StoreError> {
    let done_at = match item.get("done_at").and_then(|v| v.as_s().ok()) {
        Some(raw) => Some(parse_time("done_at", raw)?),
        None => None,
    };

    Ok(Todo {
        id: TodoId::from(str_attr(item, "id")?.to_string()),
        value: str_attr(item, "value")?.to_string(),
        order: item
            .get("order")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| StoreError::Corrupt("missing or non-numeric `order`".to_string()))?,
        done_at,
        created_at: parse_time("created_at", str_attr(item, "created_at")?)?,
        updated_at: parse_time("updated_at", str_attr(item, "updated_at")?)?,
    })
}

fn str_attr<'a>(
    item: &'a HashMap<String, AttributeValue>,
    name: &str,
) -> Result<&'a str, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| StoreError::Corrupt(format!("missing or non-string `{name}`")))
}

fn parse_time(name: &str, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp in `{name}`: {e}")))
}
