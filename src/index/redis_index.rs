use crate::domain::document_index::{DocumentIndex, IndexError};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::{ConnectionLike, ConnectionManager};
use std::fmt;
use tracing::{info, instrument};

/// Stores every database as a Redis hash: one field per collection, holding the JSON encoded CID list.
pub struct RedisIndex<C = ConnectionManager> {
    url: String,
    connection: C,
}

impl RedisIndex {
    #[instrument]
    pub async fn connect(url: &str) -> Result<Self, IndexError> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connecting to Redis... OK");

        Ok(RedisIndex::with_connection(url, connection))
    }
}

impl<C> RedisIndex<C> {
    pub fn with_connection(url: &str, connection: C) -> Self {
        RedisIndex {
            url: url.to_string(),
            connection,
        }
    }
}

#[async_trait]
impl<C> DocumentIndex for RedisIndex<C>
where
    C: ConnectionLike + Clone + Send + Sync + 'static,
{
    async fn get(&self, database: &str, collection: &str) -> Result<Option<String>, IndexError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.hget(database, collection).await?;
        Ok(value)
    }

    async fn set(&self, database: &str, collection: &str, value: &str) -> Result<(), IndexError> {
        let mut connection = self.connection.clone();
        let _: () = connection.hset(database, collection, value).await?;
        Ok(())
    }

    async fn collections(&self, database: &str) -> Result<Vec<String>, IndexError> {
        let mut connection = self.connection.clone();
        let collections: Vec<String> = connection.hkeys(database).await?;
        Ok(collections)
    }

    async fn ping(&self) -> Result<(), IndexError> {
        let mut connection = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut connection).await?;
        Ok(())
    }
}

impl<C> fmt::Debug for RedisIndex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisIndex").field("url", &self.url).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use redis::{ErrorKind, RedisError, Value};
    use redis_test::{MockCmd, MockRedisConnection};
    use test_log::test;

    fn index(commands: Vec<MockCmd>) -> RedisIndex<MockRedisConnection> {
        RedisIndex::with_connection("redis://mock", MockRedisConnection::new(commands))
    }

    #[test(tokio::test)]
    async fn get_returns_none_for_a_missing_field() -> Result<(), IndexError> {
        let index = index(vec![MockCmd::new(
            redis::cmd("HGET").arg("readings").arg("sensor-1"),
            Ok(Value::Nil),
        )]);

        let value = index.get("readings", "sensor-1").await?;

        assert_eq!(value, None);
        Ok(())
    }

    #[test(tokio::test)]
    async fn get_returns_the_stored_cid_list() -> Result<(), IndexError> {
        let index = index(vec![MockCmd::new(
            redis::cmd("HGET").arg("readings").arg("sensor-1"),
            Ok(r#"["cid-1","cid-2"]"#),
        )]);

        let value = index.get("readings", "sensor-1").await?;

        assert_eq!(value.as_deref(), Some(r#"["cid-1","cid-2"]"#));
        Ok(())
    }

    #[test(tokio::test)]
    async fn set_writes_the_hash_field() -> Result<(), IndexError> {
        let index = index(vec![MockCmd::new(
            redis::cmd("HSET").arg("readings").arg("sensor-1").arg(r#"["cid-1"]"#),
            Ok(Value::Int(1)),
        )]);

        index.set("readings", "sensor-1", r#"["cid-1"]"#).await
    }

    #[test(tokio::test)]
    async fn collections_lists_the_hash_fields() -> Result<(), IndexError> {
        let index = index(vec![MockCmd::new(
            redis::cmd("HKEYS").arg("readings"),
            Ok(Value::Array(vec![
                Value::BulkString(b"sensor-1".to_vec()),
                Value::BulkString(b"sensor-2".to_vec()),
            ])),
        )]);

        let collections = index.collections("readings").await?;

        assert_eq!(collections, vec!["sensor-1", "sensor-2"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn ping_succeeds_when_redis_answers() -> Result<(), IndexError> {
        let index = index(vec![MockCmd::new(redis::cmd("PING"), Ok(Value::SimpleString("PONG".to_string())))]);

        index.ping().await
    }

    #[test(tokio::test)]
    async fn errors_from_redis_are_propagated() {
        let index = index(vec![MockCmd::new(
            redis::cmd("HKEYS").arg("readings"),
            Err::<Value, _>(RedisError::from((ErrorKind::ResponseError, "LOADING Redis is loading the dataset in memory"))),
        )]);

        let result = index.collections("readings").await;

        assert!(matches!(result, Err(IndexError::Redis(_))));
    }
}
