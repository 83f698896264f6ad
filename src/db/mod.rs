//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//! 연결은 프로세스 전역에서 한 번 생성되어 재사용되며, 별도의 종료 처리는 없습니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect("mongodb://localhost:27017", "guild_store_dev").await?;
//! let users = database.collection("users");
//! ```

use log::info;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, options::ClientOptions};

use crate::config::StoreConfig;
use crate::errors::errors::{StoreError, StoreResult};

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// URI를 파싱해 클라이언트를 만들고 `ping` 명령으로 연결 상태를 검증합니다.
    /// 실패는 모두 [`StoreError::Connection`]으로 반환됩니다.
    ///
    /// ## 사용 예제
    /// ```rust,ignore
    /// let database = Database::connect(&StoreConfig::mongodb_uri(), &StoreConfig::database_name()).await?;
    /// ```
    pub async fn connect(uri: &str, database_name: &str) -> StoreResult<Self> {
        if uri.trim().is_empty() {
            return Err(StoreError::Configuration("MongoDB URI가 비어 있습니다".to_string()));
        }
        if database_name.trim().is_empty() {
            return Err(StoreError::Configuration("데이터베이스 이름이 비어 있습니다".to_string()));
        }

        let mut client_options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        client_options.app_name = Some(StoreConfig::app_name());

        let client = Client::with_options(client_options)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // 연결 테스트
        client
            .database(database_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 스키마 없는 문서 컬렉션 핸들을 반환합니다.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.get_database().collection::<Document>(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_empty_uri() {
        let result = Database::connect("  ", "guild_store_test").await;

        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_database_name() {
        let result = Database::connect("mongodb://localhost:27017", "").await;

        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_connect_reports_unparseable_uri_as_connection_error() {
        let result = Database::connect("not-a-mongodb-uri", "guild_store_test").await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
    }
}
