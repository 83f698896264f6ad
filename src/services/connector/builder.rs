//! # 커넥터 빌더
//!
//! 생성과 연결을 분리한 2단계 생명주기입니다. 빌더는 연결에 성공한 경우에만
//! [`StoreConnector`]를 반환하고, 실패하면 타입이 있는
//! [`StoreError`](crate::errors::errors::StoreError)를 돌려줍니다.
//! 재시도, 중단, 기능 축소 여부는 호출자가 결정합니다.

use std::sync::Arc;

use log::{error, info};

use crate::config::StoreConfig;
use crate::db::Database;
use crate::domain::models::descriptor::ModelDescriptor;
use crate::errors::errors::StoreResult;
use crate::repositories::mongo_store::MongoStore;
use crate::services::connector::store_connector::StoreConnector;

#[derive(Debug, Clone)]
pub struct StoreConnectorBuilder {
    url: String,
    database_name: String,
    user: Option<ModelDescriptor>,
    guild: Option<ModelDescriptor>,
    guild_member: Option<ModelDescriptor>,
}

impl StoreConnectorBuilder {
    /// 데이터베이스 이름은 `StoreConfig::database_name()`으로 시작합니다.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database_name: StoreConfig::database_name(),
            user: None,
            guild: None,
            guild_member: None,
        }
    }

    /// `MONGODB_URI`, `DATABASE_NAME` 환경 변수로 빌더를 만듭니다.
    pub fn from_env() -> Self {
        Self::new(StoreConfig::mongodb_uri())
    }

    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    pub fn user(mut self, descriptor: ModelDescriptor) -> Self {
        self.user = Some(descriptor);
        self
    }

    pub fn guild(mut self, descriptor: ModelDescriptor) -> Self {
        self.guild = Some(descriptor);
        self
    }

    pub fn guild_member(mut self, descriptor: ModelDescriptor) -> Self {
        self.guild_member = Some(descriptor);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 데이터베이스에 연결하고 설정된 엔티티 종류마다 컬렉션 핸들을 바인딩합니다.
    ///
    /// # Errors
    ///
    /// * `StoreError::Configuration` - URI 또는 데이터베이스 이름이 비어 있음
    /// * `StoreError::Connection` - URI 파싱, 클라이언트 생성 또는 ping 실패
    pub async fn connect(self) -> StoreResult<StoreConnector> {
        info!("📡 데이터베이스 연결 중... ({})", self.database_name);

        let database = Database::connect(&self.url, &self.database_name)
            .await
            .inspect_err(|e| error!("❌ 데이터베이스 연결 실패: {}", e))?;

        Ok(self.bind(database))
    }

    fn bind(self, database: Database) -> StoreConnector {
        let mut connector = StoreConnector::connected(database.clone());

        if let Some(descriptor) = self.user {
            let store = Arc::new(MongoStore::new(database.collection(descriptor.name())));
            connector = connector.with_user_store(descriptor, store);
        }

        if let Some(descriptor) = self.guild {
            let store = Arc::new(MongoStore::new(database.collection(descriptor.name())));
            connector = connector.with_guild_store(descriptor, store);
        }

        if let Some(descriptor) = self.guild_member {
            connector = connector.with_guild_member_model(descriptor);
        }

        connector.log_bindings();
        connector
    }
}

impl Default for StoreConnectorBuilder {
    fn default() -> Self {
        Self::from_env()
    }
}
