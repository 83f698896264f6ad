//! # 저장소 커넥터
//!
//! 세 가지 논리 컬렉션(사용자, 길드, 길드 멤버)에 대한 모든 읽기/쓰기를 중개합니다.
//! "조회 후 없으면 생성"과 "템플릿 병합 후 저장"을 안정된 메서드 이름 뒤에 숨깁니다.
//!
//! ## 조회 또는 생성 (get-or-create)
//!
//! ```text
//! find ──hit──────────────────────────────▶ Found
//!  │
//!  miss
//!  ▼
//! create {_id} ──ok───────────────────────▶ Found
//!  │
//!  err (동시 생성자와의 중복 키 충돌 등)
//!  ▼
//! find ──hit──▶ Found / miss ─────────────▶ NotFound
//! ```
//!
//! 잠금은 없습니다. 같은 id에 대한 동시 조회는 경쟁할 수 있으며, 충돌에서 진 쪽이
//! 한 번만 재조회합니다.
//!
//! ## 템플릿 병합 업데이트
//!
//! 업데이트는 새 데이터를 쓰는 연산이 아니라, 디스크립터의 빈 템플릿 위에 저장된
//! 문서를 딥 머지해 스키마에 추가된 필드를 기본값으로 채워 넣는 정규화 연산입니다.

use std::sync::Arc;

use log::{debug, info, warn};
use mongodb::bson::Document;

use crate::db::Database;
use crate::domain::entities::{EntityKind, bare_document, id_filter};
use crate::domain::models::descriptor::ModelDescriptor;
use crate::domain::models::lookup::Lookup;
use crate::errors::errors::StoreResult;
use crate::repositories::document_store::DocumentStore;
use crate::services::connector::builder::StoreConnectorBuilder;
use crate::utils::merge::merged;

/// 디스크립터와 컬렉션 핸들의 묶음
#[derive(Clone)]
pub(crate) struct BoundStore {
    pub(crate) descriptor: ModelDescriptor,
    pub(crate) store: Arc<dyn DocumentStore>,
}

/// 조회 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LookupBy {
    /// `find_by_id`
    PrimaryKey,
    /// `find_one({_id})`
    Filter,
}

/// 사용자/길드/길드 멤버 저장소 커넥터
///
/// 디스크립터가 없는 엔티티 종류는 비활성화되어, 해당 종류를 참조하는 모든 연산이
/// 저장소 호출 없이 [`Lookup::NotConfigured`]를 반환합니다.
///
/// 길드 멤버는 길드 문서에 내장되므로 독자적인 컬렉션 핸들 없이 템플릿만 가집니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use guild_store::services::connector::StoreConnector;
/// use guild_store::domain::models::ModelDescriptor;
///
/// let connector = StoreConnector::builder("mongodb://localhost:27017")
///     .database("guild_store_dev")
///     .user(ModelDescriptor::from_default::<UserSchema>("users")?)
///     .guild(ModelDescriptor::schemaless("guilds"))
///     .guild_member(ModelDescriptor::from_default::<MemberSchema>("guild_members")?)
///     .connect()
///     .await?;
///
/// let user = connector.get_user("u1").await?;
/// let member = connector.get_guild_member("m1", "g1").await?;
/// ```
#[derive(Clone, Default)]
pub struct StoreConnector {
    database: Option<Database>,
    pub(crate) users: Option<BoundStore>,
    pub(crate) guilds: Option<BoundStore>,
    pub(crate) guild_members: Option<ModelDescriptor>,
}

impl StoreConnector {
    pub fn builder(url: impl Into<String>) -> StoreConnectorBuilder {
        StoreConnectorBuilder::new(url)
    }

    /// 모든 엔티티 종류가 비활성화된 커넥터
    ///
    /// `with_*` 메서드로 임의의 [`DocumentStore`]를 연결할 수 있습니다.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use guild_store::domain::models::ModelDescriptor;
    /// use guild_store::repositories::MemoryStore;
    /// use guild_store::services::connector::StoreConnector;
    ///
    /// let connector = StoreConnector::unbound()
    ///     .with_user_store(ModelDescriptor::schemaless("users"), Arc::new(MemoryStore::new("users")));
    /// ```
    pub fn unbound() -> Self {
        Self::default()
    }

    pub(crate) fn connected(database: Database) -> Self {
        Self {
            database: Some(database),
            ..Self::default()
        }
    }

    pub fn with_user_store(mut self, descriptor: ModelDescriptor, store: Arc<dyn DocumentStore>) -> Self {
        self.users = Some(BoundStore { descriptor, store });
        self
    }

    /// 길드 디스크립터에는 빈 `members` 배열이 보장됩니다.
    pub fn with_guild_store(mut self, descriptor: ModelDescriptor, store: Arc<dyn DocumentStore>) -> Self {
        self.guilds = Some(BoundStore {
            descriptor: descriptor.with_members(),
            store,
        });
        self
    }

    pub fn with_guild_member_model(mut self, descriptor: ModelDescriptor) -> Self {
        self.guild_members = Some(descriptor);
        self
    }

    /// 연결된 데이터베이스 (저장소를 직접 연결한 경우 `None`)
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    pub fn is_configured(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::User => self.users.is_some(),
            EntityKind::Guild => self.guilds.is_some(),
            EntityKind::GuildMember => self.guild_members.is_some(),
        }
    }

    pub(crate) fn log_bindings(&self) {
        for kind in [EntityKind::User, EntityKind::Guild, EntityKind::GuildMember] {
            if self.is_configured(kind) {
                info!("📦 {} 모델 바인딩됨", kind);
            } else {
                info!("⏸️ {} 모델 비활성화 (디스크립터 없음)", kind);
            }
        }
    }

    /// 사용자를 조회하고, 없으면 `_id`만 가진 문서를 생성합니다.
    pub async fn get_user(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.users {
            Some(users) => Self::get_or_create(EntityKind::User, users, id, LookupBy::PrimaryKey).await,
            None => Ok(Lookup::NotConfigured),
        }
    }

    /// 길드를 조회하고, 없으면 `_id`만 가진 문서를 생성합니다.
    pub async fn get_guild(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.guilds {
            Some(guilds) => Self::get_or_create(EntityKind::Guild, guilds, id, LookupBy::PrimaryKey).await,
            None => Ok(Lookup::NotConfigured),
        }
    }

    /// `{_id: id}` 사용자 문서를 삽입합니다. 실패는 그대로 전파됩니다.
    pub async fn create_user(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.users {
            Some(users) => Ok(Lookup::Found(users.store.create(bare_document(id)).await?)),
            None => Ok(Lookup::NotConfigured),
        }
    }

    pub async fn create_guild(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.guilds {
            Some(guilds) => Ok(Lookup::Found(guilds.store.create(bare_document(id)).await?)),
            None => Ok(Lookup::NotConfigured),
        }
    }

    /// 저장된 사용자 문서를 빈 템플릿 위에 병합해 다시 저장합니다.
    ///
    /// 갱신 후 문서를 반환합니다.
    ///
    /// ```text
    /// template {_id: null, nickname: null, joinedAt: null}
    ///  +stored {_id: "u1", nickname: "x"}
    ///  =       {_id: "u1", nickname: "x", joinedAt: null}
    /// ```
    pub async fn update_user(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.users {
            Some(users) => Self::merge_update(EntityKind::User, users, id).await,
            None => Ok(Lookup::NotConfigured),
        }
    }

    pub async fn update_guild(&self, id: &str) -> StoreResult<Lookup<Document>> {
        match &self.guilds {
            Some(guilds) => Self::merge_update(EntityKind::Guild, guilds, id).await,
            None => Ok(Lookup::NotConfigured),
        }
    }

    pub(crate) async fn find(bound: &BoundStore, id: &str, by: LookupBy) -> StoreResult<Option<Document>> {
        match by {
            LookupBy::PrimaryKey => bound.store.find_by_id(id).await,
            LookupBy::Filter => bound.store.find_one(id_filter(id)).await,
        }
    }

    /// 조회 → 생성 → (생성 실패 시) 재조회 1회
    pub(crate) async fn get_or_create(
        kind: EntityKind,
        bound: &BoundStore,
        id: &str,
        by: LookupBy,
    ) -> StoreResult<Lookup<Document>> {
        if let Some(found) = Self::find(bound, id, by).await? {
            return Ok(Lookup::Found(found));
        }

        match bound.store.create(bare_document(id)).await {
            Ok(created) => {
                debug!("{} {} 생성됨 ({})", kind, id, bound.store.name());
                Ok(Lookup::Found(created))
            }
            Err(e) => {
                warn!("{} {} 생성 실패, 재조회합니다: {}", kind, id, e);
                Ok(Self::find(bound, id, by).await?.into())
            }
        }
    }

    async fn merge_update(kind: EntityKind, bound: &BoundStore, id: &str) -> StoreResult<Lookup<Document>> {
        let stored = match Self::get_or_create(kind, bound, id, LookupBy::Filter).await? {
            Lookup::Found(stored) => stored,
            other => return Ok(other),
        };

        let updated = bound
            .store
            .find_one_and_update(id_filter(id), merged(bound.descriptor.template(), &stored))
            .await?;

        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_store::MemoryStore;
    use mongodb::bson::{Bson, doc};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn user_descriptor() -> ModelDescriptor {
        ModelDescriptor::new("users", doc! { "nickname": Bson::Null, "joinedAt": Bson::Null })
    }

    fn user_connector(store: &Arc<MemoryStore>) -> StoreConnector {
        StoreConnector::unbound().with_user_store(user_descriptor(), store.clone())
    }

    #[tokio::test]
    async fn test_unconfigured_kinds_are_not_configured() {
        init_logging();
        let connector = StoreConnector::unbound();

        assert_eq!(connector.get_user("u1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(connector.create_user("u1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(connector.update_user("u1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(connector.get_guild("g1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(connector.create_guild("g1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(connector.update_guild("g1").await.unwrap(), Lookup::NotConfigured);
        assert!(!connector.is_configured(EntityKind::User));
    }

    #[tokio::test]
    async fn test_only_user_configured_guild_makes_no_calls() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        let connector = user_connector(&users);

        assert_eq!(connector.get_guild("g1").await.unwrap(), Lookup::NotConfigured);
        assert_eq!(users.calls().total(), 0);
        assert!(connector.is_configured(EntityKind::User));
        assert!(!connector.is_configured(EntityKind::Guild));
    }

    #[tokio::test]
    async fn test_first_get_creates_exactly_once() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        let connector = user_connector(&users);

        let user = connector.get_user("u1").await.unwrap();

        assert_eq!(user, Lookup::Found(doc! { "_id": "u1" }));
        assert_eq!(users.calls().create, 1);
        assert_eq!(users.calls().find_by_id, 1);
    }

    #[tokio::test]
    async fn test_existing_user_is_not_recreated() {
        init_logging();
        let users = Arc::new(MemoryStore::with_documents(
            "users",
            vec![doc! { "_id": "u1", "nickname": "x" }],
        ));
        let connector = user_connector(&users);

        let user = connector.get_user("u1").await.unwrap();

        assert_eq!(user, Lookup::Found(doc! { "_id": "u1", "nickname": "x" }));
        assert_eq!(users.calls().create, 0);
    }

    #[tokio::test]
    async fn test_create_failure_falls_back_to_not_found() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        users.fail_next_creates(1);
        let connector = user_connector(&users);

        let user = connector.get_user("u1").await.unwrap();

        assert_eq!(user, Lookup::NotFound);
        assert_eq!(users.calls().find_by_id, 2);
        assert_eq!(users.calls().create, 1);
    }

    #[tokio::test]
    async fn test_concurrent_gets_resolve_conflict_by_reread() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        let connector = user_connector(&users);

        let (first, second) = tokio::join!(connector.get_user("u2"), connector.get_user("u2"));

        assert_eq!(first.unwrap(), Lookup::Found(doc! { "_id": "u2" }));
        assert_eq!(second.unwrap(), Lookup::Found(doc! { "_id": "u2" }));
        assert_eq!(users.calls().create, 2);
        assert_eq!(users.calls().find_by_id, 3);
        assert_eq!(users.documents().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_user_propagates_conflict() {
        init_logging();
        let users = Arc::new(MemoryStore::with_documents("users", vec![doc! { "_id": "u1" }]));
        let connector = user_connector(&users);

        let error = connector.create_user("u1").await.unwrap_err();

        assert!(error.is_conflict());
    }

    #[tokio::test]
    async fn test_update_user_merges_onto_template() {
        init_logging();
        let users = Arc::new(MemoryStore::with_documents(
            "users",
            vec![doc! { "_id": "u1", "nickname": "x" }],
        ));
        let connector = user_connector(&users);

        let updated = connector.update_user("u1").await.unwrap();

        assert_eq!(
            updated,
            Lookup::Found(doc! { "_id": "u1", "nickname": "x", "joinedAt": Bson::Null })
        );
        assert_eq!(users.calls().find_one, 1);
        assert_eq!(users.calls().find_by_id, 0);

        let log = users.update_log().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, doc! { "_id": "u1" });
    }

    #[tokio::test]
    async fn test_update_user_creates_missing_document() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        let connector = user_connector(&users);

        let updated = connector.update_user("u3").await.unwrap();

        assert_eq!(
            updated,
            Lookup::Found(doc! { "_id": "u3", "nickname": Bson::Null, "joinedAt": Bson::Null })
        );
        assert_eq!(users.calls().create, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_nested_stored_values() {
        init_logging();
        let guilds = Arc::new(MemoryStore::with_documents(
            "guilds",
            vec![doc! { "_id": "g1", "settings": { "prefix": "?" }, "tags": ["a"] }],
        ));
        let descriptor = ModelDescriptor::new(
            "guilds",
            doc! { "settings": { "prefix": "!", "locale": "en" }, "tags": [] },
        );
        let connector = StoreConnector::unbound().with_guild_store(descriptor, guilds.clone());

        let updated = connector.update_guild("g1").await.unwrap();

        assert_eq!(
            updated,
            Lookup::Found(doc! {
                "_id": "g1",
                "settings": { "prefix": "?", "locale": "en" },
                "tags": ["a"],
                "members": []
            })
        );
    }

    #[tokio::test]
    async fn test_update_propagates_store_errors() {
        init_logging();
        let users = Arc::new(MemoryStore::with_documents("users", vec![doc! { "_id": "u1" }]));
        users.fail_next_updates(1);
        let connector = user_connector(&users);

        assert!(connector.update_user("u1").await.is_err());
    }

    #[tokio::test]
    async fn test_update_user_create_failure_falls_back_to_not_found() {
        init_logging();
        let users = Arc::new(MemoryStore::new("users"));
        users.fail_next_creates(1);
        let connector = user_connector(&users);

        let updated = connector.update_user("u1").await.unwrap();

        assert_eq!(updated, Lookup::NotFound);
        assert_eq!(users.calls().find_one, 2);
        assert_eq!(users.calls().create, 1);
        assert_eq!(users.calls().writes(), 0);
    }

    #[tokio::test]
    async fn test_update_guild_create_failure_falls_back_to_not_found() {
        init_logging();
        let guilds = Arc::new(MemoryStore::new("guilds"));
        guilds.fail_next_creates(1);
        let connector =
            StoreConnector::unbound().with_guild_store(ModelDescriptor::schemaless("guilds"), guilds.clone());

        let updated = connector.update_guild("g1").await.unwrap();

        assert_eq!(updated, Lookup::NotFound);
        assert_eq!(guilds.calls().find_one, 2);
        assert_eq!(guilds.calls().writes(), 0);
        assert!(guilds.documents().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_nothing_to_set_returns_stored_document() {
        init_logging();
        let users = Arc::new(MemoryStore::with_documents("users", vec![doc! { "_id": "u1" }]));
        let connector =
            StoreConnector::unbound().with_user_store(ModelDescriptor::schemaless("users"), users.clone());

        let updated = connector.update_user("u1").await.unwrap();

        assert_eq!(updated, Lookup::Found(doc! { "_id": "u1" }));
        assert_eq!(users.calls().find_one_and_update, 1);
        assert!(users.update_log().await.is_empty());
    }
}
