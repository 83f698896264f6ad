//! # 길드 멤버 연산
//!
//! 길드 멤버는 길드 문서의 `members` 배열에 내장된 서브 문서입니다.
//! 모든 멤버 연산은 길드 컬렉션을 통해 이루어지며, 길드를 확인하지 못하면
//! 멤버에 접근하지 않고 길드 조회 결과를 그대로 돌려줍니다.
//!
//! 배열은 통째로 다시 쓰지 않습니다. 추가는 `$push`, 갱신은 해당 원소 하나만
//! 교체하므로 같은 길드의 서로 다른 멤버에 대한 동시 쓰기가 서로를 덮어쓰지 않습니다.

use log::{debug, warn};
use mongodb::bson::Document;

use crate::domain::entities::guilds::guild;
use crate::domain::entities::{EntityKind, MEMBERS_FIELD, bare_document, document_id, id_filter};
use crate::domain::models::lookup::Lookup;
use crate::errors::errors::{StoreError, StoreResult};
use crate::services::connector::store_connector::{LookupBy, StoreConnector};
use crate::utils::merge::merged;

impl StoreConnector {
    /// 길드 멤버를 조회하고, 없으면 길드 배열에 추가합니다.
    ///
    /// 1. `get_guild`로 길드를 확인 (없으면 생성)
    /// 2. `members`에서 `member_id` 검색
    /// 3. 없으면 `{_id: member_id}`를 배열에 추가
    /// 4. 추가가 실패하면 길드를 다시 확인하고, 여전히 없을 때만 한 번 더 추가
    ///
    /// 두 번째 시도의 에러는 전파됩니다.
    pub async fn get_guild_member(&self, member_id: &str, guild_id: &str) -> StoreResult<Lookup<Document>> {
        if self.guild_members.is_none() {
            return Ok(Lookup::NotConfigured);
        }

        let mut guild_doc = match self.get_guild(guild_id).await? {
            Lookup::Found(guild_doc) => guild_doc,
            other => return Ok(other),
        };

        if let Some(member) = guild::find_member(&guild_doc, member_id) {
            return Ok(Lookup::Found(member));
        }

        match self.create_guild_member(member_id, &mut guild_doc).await {
            Ok(member) => Ok(member),
            Err(e) => {
                warn!(
                    "{} {} 추가 실패 (길드 {}), 재시도합니다: {}",
                    EntityKind::GuildMember,
                    member_id,
                    guild_id,
                    e
                );

                let mut guild_doc = match self.get_guild(guild_id).await? {
                    Lookup::Found(guild_doc) => guild_doc,
                    other => return Ok(other),
                };

                // 첫 시도가 실제로는 반영되었을 수 있음
                if let Some(member) = guild::find_member(&guild_doc, member_id) {
                    return Ok(Lookup::Found(member));
                }

                self.create_guild_member(member_id, &mut guild_doc).await
            }
        }
    }

    /// `{_id: member_id}` 멤버를 길드의 `members` 배열 끝에 추가합니다(`$push`).
    ///
    /// 추가에 성공하면 전달된 길드 문서를 저장소의 갱신 후 문서로 교체하고,
    /// 추가된 멤버 문서를 반환합니다. 실패하면 길드 문서는 변경되지 않습니다.
    ///
    /// # Errors
    ///
    /// * `StoreError::Internal` - 길드 문서에 문자열 `_id`가 없음
    /// * `StoreError::NotFound` - 추가 시점에 길드 문서가 존재하지 않음
    pub async fn create_guild_member(
        &self,
        member_id: &str,
        guild_doc: &mut Document,
    ) -> StoreResult<Lookup<Document>> {
        let guilds = match (&self.guilds, &self.guild_members) {
            (Some(guilds), Some(_)) => guilds,
            _ => return Ok(Lookup::NotConfigured),
        };

        let guild_id = document_id(guild_doc)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Internal("길드 문서에 _id가 없습니다".to_string()))?;

        let member = bare_document(member_id);
        let stored = guilds
            .store
            .push_element(id_filter(&guild_id), MEMBERS_FIELD, member.clone())
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("길드 {} 문서가 존재하지 않습니다", guild_id)))?;

        *guild_doc = stored;
        debug!("{} {} 추가됨 (길드 {})", EntityKind::GuildMember, member_id, guild_id);
        Ok(Lookup::Found(member))
    }

    /// 멤버 서브 문서를 빈 멤버 템플릿 위에 병합해 배열의 해당 원소만 교체합니다.
    ///
    /// 1. `find_one({_id: guild_id})`로 길드 확인 (없으면 생성, 생성 충돌 시 재조회 1회)
    /// 2. 멤버 검색, 없으면 추가 (추가 실패 시 길드를 다시 읽어 멤버 재검색)
    /// 3. 멤버 템플릿에 병합
    /// 4. `{_id: guild_id}` 길드의 `members`에서 `member_id` 원소 하나만 교체
    ///
    /// 저장된 길드 문서가 아니라 병합된 멤버를 반환합니다. 교체 시점에 길드나
    /// 멤버가 사라졌으면 `NotFound`입니다.
    pub async fn update_guild_member(&self, member_id: &str, guild_id: &str) -> StoreResult<Lookup<Document>> {
        let (guilds, member_descriptor) = match (&self.guilds, &self.guild_members) {
            (Some(guilds), Some(member_descriptor)) => (guilds, member_descriptor),
            _ => return Ok(Lookup::NotConfigured),
        };

        let mut guild_doc =
            match Self::get_or_create(EntityKind::Guild, guilds, guild_id, LookupBy::Filter).await? {
                Lookup::Found(guild_doc) => guild_doc,
                other => return Ok(other),
            };

        let member = match guild::find_member(&guild_doc, member_id) {
            Some(member) => member,
            None => match self.create_guild_member(member_id, &mut guild_doc).await {
                Ok(Lookup::Found(member)) => member,
                Ok(other) => return Ok(other),
                Err(e) => {
                    warn!(
                        "{} {} 추가 실패 (길드 {}), 길드를 다시 읽습니다: {}",
                        EntityKind::GuildMember,
                        member_id,
                        guild_id,
                        e
                    );

                    let Some(guild_doc) = guilds.store.find_one(id_filter(guild_id)).await? else {
                        return Ok(Lookup::NotFound);
                    };

                    match guild::find_member(&guild_doc, member_id) {
                        Some(member) => member,
                        None => return Ok(Lookup::NotFound),
                    }
                }
            },
        };

        let normalized = merged(member_descriptor.template(), &member);

        let replaced = guilds
            .store
            .replace_element(id_filter(guild_id), MEMBERS_FIELD, member_id, normalized.clone())
            .await?;

        Ok(replaced.map(|_| normalized).into())
    }
}
