//! # AccessManager Client
//!
//! [`AccessManagerClient`] implements both capability traits against a hosted
//! AccessManager. Each operation stringifies its typed arguments, formats a
//! fixed path under `{base_url}/api/v1/`, and hands the request to the
//! [`ResponseInterpreter`]. Strings in the response are converted back to
//! typed values with the same stringifiers.
//!
//! ## API Paths
//!
//! | Resource | Path |
//! |----------|------|
//! | users | `users`, `users/{user}` |
//! | groups | `groups`, `groups/{group}` |
//! | entity types | `entityTypes`, `entityTypes/{entityType}` |
//! | entities | `entityTypes/{entityType}/entities`, `entityTypes/{entityType}/entities/{entity}` |
//! | user → group | `userToGroupMappings/user/{user}/group/{group}` |
//! | group → group | `groupToGroupMappings/fromGroup/{g1}/toGroup/{g2}` |
//! | user → component | `userToApplicationComponentAndAccessLevelMappings/user/{user}/applicationComponent/{c}/accessLevel/{a}` |
//! | group → component | `groupToApplicationComponentAndAccessLevelMappings/group/{group}/applicationComponent/{c}/accessLevel/{a}` |
//! | user → entity | `userToEntityMappings/user/{user}/entityType/{t}/entity/{e}` |
//! | group → entity | `groupToEntityMappings/group/{group}/entityType/{t}/entity/{e}` |
//! | access checks | `dataElementAccess/applicationComponent/...`, `dataElementAccess/entity/...` |
//!
//! Each identifier occupies exactly one path segment; characters such as `/`,
//! `?` and `#` inside an identifier are percent-encoded.
//!
//! ## Transport Ownership
//!
//! A client built from configuration, or handed a boxed transport, owns its
//! transport and closes it when the client is closed or dropped. A client
//! given a shared `Arc` transport never closes it.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{api_base_url, AccessManagerClientConfig, ConfigError};
use crate::error::AccessManagerError;
use crate::interpreter::ResponseInterpreter;
use crate::models::{dto, ApplicationComponentAndAccessLevel, EntityTypeAndEntity};
use crate::processor::{AccessManagerEventProcessor, AccessManagerQueryProcessor, AccessManagerResult};
use crate::stringifier::{StringUniqueStringifier, UniqueStringifier};
use crate::transport::{HttpTransport, ReqwestTransport};

const INCLUDE_INDIRECT_MAPPINGS_PARAMETER: &str = "includeIndirectMappings";

/// Whether closing the client also closes its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOwnership {
    /// Created by or handed over to the client; closed with it.
    Owned,
    /// Supplied by the caller, who remains responsible for closing it.
    Shared,
}

/// The four stringifiers a client converts identifiers with.
pub struct Stringifiers<U, G, C, A> {
    pub user: Arc<dyn UniqueStringifier<U>>,
    pub group: Arc<dyn UniqueStringifier<G>>,
    pub application_component: Arc<dyn UniqueStringifier<C>>,
    pub access_level: Arc<dyn UniqueStringifier<A>>,
}

impl<U, G, C, A> Stringifiers<U, G, C, A> {
    pub fn new(
        user: impl UniqueStringifier<U> + 'static,
        group: impl UniqueStringifier<G> + 'static,
        application_component: impl UniqueStringifier<C> + 'static,
        access_level: impl UniqueStringifier<A> + 'static,
    ) -> Self {
        Self {
            user: Arc::new(user),
            group: Arc::new(group),
            application_component: Arc::new(application_component),
            access_level: Arc::new(access_level),
        }
    }
}

impl<U, G, C, A> Clone for Stringifiers<U, G, C, A> {
    fn clone(&self) -> Self {
        Self {
            user: Arc::clone(&self.user),
            group: Arc::clone(&self.group),
            application_component: Arc::clone(&self.application_component),
            access_level: Arc::clone(&self.access_level),
        }
    }
}

impl Stringifiers<String, String, String, String> {
    /// Identity stringifiers for a client whose identifiers are all strings.
    pub fn strings() -> Self {
        Self::new(
            StringUniqueStringifier,
            StringUniqueStringifier,
            StringUniqueStringifier,
            StringUniqueStringifier,
        )
    }
}

/// Client for a hosted AccessManager.
///
/// - `U`: user type
/// - `G`: group type
/// - `C`: application component type
/// - `A`: access level type
pub struct AccessManagerClient<U, G, C, A> {
    api_base_url: Url,
    interpreter: ResponseInterpreter,
    transport_ownership: TransportOwnership,
    user_stringifier: Arc<dyn UniqueStringifier<U>>,
    group_stringifier: Arc<dyn UniqueStringifier<G>>,
    application_component_stringifier: Arc<dyn UniqueStringifier<C>>,
    access_level_stringifier: Arc<dyn UniqueStringifier<A>>,
}

impl<U, G, C, A> std::fmt::Debug for AccessManagerClient<U, G, C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessManagerClient")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("transport_ownership", &self.transport_ownership)
            .finish_non_exhaustive()
    }
}

impl<U, G, C, A> AccessManagerClient<U, G, C, A> {
    /// Create a client that builds and owns a reqwest-backed transport.
    pub fn new(
        config: AccessManagerClientConfig,
        stringifiers: Stringifiers<U, G, C, A>,
    ) -> AccessManagerResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::build(
            &config.base_url,
            Arc::new(transport),
            TransportOwnership::Owned,
            stringifiers,
        )
    }

    /// Create a client over a caller-owned transport. Closing the client
    /// leaves the transport open.
    pub fn with_shared_transport(
        base_url: &Url,
        transport: Arc<dyn HttpTransport>,
        stringifiers: Stringifiers<U, G, C, A>,
    ) -> AccessManagerResult<Self> {
        Self::build(base_url, transport, TransportOwnership::Shared, stringifiers)
    }

    /// Create a client which takes ownership of `transport` and closes it when
    /// the client is closed.
    pub fn with_owned_transport(
        base_url: &Url,
        transport: Box<dyn HttpTransport>,
        stringifiers: Stringifiers<U, G, C, A>,
    ) -> AccessManagerResult<Self> {
        Self::build(
            base_url,
            Arc::from(transport),
            TransportOwnership::Owned,
            stringifiers,
        )
    }

    fn build(
        base_url: &Url,
        transport: Arc<dyn HttpTransport>,
        transport_ownership: TransportOwnership,
        stringifiers: Stringifiers<U, G, C, A>,
    ) -> AccessManagerResult<Self> {
        Ok(Self {
            api_base_url: api_base_url(base_url)?,
            interpreter: ResponseInterpreter::new(transport),
            transport_ownership,
            user_stringifier: stringifiers.user,
            group_stringifier: stringifiers.group,
            application_component_stringifier: stringifiers.application_component,
            access_level_stringifier: stringifiers.access_level,
        })
    }

    /// Base URL including the `api/v1/` prefix.
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn transport_ownership(&self) -> TransportOwnership {
        self.transport_ownership
    }

    /// Close the client, releasing the transport if the client owns it.
    pub fn close(self) {
        drop(self);
    }

    /// URL of `segments` under the API base. Each segment is encoded separately.
    ///
    /// Empty, `.` and `..` segments are rejected. URL parsing drops or
    /// collapses them (including the `%2E` forms), so no encoding keeps them
    /// in place.
    fn url(&self, segments: &[&str]) -> AccessManagerResult<Url> {
        if let Some(segment) = segments.iter().find(|s| is_unroutable_segment(s)) {
            return Err(AccessManagerError::UnroutableIdentifier {
                identifier: segment.to_string(),
            });
        }
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ConfigError::InvalidUrl(
                    self.api_base_url.to_string(),
                    "URL cannot be used as a base".to_string(),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn url_with_indirect(&self, segments: &[&str], include_indirect_mappings: bool) -> AccessManagerResult<Url> {
        let mut url = self.url(segments)?;
        url.query_pairs_mut().append_pair(
            INCLUDE_INDIRECT_MAPPINGS_PARAMETER,
            if include_indirect_mappings { "true" } else { "false" },
        );
        Ok(url)
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &Url) -> AccessManagerResult<Vec<T>> {
        self.interpreter.get_json(url).await
    }

    fn user(&self, user: &U) -> String {
        self.user_stringifier.to_string(user)
    }

    fn group(&self, group: &G) -> String {
        self.group_stringifier.to_string(group)
    }

    fn component(&self, application_component: &C) -> String {
        self.application_component_stringifier.to_string(application_component)
    }

    fn access(&self, access_level: &A) -> String {
        self.access_level_stringifier.to_string(access_level)
    }

    fn component_and_access(
        &self,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<ApplicationComponentAndAccessLevel<C, A>> {
        Ok(ApplicationComponentAndAccessLevel::new(
            self.application_component_stringifier.from_string(application_component)?,
            self.access_level_stringifier.from_string(access_level)?,
        ))
    }
}

impl<U, G, C, A> Drop for AccessManagerClient<U, G, C, A> {
    fn drop(&mut self) {
        if self.transport_ownership == TransportOwnership::Owned {
            self.interpreter.transport().close();
        }
    }
}

fn is_unroutable_segment(segment: &str) -> bool {
    matches!(segment, "" | "." | "..")
}

/// Convert every raw string with `stringifier`, collecting into `B`.
fn convert_all<T, B>(
    stringifier: &dyn UniqueStringifier<T>,
    raw: impl IntoIterator<Item = String>,
) -> AccessManagerResult<B>
where
    B: FromIterator<T>,
{
    raw.into_iter()
        .map(|value| stringifier.from_string(&value).map_err(AccessManagerError::from))
        .collect()
}

#[async_trait]
impl<U, G, C, A> AccessManagerEventProcessor<U, G, C, A> for AccessManagerClient<U, G, C, A>
where
    U: Send + Sync,
    G: Send + Sync,
    C: Send + Sync,
    A: Send + Sync,
{
    async fn add_user(&self, user: &U) -> AccessManagerResult<()> {
        let url = self.url(&["users", &self.user(user)])?;
        self.interpreter.post(&url).await
    }

    async fn remove_user(&self, user: &U) -> AccessManagerResult<()> {
        let url = self.url(&["users", &self.user(user)])?;
        self.interpreter.delete(&url).await
    }

    async fn add_group(&self, group: &G) -> AccessManagerResult<()> {
        let url = self.url(&["groups", &self.group(group)])?;
        self.interpreter.post(&url).await
    }

    async fn remove_group(&self, group: &G) -> AccessManagerResult<()> {
        let url = self.url(&["groups", &self.group(group)])?;
        self.interpreter.delete(&url).await
    }

    async fn add_user_to_group_mapping(&self, user: &U, group: &G) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToGroupMappings",
            "user",
            &self.user(user),
            "group",
            &self.group(group),
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_user_to_group_mapping(&self, user: &U, group: &G) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToGroupMappings",
            "user",
            &self.user(user),
            "group",
            &self.group(group),
        ])?;
        self.interpreter.delete(&url).await
    }

    async fn add_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToGroupMappings",
            "fromGroup",
            &self.group(from_group),
            "toGroup",
            &self.group(to_group),
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToGroupMappings",
            "fromGroup",
            &self.group(from_group),
            "toGroup",
            &self.group(to_group),
        ])?;
        self.interpreter.delete(&url).await
    }

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToApplicationComponentAndAccessLevelMappings",
            "user",
            &self.user(user),
            "applicationComponent",
            &self.component(application_component),
            "accessLevel",
            &self.access(access_level),
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToApplicationComponentAndAccessLevelMappings",
            "user",
            &self.user(user),
            "applicationComponent",
            &self.component(application_component),
            "accessLevel",
            &self.access(access_level),
        ])?;
        self.interpreter.delete(&url).await
    }

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToApplicationComponentAndAccessLevelMappings",
            "group",
            &self.group(group),
            "applicationComponent",
            &self.component(application_component),
            "accessLevel",
            &self.access(access_level),
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToApplicationComponentAndAccessLevelMappings",
            "group",
            &self.group(group),
            "applicationComponent",
            &self.component(application_component),
            "accessLevel",
            &self.access(access_level),
        ])?;
        self.interpreter.delete(&url).await
    }

    async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        let url = self.url(&["entityTypes", entity_type])?;
        self.interpreter.post(&url).await
    }

    async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        let url = self.url(&["entityTypes", entity_type])?;
        self.interpreter.delete(&url).await
    }

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        let url = self.url(&["entityTypes", entity_type, "entities", entity])?;
        self.interpreter.post(&url).await
    }

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        let url = self.url(&["entityTypes", entity_type, "entities", entity])?;
        self.interpreter.delete(&url).await
    }

    async fn add_user_to_entity_mapping(&self, user: &U, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToEntityMappings",
            "user",
            &self.user(user),
            "entityType",
            entity_type,
            "entity",
            entity,
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_user_to_entity_mapping(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "userToEntityMappings",
            "user",
            &self.user(user),
            "entityType",
            entity_type,
            "entity",
            entity,
        ])?;
        self.interpreter.delete(&url).await
    }

    async fn add_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToEntityMappings",
            "group",
            &self.group(group),
            "entityType",
            entity_type,
            "entity",
            entity,
        ])?;
        self.interpreter.post(&url).await
    }

    async fn remove_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        let url = self.url(&[
            "groupToEntityMappings",
            "group",
            &self.group(group),
            "entityType",
            entity_type,
            "entity",
            entity,
        ])?;
        self.interpreter.delete(&url).await
    }
}

#[async_trait]
impl<U, G, C, A> AccessManagerQueryProcessor<U, G, C, A> for AccessManagerClient<U, G, C, A>
where
    U: Send + Sync,
    G: Send + Sync,
    C: Send + Sync + Eq + Hash,
    A: Send + Sync + Eq + Hash,
{
    async fn get_users(&self) -> AccessManagerResult<Vec<U>> {
        let url = self.url(&["users"])?;
        let raw: Vec<String> = self.get_list(&url).await?;
        convert_all(self.user_stringifier.as_ref(), raw)
    }

    async fn get_groups(&self) -> AccessManagerResult<Vec<G>> {
        let url = self.url(&["groups"])?;
        let raw: Vec<String> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw)
    }

    async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>> {
        let url = self.url(&["entityTypes"])?;
        self.get_list(&url).await
    }

    async fn contains_user(&self, user: &U) -> AccessManagerResult<bool> {
        let url = self.url(&["users", &self.user(user)])?;
        self.interpreter.get_contains(&url).await
    }

    async fn contains_group(&self, group: &G) -> AccessManagerResult<bool> {
        let url = self.url(&["groups", &self.group(group)])?;
        self.interpreter.get_contains(&url).await
    }

    async fn get_user_to_group_mappings(
        &self,
        user: &U,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>> {
        let url = self.url_with_indirect(
            &["userToGroupMappings", "user", &self.user(user)],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::UserAndGroup> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw.into_iter().map(|m| m.group))
    }

    async fn get_group_to_user_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>> {
        let url = self.url_with_indirect(
            &["userToGroupMappings", "group", &self.group(group)],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::UserAndGroup> = self.get_list(&url).await?;
        convert_all(self.user_stringifier.as_ref(), raw.into_iter().map(|m| m.user))
    }

    async fn get_group_to_group_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>> {
        let url = self.url_with_indirect(
            &["groupToGroupMappings", "group", &self.group(group)],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::FromGroupAndToGroup> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw.into_iter().map(|m| m.to_group))
    }

    async fn get_group_to_group_reverse_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>> {
        let url = self.url_with_indirect(
            &["groupToGroupReverseMappings", "group", &self.group(group)],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::FromGroupAndToGroup> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw.into_iter().map(|m| m.from_group))
    }

    async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &U,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<C, A>>> {
        let url = self.url_with_indirect(
            &["userToApplicationComponentAndAccessLevelMappings", "user", &self.user(user)],
            false,
        )?;
        let raw: Vec<dto::UserAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        raw.iter()
            .map(|m| self.component_and_access(&m.application_component, &m.access_level))
            .collect()
    }

    async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>> {
        let url = self.url_with_indirect(
            &[
                "userToApplicationComponentAndAccessLevelMappings",
                "applicationComponent",
                &self.component(application_component),
                "accessLevel",
                &self.access(access_level),
            ],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::UserAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        convert_all(self.user_stringifier.as_ref(), raw.into_iter().map(|m| m.user))
    }

    async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &G,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<C, A>>> {
        let url = self.url_with_indirect(
            &["groupToApplicationComponentAndAccessLevelMappings", "group", &self.group(group)],
            false,
        )?;
        let raw: Vec<dto::GroupAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        raw.iter()
            .map(|m| self.component_and_access(&m.application_component, &m.access_level))
            .collect()
    }

    async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>> {
        let url = self.url_with_indirect(
            &[
                "groupToApplicationComponentAndAccessLevelMappings",
                "applicationComponent",
                &self.component(application_component),
                "accessLevel",
                &self.access(access_level),
            ],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::GroupAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw.into_iter().map(|m| m.group))
    }

    async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool> {
        let url = self.url(&["entityTypes", entity_type])?;
        self.interpreter.get_contains(&url).await
    }

    async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>> {
        let url = self.url(&["entityTypes", entity_type, "entities"])?;
        let raw: Vec<dto::EntityTypeAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(|m| m.entity).collect())
    }

    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool> {
        let url = self.url(&["entityTypes", entity_type, "entities", entity])?;
        self.interpreter.get_contains(&url).await
    }

    async fn get_user_to_entity_mappings(&self, user: &U) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        let url = self.url_with_indirect(&["userToEntityMappings", "user", &self.user(user)], false)?;
        let raw: Vec<dto::UserAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(EntityTypeAndEntity::from).collect())
    }

    async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        let url = self.url_with_indirect(
            &["userToEntityMappings", "user", &self.user(user), "entityType", entity_type],
            false,
        )?;
        let raw: Vec<dto::UserAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(|m| m.entity).collect())
    }

    async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>> {
        let url = self.url_with_indirect(
            &["userToEntityMappings", "entityType", entity_type, "entity", entity],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::UserAndEntity> = self.get_list(&url).await?;
        convert_all(self.user_stringifier.as_ref(), raw.into_iter().map(|m| m.user))
    }

    async fn get_group_to_entity_mappings(&self, group: &G) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        let url = self.url_with_indirect(&["groupToEntityMappings", "group", &self.group(group)], false)?;
        let raw: Vec<dto::GroupAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(EntityTypeAndEntity::from).collect())
    }

    async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        let url = self.url_with_indirect(
            &["groupToEntityMappings", "group", &self.group(group), "entityType", entity_type],
            false,
        )?;
        let raw: Vec<dto::GroupAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(|m| m.entity).collect())
    }

    async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>> {
        let url = self.url_with_indirect(
            &["groupToEntityMappings", "entityType", entity_type, "entity", entity],
            include_indirect_mappings,
        )?;
        let raw: Vec<dto::GroupAndEntity> = self.get_list(&url).await?;
        convert_all(self.group_stringifier.as_ref(), raw.into_iter().map(|m| m.group))
    }

    async fn has_access_to_application_component(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<bool> {
        let url = self.url(&[
            "dataElementAccess",
            "applicationComponent",
            "user",
            &self.user(user),
            "applicationComponent",
            &self.component(application_component),
            "accessLevel",
            &self.access(access_level),
        ])?;
        self.interpreter.get_json(&url).await
    }

    async fn has_access_to_entity(&self, user: &U, entity_type: &str, entity: &str) -> AccessManagerResult<bool> {
        let url = self.url(&[
            "dataElementAccess",
            "entity",
            "user",
            &self.user(user),
            "entityType",
            entity_type,
            "entity",
            entity,
        ])?;
        self.interpreter.get_json(&url).await
    }

    async fn get_application_components_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<C, A>>> {
        let url = self.url_with_indirect(
            &["userToApplicationComponentAndAccessLevelMappings", "user", &self.user(user)],
            true,
        )?;
        let raw: Vec<dto::UserAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        raw.iter()
            .map(|m| self.component_and_access(&m.application_component, &m.access_level))
            .collect()
    }

    async fn get_application_components_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<C, A>>> {
        let url = self.url_with_indirect(
            &["groupToApplicationComponentAndAccessLevelMappings", "group", &self.group(group)],
            true,
        )?;
        let raw: Vec<dto::GroupAndApplicationComponentAndAccessLevel> = self.get_list(&url).await?;
        raw.iter()
            .map(|m| self.component_and_access(&m.application_component, &m.access_level))
            .collect()
    }

    async fn get_entities_accessible_by_user(&self, user: &U) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        let url = self.url_with_indirect(&["userToEntityMappings", "user", &self.user(user)], true)?;
        let raw: Vec<dto::UserAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(EntityTypeAndEntity::from).collect())
    }

    async fn get_entities_accessible_by_user_for_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        let url = self.url_with_indirect(
            &["userToEntityMappings", "user", &self.user(user), "entityType", entity_type],
            true,
        )?;
        let raw: Vec<dto::UserAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(|m| m.entity).collect())
    }

    async fn get_entities_accessible_by_group(&self, group: &G) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        let url = self.url_with_indirect(&["groupToEntityMappings", "group", &self.group(group)], true)?;
        let raw: Vec<dto::GroupAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(EntityTypeAndEntity::from).collect())
    }

    async fn get_entities_accessible_by_group_for_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        let url = self.url_with_indirect(
            &["groupToEntityMappings", "group", &self.group(group), "entityType", entity_type],
            true,
        )?;
        let raw: Vec<dto::GroupAndEntity> = self.get_list(&url).await?;
        Ok(raw.into_iter().map(|m| m.entity).collect())
    }
}
