//! # AccessManager Capabilities
//!
//! [`AccessManagerEventProcessor`] covers every write (adding and removing
//! elements and mappings). [`AccessManagerQueryProcessor`] covers every read.
//!
//! Queries taking `include_indirect_mappings` ask the service to also return
//! mappings derived through the group hierarchy. The transitive closure is
//! computed by the service; implementations pass the flag through unchanged.
//!
//! Listings return a `Vec` in the order the service produced it. "Accessible
//! by" queries return a `HashSet`.

use std::collections::HashSet;
use std::hash::Hash;

use async_trait::async_trait;

use crate::error::AccessManagerError;
use crate::models::{ApplicationComponentAndAccessLevel, EntityTypeAndEntity};

/// Result alias for AccessManager operations.
pub type AccessManagerResult<T> = Result<T, AccessManagerError>;

/// Write operations on an AccessManager.
///
/// - `U`: user type
/// - `G`: group type
/// - `C`: application component type
/// - `A`: access level type
#[async_trait]
pub trait AccessManagerEventProcessor<U, G, C, A>: Send + Sync
where
    U: Send + Sync,
    G: Send + Sync,
    C: Send + Sync,
    A: Send + Sync,
{
    async fn add_user(&self, user: &U) -> AccessManagerResult<()>;

    async fn remove_user(&self, user: &U) -> AccessManagerResult<()>;

    async fn add_group(&self, group: &G) -> AccessManagerResult<()>;

    async fn remove_group(&self, group: &G) -> AccessManagerResult<()>;

    async fn add_user_to_group_mapping(&self, user: &U, group: &G) -> AccessManagerResult<()>;

    async fn remove_user_to_group_mapping(&self, user: &U, group: &G) -> AccessManagerResult<()>;

    async fn add_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessManagerResult<()>;

    async fn remove_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessManagerResult<()>;

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()>;

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()>;

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()>;

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<()>;

    async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()>;

    /// Removes the entity type along with its entities and any mappings to them.
    async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()>;

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()>;

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()>;

    async fn add_user_to_entity_mapping(&self, user: &U, entity_type: &str, entity: &str) -> AccessManagerResult<()>;

    async fn remove_user_to_entity_mapping(&self, user: &U, entity_type: &str, entity: &str)
        -> AccessManagerResult<()>;

    async fn add_group_to_entity_mapping(&self, group: &G, entity_type: &str, entity: &str)
        -> AccessManagerResult<()>;

    async fn remove_group_to_entity_mapping(&self, group: &G, entity_type: &str, entity: &str)
        -> AccessManagerResult<()>;
}

/// Read operations on an AccessManager.
#[async_trait]
pub trait AccessManagerQueryProcessor<U, G, C, A>: Send + Sync
where
    U: Send + Sync,
    G: Send + Sync,
    C: Send + Sync + Eq + Hash,
    A: Send + Sync + Eq + Hash,
{
    async fn get_users(&self) -> AccessManagerResult<Vec<U>>;

    async fn get_groups(&self) -> AccessManagerResult<Vec<G>>;

    async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>>;

    async fn contains_user(&self, user: &U) -> AccessManagerResult<bool>;

    async fn contains_group(&self, group: &G) -> AccessManagerResult<bool>;

    /// Groups `user` is a member of.
    async fn get_user_to_group_mappings(
        &self,
        user: &U,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>>;

    /// Users who are members of `group`.
    async fn get_group_to_user_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>>;

    /// Groups `group` is mapped to.
    async fn get_group_to_group_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>>;

    /// Groups which are mapped to `group`.
    async fn get_group_to_group_reverse_mappings(
        &self,
        group: &G,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>>;

    /// Direct component and access level mappings of `user`.
    async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &U,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<C, A>>>;

    async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>>;

    /// Direct component and access level mappings of `group`.
    async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &G,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<C, A>>>;

    async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>>;

    async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool>;

    async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>>;

    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool>;

    /// Direct entity mappings of `user`.
    async fn get_user_to_entity_mappings(&self, user: &U) -> AccessManagerResult<Vec<EntityTypeAndEntity>>;

    /// Direct mappings of `user` to entities of `entity_type`.
    async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>>;

    async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<U>>;

    /// Direct entity mappings of `group`.
    async fn get_group_to_entity_mappings(&self, group: &G) -> AccessManagerResult<Vec<EntityTypeAndEntity>>;

    /// Direct mappings of `group` to entities of `entity_type`.
    async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>>;

    async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<G>>;

    /// Whether `user`, directly or through its groups, has `access_level` to
    /// `application_component`.
    async fn has_access_to_application_component(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessManagerResult<bool>;

    /// Whether `user`, directly or through its groups, has access to `entity`.
    async fn has_access_to_entity(&self, user: &U, entity_type: &str, entity: &str) -> AccessManagerResult<bool>;

    /// Every component and access level `user` can reach, directly or through groups.
    async fn get_application_components_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<C, A>>>;

    async fn get_application_components_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<C, A>>>;

    async fn get_entities_accessible_by_user(&self, user: &U) -> AccessManagerResult<HashSet<EntityTypeAndEntity>>;

    async fn get_entities_accessible_by_user_for_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>>;

    async fn get_entities_accessible_by_group(&self, group: &G) -> AccessManagerResult<HashSet<EntityTypeAndEntity>>;

    async fn get_entities_accessible_by_group_for_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>>;
}
