//! Domain value pairs returned by queries, and the DTO shapes they are decoded from.
//!
//! The AccessManager returns mappings as JSON objects of bare strings
//! (`{"user": "...", "group": "..."}`). DTOs accept both the camelCase names
//! the service emits and the PascalCase names of its model classes.

/// An application component paired with a level of access to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationComponentAndAccessLevel<C, A> {
    pub application_component: C,
    pub access_level: A,
}

impl<C, A> ApplicationComponentAndAccessLevel<C, A> {
    pub fn new(application_component: C, access_level: A) -> Self {
        Self {
            application_component,
            access_level,
        }
    }
}

/// An entity paired with the type it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityTypeAndEntity {
    pub entity_type: String,
    pub entity: String,
}

impl EntityTypeAndEntity {
    pub fn new(entity_type: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity: entity.into(),
        }
    }
}

// -- Wire DTOs ----------------------------------------------------------------

pub(crate) mod dto {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct UserAndGroup {
        #[serde(rename = "user", alias = "User")]
        pub user: String,
        #[serde(rename = "group", alias = "Group")]
        pub group: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct FromGroupAndToGroup {
        #[serde(rename = "fromGroup", alias = "FromGroup")]
        pub from_group: String,
        #[serde(rename = "toGroup", alias = "ToGroup")]
        pub to_group: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct UserAndApplicationComponentAndAccessLevel {
        #[serde(rename = "user", alias = "User")]
        pub user: String,
        #[serde(rename = "applicationComponent", alias = "ApplicationComponent")]
        pub application_component: String,
        #[serde(rename = "accessLevel", alias = "AccessLevel")]
        pub access_level: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct GroupAndApplicationComponentAndAccessLevel {
        #[serde(rename = "group", alias = "Group")]
        pub group: String,
        #[serde(rename = "applicationComponent", alias = "ApplicationComponent")]
        pub application_component: String,
        #[serde(rename = "accessLevel", alias = "AccessLevel")]
        pub access_level: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct EntityTypeAndEntity {
        #[serde(rename = "entityType", alias = "EntityType")]
        pub entity_type: String,
        #[serde(rename = "entity", alias = "Entity")]
        pub entity: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct UserAndEntity {
        #[serde(rename = "user", alias = "User")]
        pub user: String,
        #[serde(rename = "entityType", alias = "EntityType")]
        pub entity_type: String,
        #[serde(rename = "entity", alias = "Entity")]
        pub entity: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct GroupAndEntity {
        #[serde(rename = "group", alias = "Group")]
        pub group: String,
        #[serde(rename = "entityType", alias = "EntityType")]
        pub entity_type: String,
        #[serde(rename = "entity", alias = "Entity")]
        pub entity: String,
    }

    impl From<EntityTypeAndEntity> for super::EntityTypeAndEntity {
        fn from(raw: EntityTypeAndEntity) -> Self {
            Self::new(raw.entity_type, raw.entity)
        }
    }

    impl From<UserAndEntity> for super::EntityTypeAndEntity {
        fn from(raw: UserAndEntity) -> Self {
            Self::new(raw.entity_type, raw.entity)
        }
    }

    impl From<GroupAndEntity> for super::EntityTypeAndEntity {
        fn from(raw: GroupAndEntity) -> Self {
            Self::new(raw.entity_type, raw.entity)
        }
    }
}
