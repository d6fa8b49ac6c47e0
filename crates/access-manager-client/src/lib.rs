//! # access-manager-client -- Typed Rust client for AccessManager REST APIs
//!
//! Provides typed, async access to a hosted AccessManager:
//! - **Elements**: users, groups, entity types and entities
//! - **Mappings**: user → group, group → group, user/group → application
//!   component and access level, user/group → entity
//! - **Queries**: membership, reverse lookups, and access checks, with the
//!   service computing indirect (group hierarchy) results on request
//!
//! ## Architecture
//!
//! ```text
//! AccessManagerClient ── stringifiers ──► path segments
//!        │
//!        ▼
//! ResponseInterpreter ── StatusCodeErrorMap ──► AccessManagerError
//!        │
//!        ▼
//!   HttpTransport (ReqwestTransport by default)
//! ```
//!
//! The client is generic over user, group, application component and access
//! level types. A [`UniqueStringifier`] per type converts values to the
//! strings the service stores and back.
//!
//! ## API Path Convention
//!
//! Every request goes to `{base_url}/api/v1/{resource}`. Write operations
//! (POST and DELETE) succeed with 201; reads succeed with 200; existence
//! checks treat 404 as "absent".

pub mod client;
pub mod config;
pub mod error;
pub mod error_response;
pub mod interpreter;
pub mod models;
pub mod processor;
pub mod stringifier;
pub mod transport;

pub use client::{AccessManagerClient, Stringifiers, TransportOwnership};
pub use config::{AccessManagerClientConfig, ConfigError};
pub use error::{AccessManagerError, ElementKind};
pub use error_response::ErrorResponse;
pub use models::{ApplicationComponentAndAccessLevel, EntityTypeAndEntity};
pub use processor::{AccessManagerEventProcessor, AccessManagerQueryProcessor, AccessManagerResult};
pub use stringifier::{DisplayFromStrStringifier, StringUniqueStringifier, StringifierError, UniqueStringifier};
pub use transport::{HttpMethod, HttpTransport, ReqwestTransport, TransportError, TransportResponse};
