//! Infoblox WAPI Client
//!
//! A Rust client library for the Infoblox WAPI REST API.
//! Provides typed models for DNS, DHCP and IPAM objects and one generic
//! create/read/update/delete protocol that runs over any connector.
//!
//! # Example
//!
//! ```no_run
//! use infoblox_client::{Ea, EaDiff, HostConfig, HttpConnector, ManagerConfig, MxRecordUpdate, ObjectManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to the grid master
//! let connector = HttpConnector::new(&HostConfig::from_env()?)?;
//! let manager = ObjectManager::new(connector, ManagerConfig::owned_by("Terraform", "tenant-1"));
//!
//! // Create an MX record; the returned object is bound to its reference
//! let mx = manager
//!     .create_mx_record("default", "test.example.com", "mail.example.com", 10, None, Ea::new())
//!     .await?;
//!
//! // Update it by reference, tagging it on the way
//! let reference = mx.reference.clone().ok_or("unbound")?;
//! let mx = manager
//!     .update_mx_record(
//!         &reference,
//!         MxRecordUpdate { preference: Some(20), ..Default::default() },
//!         &EaDiff::new().add("Site", "Blr"),
//!     )
//!     .await?;
//!
//! // Delete it again
//! manager.delete_mx_record(&mx).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed objects**: network views, networks, A/MX/SRV/HTTPS records, range templates
//! - **Extensible attributes**: typed values with add/remove diffs merged on update
//! - **References**: opaque object identity with parsers for the readable suffix
//! - **Next available IP**: A records allocated from a network by the grid
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **Mocking**: in-memory connector behind the `test-util` feature

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
#[path = "trait.rs"]
pub mod connector_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::HttpConnector;
pub use common::query::{QueryParams, SearchFilter};
pub use common::{HttpClient, PagedResponse};
pub use config::{HostConfig, ManagerConfig};
pub use connector_trait::IbConnector;
pub use error::IbError;
pub use manager::*;
pub use models::*;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockConnector;
