//! WAPI HTTP connector
//!
//! Implements [`IbConnector`] against the Infoblox WAPI REST endpoints:
//!
//! | operation | request |
//! |---|---|
//! | create | `POST <kind>` |
//! | get by reference | `GET <reference>` |
//! | search | `GET <kind>?field=value...` |
//! | update | `PUT <reference>` |
//! | delete | `DELETE <reference>` |
//!
//! Create, update and delete answer with the object reference as a JSON string.

use crate::common::HttpClient;
use crate::common::query::QueryParams;
use crate::config::HostConfig;
use crate::connector_trait::IbConnector;
use crate::error::IbError;
use crate::models::{Descriptor, Reference};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// WAPI connector over HTTPS with basic authentication
#[derive(Debug)]
pub struct HttpConnector {
    http: HttpClient,
}

impl HttpConnector {
    /// Create a connector for the grid described by `config`
    pub fn new(config: &HostConfig) -> Result<Self, IbError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(IbError::Http)?;

        Ok(Self::with_client(
            client,
            config.base_url(),
            config.username.clone(),
            config.password.clone(),
        ))
    }

    /// Create a connector with a pre-built `reqwest::Client` and WAPI root URL
    pub fn with_client(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            http: HttpClient::new(client, base_url, username, password),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Check credentials and connectivity with a cheap authenticated read
    pub async fn validate_credentials(&self) -> Result<(), IbError> {
        debug!("Validating WAPI credentials and connectivity");
        let pairs = vec![("_return_fields".to_string(), "name".to_string())];
        self.http.send(Method::GET, "grid", &pairs, None).await?;
        debug!("Credentials validated successfully");
        Ok(())
    }
}

fn expect_reference(operation: &str, value: Value) -> Result<Reference, IbError> {
    match value {
        Value::String(reference) => Ok(Reference::new(reference)),
        other => Err(IbError::Api(format!(
            "{operation} returned {other} instead of an object reference"
        ))),
    }
}

#[async_trait::async_trait]
impl IbConnector for HttpConnector {
    async fn create_object(&self, descriptor: &Descriptor, body: Value) -> Result<Reference, IbError> {
        let value = self
            .http
            .send(Method::POST, descriptor.kind(), &[], Some(&body))
            .await?;
        expect_reference("create", value)
    }

    async fn get_object(
        &self,
        descriptor: &Descriptor,
        reference: Option<&Reference>,
        query: &QueryParams,
    ) -> Result<Value, IbError> {
        let pairs = query.to_pairs(descriptor);
        match reference {
            Some(reference) => {
                // a reference addresses one object; search constraints do not apply
                let mut fields = QueryParams::new(query.return_all_fields, Default::default());
                fields.force_proxy = query.force_proxy;
                let pairs = fields.to_pairs(descriptor);
                self.http
                    .send(Method::GET, reference.as_str(), &pairs, None)
                    .await
            }
            None => match query.page_size {
                Some(size) => self
                    .http
                    .fetch_all_pages(descriptor.kind(), pairs, size)
                    .await
                    .map(Value::Array),
                None => self.http.send(Method::GET, descriptor.kind(), &pairs, None).await,
            },
        }
    }

    async fn update_object(
        &self,
        _descriptor: &Descriptor,
        reference: &Reference,
        body: Value,
    ) -> Result<Reference, IbError> {
        let value = self
            .http
            .send(Method::PUT, reference.as_str(), &[], Some(&body))
            .await?;
        expect_reference("update", value)
    }

    async fn delete_object(&self, reference: &Reference) -> Result<Reference, IbError> {
        let value = self
            .http
            .send(Method::DELETE, reference.as_str(), &[], None)
            .await?;
        expect_reference("delete", value)
    }
}
