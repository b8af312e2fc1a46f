// ABOUTME: Generic resource client mapping CRUD-style calls onto the request pipeline
// ABOUTME: Validates identifiers and payloads before any request is sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Resources
//!
//! Every Asana resource follows the same pattern: validate an identifier,
//! build a path under the resource's collection, wrap writes in the
//! `{"data": ...}` envelope and forward to the pipeline. [`ResourceClient`]
//! does this once for every [`ResourceKind`].
//!
//! ```text
//! GET    {collection}                 list
//! GET    {collection}/{gid}           get
//! POST   {collection}                 create
//! PUT    {collection}/{gid}           update
//! DELETE {collection}/{gid}           delete
//! GET    {collection}/{gid}/{rel}     list_related
//! POST   {collection}/{gid}/{rel}     create_related, action
//! POST   attachments (multipart)      upload
//! ```

/// Resource kind catalogue
pub mod kind;
/// Pre-network input checks
pub mod validation;

use asana_core::models::{ApiOutput, Gid, HttpMethod, ResponseShape};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

pub use kind::ResourceKind;
pub use validation::{validate_gid, RequiredFields};

use crate::constants::api;
use crate::errors::{ApiError, ApiResult};
use crate::http_client::{MultipartField, RequestOptions, RequestPipeline};
use validation::{payload_object, validate_segment};

/// Client for one resource kind
#[derive(Debug, Clone)]
pub struct ResourceClient {
    pipeline: RequestPipeline,
    kind: ResourceKind,
    shape: ResponseShape,
}

impl ResourceClient {
    /// Client for `kind` returning the `data` member of each response
    #[must_use]
    pub const fn new(pipeline: RequestPipeline, kind: ResourceKind) -> Self {
        Self {
            pipeline,
            kind,
            shape: ResponseShape::Data,
        }
    }

    /// Return responses in another shape
    #[must_use]
    pub const fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    /// Kind this client serves
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Fetch one resource
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier, otherwise any
    /// pipeline error
    pub async fn get(&self, gid: &str, options: RequestOptions) -> ApiResult<Value> {
        let path = self.item_path(gid)?;
        self.send(HttpMethod::Get, &path, options).await
    }

    /// Fetch one resource into a caller type
    ///
    /// # Errors
    ///
    /// Same as [`ResourceClient::get`], plus a status error when the payload
    /// does not match `T`
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        gid: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let path = self.item_path(gid)?;
        self.pipeline
            .execute_as(HttpMethod::Get, &path, options, self.shape)
            .await
    }

    /// List the collection, filtered by the query in `options`
    ///
    /// # Errors
    ///
    /// Any pipeline error
    pub async fn list(&self, options: RequestOptions) -> ApiResult<Value> {
        self.send(HttpMethod::Get, self.kind.collection(), options)
            .await
    }

    /// Create a resource in the top-level collection
    ///
    /// # Errors
    ///
    /// Returns a validation error if the kind is not creatable there or the
    /// payload misses a required field
    pub async fn create(&self, payload: Value, options: RequestOptions) -> ApiResult<Value> {
        let rule = self.kind.create_rule().ok_or_else(|| {
            ApiError::validation(
                "resource",
                format!("{} cannot be created through their collection", self.kind),
            )
        })?;
        rule.check(payload_object(&payload, false)?)?;

        self.send(HttpMethod::Post, self.kind.collection(), with_data(options, payload))
            .await
    }

    /// Update fields of a resource
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier or an empty payload
    pub async fn update(
        &self,
        gid: &str,
        payload: Value,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let path = self.item_path(gid)?;
        payload_object(&payload, false)?;
        self.send(HttpMethod::Put, &path, with_data(options, payload))
            .await
    }

    /// Delete a resource
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier, otherwise any
    /// pipeline error
    pub async fn delete(&self, gid: &str) -> ApiResult<Value> {
        let path = self.item_path(gid)?;
        self.send(HttpMethod::Delete, &path, RequestOptions::new())
            .await
    }

    /// List resources related to one item, e.g. `projects/{gid}/tasks`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier or relation name
    pub async fn list_related(
        &self,
        gid: &str,
        relation: &str,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let path = self.related_path(gid, "relation", relation)?;
        self.send(HttpMethod::Get, &path, options).await
    }

    /// Create a resource under one item, e.g. `projects/{gid}/sections`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier, relation name or
    /// an empty payload
    pub async fn create_related(
        &self,
        gid: &str,
        relation: &str,
        payload: Value,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let path = self.related_path(gid, "relation", relation)?;
        payload_object(&payload, false)?;
        self.send(HttpMethod::Post, &path, with_data(options, payload))
            .await
    }

    /// Invoke an action endpoint, e.g. `tasks/{gid}/addProject`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed identifier or action name
    pub async fn action(&self, gid: &str, action: &str, payload: Value) -> ApiResult<Value> {
        let path = self.related_path(gid, "action", action)?;
        payload_object(&payload, true)?;
        self.send(
            HttpMethod::Post,
            &path,
            with_data(RequestOptions::new(), payload),
        )
        .await
    }

    /// Upload a file attached to the resource `parent_gid`
    ///
    /// Only valid on the attachments client.
    ///
    /// # Errors
    ///
    /// Returns a validation error when called on another kind, for a malformed
    /// parent identifier or an empty file name
    pub async fn upload(
        &self,
        parent_gid: &str,
        file_name: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<Value> {
        if self.kind != ResourceKind::Attachments {
            return Err(ApiError::validation(
                "resource",
                format!("{} do not accept uploads", self.kind),
            ));
        }
        let parent = Gid::parse("parent", parent_gid)?;
        if file_name.trim().is_empty() {
            return Err(ApiError::validation("file_name", "must not be empty"));
        }

        debug!(parent = %parent, file_name, bytes = content.len(), "Uploading attachment");
        let options = RequestOptions::new().multipart(vec![
            MultipartField::text("parent", parent.as_str()),
            MultipartField::file("file", file_name.trim(), content, content_type),
        ]);
        self.send(HttpMethod::Post, self.kind.collection(), options)
            .await
    }

    fn item_path(&self, gid: &str) -> ApiResult<String> {
        let gid = validate_gid(self.kind, gid)?;
        Ok(format!("{}/{gid}", self.kind.collection()))
    }

    fn related_path(&self, gid: &str, field: &str, segment: &str) -> ApiResult<String> {
        validate_segment(field, segment)?;
        Ok(format!("{}/{segment}", self.item_path(gid)?))
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let output = self
            .pipeline
            .execute(method, path, options, self.shape)
            .await?;
        Ok(match output {
            ApiOutput::Normal(value) | ApiOutput::Data(value) => value,
            full @ ApiOutput::Full(_) => full.into_json(),
        })
    }
}

fn with_data(options: RequestOptions, payload: Value) -> RequestOptions {
    let mut envelope = Map::new();
    envelope.insert(api::DATA_MEMBER.to_owned(), payload);
    options.json(Value::Object(envelope))
}
