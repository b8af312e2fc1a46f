// ABOUTME: Top-level Asana client facade over the request pipeline
// ABOUTME: Builds the reqwest transport from configuration and hands out resource clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::errors::ApiResult;
use crate::http_client::{HttpTransport, ReqwestTransport, RequestPipeline, RetryPolicy};
use crate::resources::{ResourceClient, ResourceKind};

/// Entry point for talking to the Asana API
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    pipeline: RequestPipeline,
}

impl AsanaClient {
    /// Build a client with the production transport
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid or the
    /// HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config)?;
        info!(
            base_url = %config.base_url,
            max_retries = config.max_retries,
            "Asana client initialized"
        );
        Ok(Self::with_transport(Arc::new(transport), config.max_retries))
    }

    /// Build a client over any transport
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>, max_retries: u32) -> Self {
        Self::from_pipeline(
            RequestPipeline::new(transport).with_retry_policy(RetryPolicy::new(max_retries)),
        )
    }

    /// Wrap an already configured pipeline
    #[must_use]
    pub const fn from_pipeline(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// Pipeline for calls the resource layer does not cover
    #[must_use]
    pub const fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    /// Client for any resource kind
    #[must_use]
    pub fn resource(&self, kind: ResourceKind) -> ResourceClient {
        ResourceClient::new(self.pipeline.clone(), kind)
    }

    /// Tasks
    #[must_use]
    pub fn tasks(&self) -> ResourceClient {
        self.resource(ResourceKind::Tasks)
    }

    /// Projects
    #[must_use]
    pub fn projects(&self) -> ResourceClient {
        self.resource(ResourceKind::Projects)
    }

    /// Users
    #[must_use]
    pub fn users(&self) -> ResourceClient {
        self.resource(ResourceKind::Users)
    }

    /// Workspaces
    #[must_use]
    pub fn workspaces(&self) -> ResourceClient {
        self.resource(ResourceKind::Workspaces)
    }

    /// Goals
    #[must_use]
    pub fn goals(&self) -> ResourceClient {
        self.resource(ResourceKind::Goals)
    }

    /// Custom fields
    #[must_use]
    pub fn custom_fields(&self) -> ResourceClient {
        self.resource(ResourceKind::CustomFields)
    }

    /// Attachments
    #[must_use]
    pub fn attachments(&self) -> ResourceClient {
        self.resource(ResourceKind::Attachments)
    }

    /// Sections
    #[must_use]
    pub fn sections(&self) -> ResourceClient {
        self.resource(ResourceKind::Sections)
    }

    /// Tags
    #[must_use]
    pub fn tags(&self) -> ResourceClient {
        self.resource(ResourceKind::Tags)
    }

    /// Teams
    #[must_use]
    pub fn teams(&self) -> ResourceClient {
        self.resource(ResourceKind::Teams)
    }

    /// Portfolios
    #[must_use]
    pub fn portfolios(&self) -> ResourceClient {
        self.resource(ResourceKind::Portfolios)
    }

    /// Stories
    #[must_use]
    pub fn stories(&self) -> ResourceClient {
        self.resource(ResourceKind::Stories)
    }
}
