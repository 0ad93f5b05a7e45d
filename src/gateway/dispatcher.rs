//! Generic request pipeline.
//!
//! For any operation: cancellation check, permission check, request
//! validation, cache lookup, remote call, sanitize, cache store. The forced
//! refresh variant drops the cached entry once the cancellation and
//! permission checks pass, and skips the lookup.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::GatewayConfig;
use crate::gateway::cache::{CacheEntry, CacheKey, ResultCache};
use crate::gateway::clock::{Clock, SystemClock};
use crate::gateway::context::RequestContext;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::permissions::PermissionFilter;
use crate::observability::metrics;
use crate::operations::requests::RequestShape;
use crate::operations::{CachePolicy, Operation, OperationDescriptor, Sanitize};
use crate::soap::{EnvelopeCodec, SoapTransport};

/// A pipeline result and where it came from.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub payload: Arc<T>,
    /// When the payload was fetched from the remote service.
    pub created_at: DateTime<Utc>,
    pub from_cache: bool,
}

/// Runs operations through permission, cache and remote stages.
pub struct Dispatcher {
    codec: EnvelopeCodec,
    transport: Arc<dyn SoapTransport>,
    cache: ResultCache,
    permissions: PermissionFilter,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl Dispatcher {
    pub fn new(
        codec: EnvelopeCodec,
        transport: Arc<dyn SoapTransport>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            codec,
            transport,
            cache: ResultCache::new(clock.clone()),
            permissions: PermissionFilter::new(),
            clock,
            ttl,
        }
    }

    /// Wire a dispatcher from configuration with the wall clock.
    pub fn from_config(config: &GatewayConfig, transport: Arc<dyn SoapTransport>) -> Self {
        let codec = EnvelopeCodec::new(
            config.remote.soap_action_namespace.clone(),
            config.dates.clone(),
        );
        Self::new(
            codec,
            transport,
            Arc::new(SystemClock),
            Duration::from_secs(config.cache.ttl_secs),
        )
        .with_permissions(PermissionFilter::from_list(&config.permissions.deny_list))
        .with_cache_capacity(config.cache.max_entries)
    }

    pub fn with_permissions(mut self, permissions: PermissionFilter) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = ResultCache::new(self.clock.clone()).with_capacity(capacity);
        self
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn permissions(&self) -> &PermissionFilter {
        &self.permissions
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Serve `O`, from cache when a fresh entry exists.
    pub async fn handle<O: Operation>(
        &self,
        ctx: &RequestContext,
        raw_body: &[u8],
    ) -> GatewayResult<Fetched<O::Response>> {
        self.run::<O>(ctx, raw_body, true).await
    }

    /// Drop any cached entry for this request and fetch anew.
    pub async fn refresh<O: Operation>(
        &self,
        ctx: &RequestContext,
        raw_body: &[u8],
    ) -> GatewayResult<Fetched<O::Response>> {
        self.run::<O>(ctx, raw_body, false).await
    }

    /// Remove the cached entry for an operation and request body.
    pub fn invalidate(&self, descriptor: &OperationDescriptor, raw_body: &[u8]) -> bool {
        let removed = self.cache.invalidate(&descriptor.cache_key(raw_body));
        if removed {
            metrics::record_cache_event(descriptor.name, "invalidated");
        }
        removed
    }

    async fn run<O: Operation>(
        &self,
        ctx: &RequestContext,
        raw_body: &[u8],
        use_cache: bool,
    ) -> GatewayResult<Fetched<O::Response>> {
        let started = Instant::now();
        let result = self.pipeline::<O>(ctx, raw_body, use_cache).await;
        let name = O::DESCRIPTOR.name;

        match &result {
            Ok(fetched) => {
                let outcome = if fetched.from_cache { "hit" } else { "fetched" };
                metrics::record_request(name, outcome, started);
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    operation = name,
                    cache = outcome,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Operation served"
                );
            }
            Err(e) => {
                metrics::record_request(name, e.kind(), started);
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    operation = name,
                    error = %e,
                    "Operation failed"
                );
            }
        }
        result
    }

    async fn pipeline<O: Operation>(
        &self,
        ctx: &RequestContext,
        raw_body: &[u8],
        use_cache: bool,
    ) -> GatewayResult<Fetched<O::Response>> {
        let descriptor = &O::DESCRIPTOR;

        if ctx.is_expired() {
            return Err(GatewayError::RequestExpired);
        }

        if self.permissions.is_prohibited(descriptor.name) {
            return Err(GatewayError::MethodProhibited(descriptor.name.to_string()));
        }

        if !use_cache {
            self.invalidate(descriptor, raw_body);
        }

        let request = O::Request::parse(raw_body, self.codec.layouts())?;
        let key = descriptor.cache_key(raw_body);

        if use_cache {
            if let Some(hit) = self.lookup::<O>(&key) {
                return Ok(hit);
            }
        }

        let mut response = self
            .fetch::<O>(ctx, &request)
            .await
            .map_err(|e| e.in_operation(descriptor.name))?;
        response.sanitize();

        // A caller that went away must not leave a result behind.
        if ctx.is_expired() {
            return Err(GatewayError::RequestExpired);
        }

        let payload = Arc::new(response);
        let created_at = self.clock.now();
        let entry = CacheEntry::new(payload.clone(), created_at);
        match self.cache.put_entry(key, entry) {
            Ok(replaced) => {
                let event = if replaced { "replaced" } else { "stored" };
                metrics::record_cache_event(descriptor.name, event);
            }
            Err(e) => {
                metrics::record_cache_event(descriptor.name, "store_failed");
                tracing::warn!(operation = descriptor.name, error = %e, "Result not cached");
            }
        }

        Ok(Fetched {
            payload,
            created_at,
            from_cache: false,
        })
    }

    fn lookup<O: Operation>(&self, key: &CacheKey) -> Option<Fetched<O::Response>> {
        let name = O::DESCRIPTOR.name;
        let Some(entry) = self.cache.get(key) else {
            metrics::record_cache_event(name, "miss");
            return None;
        };

        let stale = match O::DESCRIPTOR.cache_policy {
            CachePolicy::Ttl => self.cache.is_stale(&entry, self.ttl),
            CachePolicy::Snapshot => self.cache.is_future_dated(&entry),
        };
        if stale {
            metrics::record_cache_event(name, "stale");
            return None;
        }

        match entry.downcast::<O::Response>() {
            Some(payload) => {
                metrics::record_cache_event(name, "hit");
                Some(Fetched {
                    payload,
                    created_at: entry.created_at(),
                    from_cache: true,
                })
            }
            None => {
                metrics::record_cache_event(name, "type_mismatch");
                tracing::error!(
                    operation = name,
                    expected = std::any::type_name::<O::Response>(),
                    "Cached payload has the wrong type, refetching"
                );
                None
            }
        }
    }

    async fn fetch<O: Operation>(
        &self,
        ctx: &RequestContext,
        request: &O::Request,
    ) -> GatewayResult<O::Response> {
        let descriptor = &O::DESCRIPTOR;
        let soap = self.codec.encode(descriptor.name, request)?;

        let outcome = ctx.run(self.transport.call(soap)).await;
        let body = match outcome {
            Ok(Ok(body)) => {
                metrics::record_remote_call(descriptor.name, "ok");
                body
            }
            Ok(Err(e)) => {
                metrics::record_remote_call(descriptor.name, "error");
                return Err(e.into());
            }
            Err(e) => {
                metrics::record_remote_call(descriptor.name, "cancelled");
                return Err(e);
            }
        };

        self.codec.decode(&body, descriptor.target_node)
    }
}
