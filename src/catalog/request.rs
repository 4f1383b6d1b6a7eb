//! Catalog request construction and request/response correlation.
//!
//! The host runtime echoes a string map back with every web response. The
//! plugin stores the submission sequence number there, so a response can be
//! matched to the search that issued it, along with the OpenTelemetry context
//! of the submitting span so the response handling joins the same trace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default catalog endpoint (Google Books volumes search).
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Maximum number of results requested per search.
pub const MAX_RESULTS: u32 = 20;

const SEQ_KEY: &str = "seq";
const QUERY_KEY: &str = "query";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Catalog endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the volumes search endpoint.
    pub base_url: String,
    /// Optional API key appended as `key=`.
    pub api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
        }
    }
}

impl CatalogConfig {
    /// Builds the lookup URL for `query`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::catalog::CatalogConfig;
    ///
    /// let url = CatalogConfig::default().search_url("le guin");
    /// assert_eq!(
    ///     url,
    ///     "https://www.googleapis.com/books/v1/volumes?q=le%20guin&maxResults=20"
    /// );
    /// ```
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{separator}q={}&maxResults={MAX_RESULTS}",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

/// OpenTelemetry context carried across the asynchronous lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the submitting span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current tracing span.
    ///
    /// Returns `None` when tracing is not initialised or the span is not
    /// sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the parent of spans created while the returned
    /// guard is held.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Correlation data round-tripped through the host with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Submission sequence number.
    pub seq: u64,
    /// Query text of the submission.
    pub query: String,
    /// Trace context of the submitting span.
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Encodes the context as the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(SEQ_KEY.to_string(), self.seq.to_string());
        map.insert(QUERY_KEY.to_string(), self.query.clone());
        if let Some(trace) = &self.trace {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map echoed back by the host.
    ///
    /// Returns `None` when `seq` is missing or not a number; such a response
    /// cannot be matched to a submission.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let seq = map.get(SEQ_KEY)?.parse().ok()?;
        let trace = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self {
            seq,
            query: map.get(QUERY_KEY).cloned().unwrap_or_default(),
            trace,
        })
    }
}

/// A catalog lookup ready to be issued by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Full request URL.
    pub url: String,
    /// Correlation data to attach to the request.
    pub context: RequestContext,
}

impl CatalogRequest {
    /// Builds the request for submission `seq` of `query`, capturing the
    /// current trace context.
    #[must_use]
    pub fn new(seq: u64, query: &str, config: &CatalogConfig) -> Self {
        Self {
            url: config.search_url(query),
            context: RequestContext {
                seq,
                query: query.to_string(),
                trace: TraceContext::from_current(),
            },
        }
    }

    /// Sequence number of the submission this request belongs to.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.context.seq
    }
}
