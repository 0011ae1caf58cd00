//! Request-log operations.

use serde::Serialize;
use spyglass_core::{Error, HttpClient, Result};

use crate::client::Client;
use crate::transport::HyperClient;
use crate::types::{LogFilter, LogsResponse, Patch, RequestLog, Thread};

/// Maximum number of logs accepted by one batch submission. Enforced
/// locally, before any request is sent.
pub const MAX_LOG_BATCH_SIZE: usize = 5000;

#[derive(Serialize)]
struct BatchLogsPayload<'a> {
    logs: &'a [RequestLog],
}

#[derive(Serialize)]
struct ThreadsQuery<'a> {
    customer_identifier: &'a str,
}

/// Log ingestion and retrieval.
#[derive(Debug, Clone)]
pub struct LogsService<C = HyperClient> {
    client: Client<C>,
}

impl<C: HttpClient> LogsService<C> {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    /// Submit one request log.
    pub async fn create(&self, log: &RequestLog) -> Result<()> {
        self.client
            .post_no_content("/api/request-logs/create/", log)
            .await
    }

    /// Submit up to [`MAX_LOG_BATCH_SIZE`] request logs in one call.
    ///
    /// A larger batch fails locally with [`Error::InvalidRequest`]; no
    /// request is sent.
    pub async fn batch_create(&self, logs: &[RequestLog]) -> Result<()> {
        if logs.len() > MAX_LOG_BATCH_SIZE {
            return Err(Error::invalid_request(format!(
                "batch size {} exceeds maximum of {MAX_LOG_BATCH_SIZE} logs",
                logs.len()
            )));
        }

        self.client
            .post_no_content("/api/request-logs/batch/create", &BatchLogsPayload { logs })
            .await
    }

    /// List logs matching a filter. Pagination is caller-driven through
    /// `filter.limit` and `filter.offset`.
    pub async fn list(&self, filter: Option<&LogFilter>) -> Result<LogsResponse> {
        self.client
            .get_with_query("/api/request-logs", filter)
            .await
    }

    /// Fetch one log by id.
    pub async fn get(&self, log_id: &str) -> Result<RequestLog> {
        self.client
            .get(&format!("/api/request-logs/{log_id}"))
            .await
    }

    /// Partially update a log.
    pub async fn update(&self, log_id: &str, updates: &Patch) -> Result<()> {
        self.client
            .patch_no_content(&format!("/api/request-logs/{log_id}"), updates)
            .await
    }

    /// List conversation threads, optionally scoped to one customer.
    pub async fn list_threads(&self, customer_identifier: Option<&str>) -> Result<Vec<Thread>> {
        match customer_identifier {
            // The threads endpoint takes the customer scope as a POST
            // payload, not a query parameter.
            Some(customer_identifier) => {
                self.client
                    .post("/api/threads", &ThreadsQuery {
                        customer_identifier,
                    })
                    .await
            }
            None => self.client.get("/api/threads").await,
        }
    }
}
