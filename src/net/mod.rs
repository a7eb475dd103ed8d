pub mod fetch;

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

/// Anything that can answer a catalog GET with a parsed JSON body.
///
/// [`fetch::CatalogClient`] is the HTTP implementation; tests drive the
/// service with in-memory sources.
pub trait CatalogSource: Send + Sync {
    fn fetch_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<Value>> + Send;
}
