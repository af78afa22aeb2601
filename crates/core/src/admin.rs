//! AdminService trait — the abstraction over the proxy administration service.
//!
//! The service owns every proxy and toxic; this client only issues requests.
//! Implementations live in their own crates (the HTTP client in
//! `toxictl-client`), and tests substitute in-memory fakes.

use async_trait::async_trait;
use crate::error::Result;
use crate::fields::Fields;
use crate::proxy::{Proxies, Proxy};
use crate::toxic::{NewToxic, Toxic};

/// Request/response operations against the administration service.
///
/// Callers await each call before issuing the next; no implementation is
/// required to tolerate concurrent use.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// All proxies, keyed by name.
    async fn list_proxies(&self) -> Result<Proxies>;

    /// A single proxy with its active toxics.
    async fn get_proxy(&self, name: &str) -> Result<Proxy>;

    /// Create an enabled proxy. Fails if the name is already taken.
    async fn create_proxy(&self, name: &str, listen: &str, upstream: &str) -> Result<Proxy>;

    async fn delete_proxy(&self, name: &str) -> Result<()>;

    /// Persist a proxy's mutable attributes (its enabled flag).
    async fn save_proxy(&self, proxy: &Proxy) -> Result<()>;

    /// Attach a toxic. The service assigns a name when none is given.
    async fn add_toxic(&self, proxy: &str, toxic: &NewToxic) -> Result<Toxic>;

    /// Overwrite some parameters of an existing toxic. Name and stream are unaffected.
    async fn update_toxic(&self, proxy: &str, toxic: &str, fields: &Fields) -> Result<Toxic>;

    async fn remove_toxic(&self, proxy: &str, toxic: &str) -> Result<()>;
}
