//! In-memory administration service for handler tests.

use async_trait::async_trait;
use std::sync::Mutex;
use toxictl_core::{
    AdminService, Error, Fields, NewToxic, Proxies, Proxy, Result, Stream, Toxic,
};

/// Records every call as a short line, e.g. `add_toxic redis downstream`.
#[derive(Default)]
pub(crate) struct FakeAdmin {
    proxies: Mutex<Proxies>,
    calls: Mutex<Vec<String>>,
    unreachable: bool,
    fail_add_on: Option<Stream>,
}

impl FakeAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proxies(proxies: impl IntoIterator<Item = Proxy>) -> Self {
        let admin = Self::new();
        admin
            .proxies
            .lock()
            .unwrap()
            .extend(proxies.into_iter().map(|p| (p.name.clone(), p)));
        admin
    }

    /// Every call fails as if the service were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Reject toxic additions on one direction.
    pub fn failing_add_on(mut self, stream: Stream) -> Self {
        self.fail_add_on = Some(stream);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn proxy(&self, name: &str) -> Option<Proxy> {
        self.proxies.lock().unwrap().get(name).cloned()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.unreachable {
            return Err(Error::Connection("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AdminService for FakeAdmin {
    async fn list_proxies(&self) -> Result<Proxies> {
        self.record("list_proxies".into())?;
        Ok(self.proxies.lock().unwrap().clone())
    }

    async fn get_proxy(&self, name: &str) -> Result<Proxy> {
        self.record(format!("get_proxy {name}"))?;
        self.proxy(name).ok_or_else(|| Error::NotFound(name.into()))
    }

    async fn create_proxy(&self, name: &str, listen: &str, upstream: &str) -> Result<Proxy> {
        self.record(format!("create_proxy {name}"))?;
        let mut proxies = self.proxies.lock().unwrap();
        if proxies.contains_key(name) {
            return Err(Error::Conflict("proxy already exists".into()));
        }
        let proxy = Proxy::new(name, listen, upstream);
        proxies.insert(name.into(), proxy.clone());
        Ok(proxy)
    }

    async fn delete_proxy(&self, name: &str) -> Result<()> {
        self.record(format!("delete_proxy {name}"))?;
        self.proxies
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(name.into()))
    }

    async fn save_proxy(&self, proxy: &Proxy) -> Result<()> {
        self.record(format!("save_proxy {} enabled={}", proxy.name, proxy.enabled))?;
        let mut proxies = self.proxies.lock().unwrap();
        let stored = proxies
            .get_mut(&proxy.name)
            .ok_or_else(|| Error::NotFound(proxy.name.clone()))?;
        stored.enabled = proxy.enabled;
        Ok(())
    }

    async fn add_toxic(&self, proxy: &str, toxic: &NewToxic) -> Result<Toxic> {
        self.record(format!("add_toxic {proxy} {}", toxic.stream))?;
        if self.fail_add_on == Some(toxic.stream) {
            return Err(Error::Service {
                status: 500,
                message: "injected failure".into(),
            });
        }

        let mut proxies = self.proxies.lock().unwrap();
        let stored = proxies
            .get_mut(proxy)
            .ok_or_else(|| Error::NotFound(proxy.into()))?;
        let name = toxic
            .name
            .clone()
            .unwrap_or_else(|| format!("{}_{}", toxic.kind.type_name(), toxic.stream));
        if stored.toxics.contains_key(&name) {
            return Err(Error::Conflict("toxic already exists".into()));
        }

        let added = Toxic {
            name: name.clone(),
            stream: toxic.stream,
            toxicity: toxic.toxicity,
            kind: toxic.kind.clone(),
        };
        stored.toxics.insert(name, added.clone());
        Ok(added)
    }

    async fn update_toxic(&self, proxy: &str, toxic: &str, fields: &Fields) -> Result<Toxic> {
        self.record(format!("update_toxic {proxy} {toxic}"))?;
        let mut proxies = self.proxies.lock().unwrap();
        let stored = proxies
            .get_mut(proxy)
            .ok_or_else(|| Error::NotFound(proxy.into()))?
            .toxics
            .get_mut(toxic)
            .ok_or_else(|| Error::ToxicNotFound {
                proxy: proxy.into(),
                toxic: toxic.into(),
            })?;
        stored.kind.merge(fields)?;
        Ok(stored.clone())
    }

    async fn remove_toxic(&self, proxy: &str, toxic: &str) -> Result<()> {
        self.record(format!("remove_toxic {proxy} {toxic}"))?;
        self.proxies
            .lock()
            .unwrap()
            .get_mut(proxy)
            .ok_or_else(|| Error::NotFound(proxy.into()))?
            .toxics
            .remove(toxic)
            .map(|_| ())
            .ok_or_else(|| Error::ToxicNotFound {
                proxy: proxy.into(),
                toxic: toxic.into(),
            })
    }
}
