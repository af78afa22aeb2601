//! `toxictl delete <proxyName>` — Delete a proxy.

use super::require;
use crate::console::Console;
use toxictl_core::{AdminService, Result};

pub async fn run(admin: &dyn AdminService, console: &mut dyn Console, name: &Option<String>) -> Result<()> {
    let name = require(name, "proxy")?;

    admin.get_proxy(name).await?;
    admin.delete_proxy(name).await?;

    console.out(&format!("Deleted proxy {name}\n"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeAdmin;
    use crate::console::Captured;
    use toxictl_core::{Error, Proxy};

    #[tokio::test]
    async fn deletes_existing_proxy() {
        let admin = FakeAdmin::with_proxies([Proxy::new("redis", "a", "b")]);
        let mut console = Captured::default();

        run(&admin, &mut console, &Some("redis".into())).await.unwrap();

        assert!(admin.proxy("redis").is_none());
        assert_eq!(admin.calls(), ["get_proxy redis", "delete_proxy redis"]);
        assert_eq!(console.out, "Deleted proxy redis\n");
    }

    #[tokio::test]
    async fn unknown_proxy_is_not_deleted() {
        let admin = FakeAdmin::new();
        let mut console = Captured::default();

        let err = run(&admin, &mut console, &Some("ghost".into())).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(admin.calls(), ["get_proxy ghost"]);
    }
}
