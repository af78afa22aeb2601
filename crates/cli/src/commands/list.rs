//! `toxictl list` — List all proxies.

use crate::console::Console;
use crate::render;
use toxictl_core::{AdminService, Result};

pub async fn run(admin: &dyn AdminService, console: &mut dyn Console) -> Result<()> {
    let proxies = admin.list_proxies().await?;

    console.err(&render::proxy_table_header());

    if proxies.is_empty() {
        console.out(&render::no_proxies());
        console.out(&render::hint("create a proxy with `toxictl create`"));
        return Ok(());
    }

    // Proxies are keyed by name in a BTreeMap, so this is name order.
    for proxy in proxies.values() {
        console.out(&render::proxy_row(proxy));
    }
    console.out("\n");
    console.out(&render::hint("inspect a proxy with `toxictl inspect <proxyName>`"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeAdmin;
    use crate::console::Captured;
    use toxictl_core::{Error, Proxy};

    #[tokio::test]
    async fn empty_list_explains_itself() {
        colored::control::set_override(false);
        let admin = FakeAdmin::new();
        let mut console = Captured::default();

        run(&admin, &mut console).await.unwrap();

        assert!(console.out.contains("no proxies"));
        assert!(console.out.contains("Hint: create a proxy"));
        assert!(console.err.contains("Listen"));
    }

    #[tokio::test]
    async fn proxies_are_listed_by_name() {
        colored::control::set_override(false);
        let admin = FakeAdmin::with_proxies([
            Proxy::new("web", "127.0.0.1:8080", "127.0.0.1:80"),
            Proxy::new("db", "127.0.0.1:25432", "127.0.0.1:5432"),
            Proxy::new("cache", "127.0.0.1:26379", "127.0.0.1:6379"),
        ]);
        let mut console = Captured::default();

        run(&admin, &mut console).await.unwrap();

        let cache = console.out.find("cache").unwrap();
        let db = console.out.find("db").unwrap();
        let web = console.out.find("web").unwrap();
        assert!(cache < db && db < web);
        assert!(console.out.contains("Hint: inspect a proxy"));
        assert!(!console.out.contains("no proxies"));
    }

    #[tokio::test]
    async fn fetch_failure_is_returned() {
        let admin = FakeAdmin::new().unreachable();
        let mut console = Captured::default();

        let err = run(&admin, &mut console).await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert!(console.out.is_empty());
    }
}
