//! `toxictl inspect <proxyName>` — Show a proxy and its toxics by direction.

use super::require;
use crate::console::Console;
use crate::render;
use toxictl_core::{AdminService, Result, Stream, split_by_direction};

pub async fn run(admin: &dyn AdminService, console: &mut dyn Console, name: &Option<String>) -> Result<()> {
    let name = require(name, "proxy")?;
    let proxy = admin.get_proxy(name).await?;

    console.out(&render::proxy_summary(&proxy));

    if proxy.toxics.is_empty() {
        console.out(&render::no_toxics());
    } else {
        let (upstream, downstream) = split_by_direction(&proxy.toxics);
        console.out(&render::toxic_list(&upstream, Stream::Upstream));
        console.out("\n");
        console.out(&render::toxic_list(&downstream, Stream::Downstream));
    }
    console.out("\n");
    console.out(&render::hint("add a toxic with `toxictl toxic add`"));

    Ok(())
}
