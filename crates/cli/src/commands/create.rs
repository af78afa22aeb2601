//! `toxictl create <proxyName> --listen <addr> --upstream <addr>` — Create a proxy.

use super::require;
use crate::console::Console;
use toxictl_core::{AdminService, Result};

pub async fn run(
    admin: &dyn AdminService,
    console: &mut dyn Console,
    name: &Option<String>,
    listen: &Option<String>,
    upstream: &Option<String>,
) -> Result<()> {
    let name = require(name, "proxy")?;
    let listen = require(listen, "listen")?;
    let upstream = require(upstream, "upstream")?;

    admin.create_proxy(name, listen, upstream).await?;

    console.out(&format!("Created new proxy {name}\n"));
    Ok(())
}
