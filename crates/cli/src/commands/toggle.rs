//! `toxictl toggle <proxyName>` — Flip a proxy between enabled and disabled.

use super::require;
use crate::console::Console;
use crate::render;
use toxictl_core::{AdminService, Result};

pub async fn run(admin: &dyn AdminService, console: &mut dyn Console, name: &Option<String>) -> Result<()> {
    let name = require(name, "proxy")?;

    let mut proxy = admin.get_proxy(name).await?;
    proxy.toggle();
    admin.save_proxy(&proxy).await?;

    console.out(&render::toggled(&proxy));
    Ok(())
}
