//! `toxictl toxic` — Add, update, or remove toxics on a proxy.

use super::require;
use crate::console::Console;
use crate::render;
use clap::Args;
use toxictl_core::{
    AdminService, Error, NewToxic, Result, Stream, ToxicKind, parse_fields,
};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Proxy to add the toxic to
    pub proxy: Option<String>,

    /// Name of the toxic (assigned by the service if omitted)
    #[arg(short = 'n', long = "toxic-name", visible_alias = "toxicName")]
    pub name: Option<String>,

    /// Type of toxic (latency, bandwidth, slow_close, timeout, slicer, ...)
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Comma separated key=value toxic fields
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Add the toxic to the upstream direction
    #[arg(short, long)]
    pub upstream: bool,

    /// Add the toxic to the downstream direction (the default)
    #[arg(short, long)]
    pub downstream: bool,
}

impl AddArgs {
    /// Directions to add to, upstream first. Downstream when neither flag is given.
    pub fn streams(&self) -> Vec<Stream> {
        let mut streams = Vec::with_capacity(2);
        if self.upstream {
            streams.push(Stream::Upstream);
        }
        if self.downstream || !self.upstream {
            streams.push(Stream::Downstream);
        }
        streams
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Proxy the toxic is on
    pub proxy: Option<String>,

    /// Name of the toxic
    #[arg(short = 'n', long = "toxic-name", visible_alias = "toxicName")]
    pub name: Option<String>,

    /// Comma separated key=value toxic fields to overwrite
    #[arg(short, long)]
    pub fields: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Proxy the toxic is on
    pub proxy: Option<String>,

    /// Name of the toxic
    #[arg(short = 'n', long = "toxic-name", visible_alias = "toxicName")]
    pub name: Option<String>,
}

pub async fn add(admin: &dyn AdminService, console: &mut dyn Console, args: &AddArgs) -> Result<()> {
    let proxy = require(&args.proxy, "proxy")?;
    let kind = require(&args.kind, "type")?;
    let fields = parse_fields(require(&args.fields, "fields")?)?;
    let kind = ToxicKind::from_fields(kind, &fields)?;
    let name = args
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let streams = args.streams();
    admin.get_proxy(proxy).await?;

    // Each direction is a separate request; an earlier success is not undone
    // when a later one fails.
    let mut first: Option<(Stream, String)> = None;
    for &stream in &streams {
        // Names are unique per proxy, so a name shared by both directions gets
        // a direction suffix.
        let name = match &name {
            Some(name) if streams.len() > 1 => Some(format!("{name}_{stream}")),
            other => other.clone(),
        };
        let toxic = NewToxic::new(name, stream, kind.clone());
        match admin.add_toxic(proxy, &toxic).await {
            Ok(added) => {
                console.out(&render::toxic_added(&added, proxy));
                if first.is_none() {
                    first = Some((stream, added.name));
                }
            }
            Err(source) => {
                return Err(match first {
                    Some((added, toxic)) => Error::PartialAdd {
                        toxic,
                        added,
                        failed: stream,
                        source: Box::new(source),
                    },
                    None => source,
                });
            }
        }
    }

    Ok(())
}

pub async fn update(admin: &dyn AdminService, console: &mut dyn Console, args: &UpdateArgs) -> Result<()> {
    let proxy = require(&args.proxy, "proxy")?;
    let name = require(&args.name, "toxicName")?;
    let fields = parse_fields(require(&args.fields, "fields")?)?;

    let current = admin.get_proxy(proxy).await?;
    let toxic = current.toxic(name).ok_or_else(|| Error::ToxicNotFound {
        proxy: proxy.to_string(),
        toxic: name.to_string(),
    })?;
    // Reject fields the toxic's kind does not have before sending anything.
    toxic.kind.clone().merge(&fields)?;

    admin.update_toxic(proxy, name, &fields).await?;

    console.out(&format!("Updated toxic '{name}' on proxy '{proxy}'\n"));
    Ok(())
}

pub async fn remove(admin: &dyn AdminService, console: &mut dyn Console, args: &RemoveArgs) -> Result<()> {
    let proxy = require(&args.proxy, "proxy")?;
    let name = require(&args.name, "toxicName")?;

    admin.get_proxy(proxy).await?;
    admin.remove_toxic(proxy, name).await?;

    console.out(&format!("Removed toxic '{name}' on proxy '{proxy}'\n"));
    Ok(())
}
