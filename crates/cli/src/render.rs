//! Presentation of proxies and toxics for the terminal.
//!
//! Everything here is pure formatting; commands decide where the text goes.

use colored::{ColoredString, Colorize};
use toxictl_core::{Proxy, Stream, Toxic, Toxics};

const RULE: &str =
    "================================================================================";

fn enabled_color(enabled: bool, text: &str) -> ColoredString {
    if enabled { text.green() } else { text.red() }
}

pub fn enabled_text(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// Column header for the proxy table.
pub fn proxy_table_header() -> String {
    format!(
        "{} {} {} {} {}\n{RULE}\n",
        format!("{:<24}", "Listen").blue(),
        format!("{:<24}", "Upstream").yellow(),
        format!("{:<20}", "Name").green(),
        format!("{:<8}", "Enabled").magenta(),
        "Toxics".red(),
    )
}

/// One proxy as a table row. A proxy without toxics shows `None`.
pub fn proxy_row(proxy: &Proxy) -> String {
    let toxics = match proxy.toxics.len() {
        0 => "None".to_string(),
        n => n.to_string(),
    };
    format!(
        "{} {} {} {} {}\n",
        format!("{:<24}", proxy.listen).blue(),
        format!("{:<24}", proxy.upstream).yellow(),
        enabled_color(proxy.enabled, &format!("{:<20}", proxy.name)),
        format!("{:<8}", proxy.enabled).magenta(),
        toxics.red(),
    )
}

pub fn no_proxies() -> String {
    format!("{}\n\n", "no proxies".red())
}

/// Name and addresses of a single proxy.
pub fn proxy_summary(proxy: &Proxy) -> String {
    format!(
        "proxy name: {}\nlisten: {} ---> upstream: {}\n\n",
        enabled_color(proxy.enabled, &proxy.name),
        proxy.listen.blue(),
        proxy.upstream.yellow(),
    )
}

pub fn no_toxics() -> String {
    format!("{}\n", "no toxics".red())
}

/// `name: field=value …` for one toxic.
pub fn toxic_line(toxic: &Toxic) -> String {
    let mut line = format!(
        "{}: type={} stream={} toxicity={}",
        toxic.name.green(),
        toxic.kind.type_name(),
        toxic.stream,
        toxic.toxicity,
    );
    for (field, value) in toxic.kind.attributes() {
        line.push_str(&format!(" {field}={value}"));
    }
    line.push('\n');
    line
}

/// The toxics of one direction, or a `no <direction> toxics` line.
pub fn toxic_list(toxics: &Toxics, stream: Stream) -> String {
    if toxics.is_empty() {
        return format!("{}\n", format!("no {stream} toxics").red());
    }

    let mut text = format!("{stream} toxics:\n");
    for toxic in toxics.values() {
        text.push_str(&toxic_line(toxic));
    }
    text
}

pub fn toggled(proxy: &Proxy) -> String {
    format!(
        "Proxy {} is now {}\n",
        enabled_color(proxy.enabled, &proxy.name),
        enabled_color(proxy.enabled, enabled_text(proxy.enabled)),
    )
}

pub fn toxic_added(toxic: &Toxic, proxy: &str) -> String {
    format!(
        "Added {} {} toxic '{}' on proxy '{}'\n",
        toxic.stream,
        toxic.kind.type_name(),
        toxic.name,
        proxy
    )
}

/// A one-line pointer to the next useful command.
pub fn hint(message: &str) -> String {
    format!("{}\n", format!("Hint: {message}").cyan())
}
