//! JSON shapes of the administration API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use toxictl_core::error::{Error, Result};
use toxictl_core::{Fields, NewToxic, Proxy, Stream, Toxic, ToxicKind, Toxics};

fn default_toxicity() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProxyJson {
    pub name: String,
    pub listen: String,
    pub upstream: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub toxics: Vec<ToxicJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ToxicJson {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default = "default_toxicity")]
    pub toxicity: f32,
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateProxyRequest<'a> {
    pub name: &'a str,
    pub listen: &'a str,
    pub upstream: &'a str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveProxyRequest<'a> {
    pub listen: &'a str,
    pub upstream: &'a str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddToxicRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub stream: &'static str,
    pub toxicity: f32,
    pub attributes: Fields,
}

impl<'a> From<&'a NewToxic> for AddToxicRequest<'a> {
    fn from(toxic: &'a NewToxic) -> Self {
        Self {
            name: toxic.name.as_deref().filter(|n| !n.is_empty()),
            kind: toxic.kind.type_name(),
            stream: toxic.stream.as_str(),
            toxicity: toxic.toxicity,
            attributes: toxic.kind.attributes(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateToxicRequest<'a> {
    pub attributes: &'a Fields,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorJson {
    pub error: String,
}

impl TryFrom<ToxicJson> for Toxic {
    type Error = Error;

    fn try_from(json: ToxicJson) -> Result<Self> {
        let mut fields = Fields::new();
        for (key, value) in json.attributes {
            let number = value.as_i64().ok_or_else(|| {
                Error::Protocol(format!(
                    "toxic '{}' reported non-integer attribute {key}={value}",
                    json.name
                ))
            })?;
            fields.insert(key, number);
        }

        // A newer service may report fields this client has no schema for;
        // keep them rather than failing the read.
        let kind = ToxicKind::from_fields(&json.kind, &fields).unwrap_or(ToxicKind::Other {
            kind: json.kind,
            attributes: fields,
        });

        Ok(Toxic {
            name: json.name,
            stream: Stream::from_tag(json.stream.as_deref()),
            toxicity: json.toxicity,
            kind,
        })
    }
}

impl TryFrom<ProxyJson> for Proxy {
    type Error = Error;

    fn try_from(json: ProxyJson) -> Result<Self> {
        let toxics = json
            .toxics
            .into_iter()
            .map(|t| Toxic::try_from(t).map(|toxic| (toxic.name.clone(), toxic)))
            .collect::<Result<Toxics>>()?;

        Ok(Proxy {
            name: json.name,
            listen: json.listen,
            upstream: json.upstream,
            enabled: json.enabled,
            toxics,
        })
    }
}
