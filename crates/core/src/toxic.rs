//! Toxics — typed network-impairment rules attached to one direction of a proxy.
//!
//! A toxic's kind is a closed enumeration of the kinds this client knows
//! about, each carrying its own parameter record. Kinds the service defines
//! beyond those are kept as [`ToxicKind::Other`] with an open field map.

use crate::error::{Error, Result};
use crate::fields::Fields;
use std::collections::BTreeMap;
use std::fmt;

/// The traffic direction a toxic applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Upstream,
    Downstream,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Upstream => "upstream",
            Stream::Downstream => "downstream",
        }
    }

    /// Decode a stream tag reported by the service.
    ///
    /// Only the exact tag `upstream` selects [`Stream::Upstream`]; anything
    /// else, including a missing tag, is downstream.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("upstream") => Stream::Upstream,
            _ => Stream::Downstream,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! toxic_params {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: i64,)+
        }

        impl $name {
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn set(&mut self, field: &str, value: i64) -> bool {
                match field {
                    $(stringify!($field) => self.$field = value,)+
                    _ => return false,
                }
                true
            }

            fn attributes(&self) -> Fields {
                Fields::from([$((stringify!($field).to_string(), self.$field)),+])
            }
        }
    };
}

toxic_params! {
    /// Delay all data by `latency` ms, +/- `jitter` ms.
    Latency { latency, jitter }
}

toxic_params! {
    /// Limit throughput to `rate` KB/s.
    Bandwidth { rate }
}

toxic_params! {
    /// Delay the socket close by `delay` ms.
    SlowClose { delay }
}

toxic_params! {
    /// Stop all data and close the connection after `timeout` ms (0 = never close).
    Timeout { timeout }
}

toxic_params! {
    /// Slice data into chunks of `average_size` +/- `size_variation` bytes,
    /// sent `delay` microseconds apart.
    Slicer { average_size, size_variation, delay }
}

/// The kind of a toxic together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ToxicKind {
    Latency(Latency),
    Bandwidth(Bandwidth),
    SlowClose(SlowClose),
    Timeout(Timeout),
    Slicer(Slicer),
    /// A kind defined by the service that this client has no schema for.
    Other { kind: String, attributes: Fields },
}

/// Built-in toxic kinds and the fields each accepts.
pub const CATALOG: &[(&str, &[&str])] = &[
    ("latency", Latency::FIELDS),
    ("bandwidth", Bandwidth::FIELDS),
    ("slow_close", SlowClose::FIELDS),
    ("timeout", Timeout::FIELDS),
    ("slicer", Slicer::FIELDS),
];

impl ToxicKind {
    /// A kind with every parameter at the service default of zero.
    pub fn empty(type_name: &str) -> Self {
        match type_name {
            "latency" => ToxicKind::Latency(Latency::default()),
            "bandwidth" => ToxicKind::Bandwidth(Bandwidth::default()),
            "slow_close" => ToxicKind::SlowClose(SlowClose::default()),
            "timeout" => ToxicKind::Timeout(Timeout::default()),
            "slicer" => ToxicKind::Slicer(Slicer::default()),
            other => ToxicKind::Other {
                kind: other.to_string(),
                attributes: Fields::new(),
            },
        }
    }

    /// Build a kind from its type name and fields, rejecting fields the kind
    /// does not have. Fields that are not given stay at zero.
    pub fn from_fields(type_name: &str, fields: &Fields) -> Result<Self> {
        let mut kind = Self::empty(type_name);
        kind.merge(fields)?;
        Ok(kind)
    }

    /// Overwrite parameters with the given fields.
    ///
    /// Validation happens before anything is written, so on error the kind
    /// is unchanged.
    pub fn merge(&mut self, fields: &Fields) -> Result<()> {
        if let Some(unknown) = fields.keys().find(|f| !self.accepts(f)) {
            return Err(Error::UnknownField {
                kind: self.type_name().to_string(),
                field: unknown.clone(),
            });
        }

        for (field, &value) in fields {
            let applied = match self {
                ToxicKind::Latency(p) => p.set(field, value),
                ToxicKind::Bandwidth(p) => p.set(field, value),
                ToxicKind::SlowClose(p) => p.set(field, value),
                ToxicKind::Timeout(p) => p.set(field, value),
                ToxicKind::Slicer(p) => p.set(field, value),
                ToxicKind::Other { attributes, .. } => {
                    attributes.insert(field.clone(), value);
                    true
                }
            };
            debug_assert!(applied, "field {field} passed validation but was not applied");
        }

        Ok(())
    }

    /// Whether `field` is a parameter of this kind.
    pub fn accepts(&self, field: &str) -> bool {
        match self.fields() {
            Some(known) => known.contains(&field),
            None => true,
        }
    }

    /// The parameter names of a built-in kind, `None` for service-defined kinds.
    pub fn fields(&self) -> Option<&'static [&'static str]> {
        match self {
            ToxicKind::Latency(_) => Some(Latency::FIELDS),
            ToxicKind::Bandwidth(_) => Some(Bandwidth::FIELDS),
            ToxicKind::SlowClose(_) => Some(SlowClose::FIELDS),
            ToxicKind::Timeout(_) => Some(Timeout::FIELDS),
            ToxicKind::Slicer(_) => Some(Slicer::FIELDS),
            ToxicKind::Other { .. } => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ToxicKind::Latency(_) => "latency",
            ToxicKind::Bandwidth(_) => "bandwidth",
            ToxicKind::SlowClose(_) => "slow_close",
            ToxicKind::Timeout(_) => "timeout",
            ToxicKind::Slicer(_) => "slicer",
            ToxicKind::Other { kind, .. } => kind.as_str(),
        }
    }

    /// The parameters as a flat field map, as sent to the service.
    pub fn attributes(&self) -> Fields {
        match self {
            ToxicKind::Latency(p) => p.attributes(),
            ToxicKind::Bandwidth(p) => p.attributes(),
            ToxicKind::SlowClose(p) => p.attributes(),
            ToxicKind::Timeout(p) => p.attributes(),
            ToxicKind::Slicer(p) => p.attributes(),
            ToxicKind::Other { attributes, .. } => attributes.clone(),
        }
    }
}

/// A toxic as reported by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Toxic {
    pub name: String,
    pub stream: Stream,
    /// Probability (0.0–1.0) that the toxic applies to a connection.
    pub toxicity: f32,
    pub kind: ToxicKind,
}

/// Toxics keyed by name. Names are unique within a proxy.
pub type Toxics = BTreeMap<String, Toxic>;

/// A request to attach a toxic to a proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct NewToxic {
    /// Left to the service to assign when `None`.
    pub name: Option<String>,
    pub stream: Stream,
    pub toxicity: f32,
    pub kind: ToxicKind,
}

impl NewToxic {
    pub fn new(name: Option<String>, stream: Stream, kind: ToxicKind) -> Self {
        Self {
            name,
            stream,
            toxicity: 1.0,
            kind,
        }
    }
}

/// Partition toxics into `(upstream, downstream)` by their stream.
pub fn split_by_direction(toxics: &Toxics) -> (Toxics, Toxics) {
    toxics
        .iter()
        .map(|(name, toxic)| (name.clone(), toxic.clone()))
        .partition(|(_, toxic)| toxic.stream == Stream::Upstream)
}
