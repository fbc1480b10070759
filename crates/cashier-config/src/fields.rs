//! Declarative result field maps
//!
//! A [`FieldMap`] tells the facade which attributes of a processor response
//! to return for each [`OperationKind`], and under which local names.
//!
//! ```toml
//! [fields.charge]
//! stripe_id = "id"
//! stripe_last4 = { card = "last4" }
//! stripe_amount = "amount"
//! ```

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

/// Which operation's response shape is being projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Card attach, legacy key
    AddCard,
    /// Newly created charge
    Charge,
    /// Customer creation, legacy key
    CreateCustomer,
    /// Charge after it was refunded
    Refund,
    /// Card object created by an attach
    NewCard,
    /// Customer object, returned by customer creation and card attach
    Customer,
}

impl OperationKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 6] = [
        Self::AddCard,
        Self::Charge,
        Self::CreateCustomer,
        Self::Refund,
        Self::NewCard,
        Self::Customer,
    ];

    /// Canonical config key, also used by the fallback projection
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddCard => "add_card",
            Self::Charge => "charge",
            Self::CreateCustomer => "create_customer",
            Self::Refund => "refund",
            Self::NewCard => "new_card",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_card" | "addCard" => Ok(Self::AddCard),
            "charge" => Ok(Self::Charge),
            "create_customer" | "createCustomer" => Ok(Self::CreateCustomer),
            "refund" => Ok(Self::Refund),
            "new_card" | "newCard" => Ok(Self::NewCard),
            "customer" => Ok(Self::Customer),
            other => Err(format!("unknown operation kind `{other}`")),
        }
    }
}

/// Location of a value inside a processor response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSourcePath")]
pub enum SourcePath {
    /// Top-level attribute, e.g. `id`
    Attribute(String),
    /// Attribute of a nested object, e.g. `card.last4`
    Nested {
        /// Name of the nested object on the response
        object: String,
        /// Attribute read from the nested object
        attribute: String,
    },
}

impl SourcePath {
    /// Path to a top-level attribute
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    /// Path to an attribute of a nested object
    pub fn nested(object: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Nested {
            object: object.into(),
            attribute: attribute.into(),
        }
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Attribute(name) => vec![name.as_str()],
            Self::Nested { object, attribute } => vec![object.as_str(), attribute.as_str()],
        }
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => f.write_str(name),
            Self::Nested { object, attribute } => write!(f, "{object}.{attribute}"),
        }
    }
}

/// Shapes a path may take in the config file
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSourcePath {
    Attribute(String),
    Nested(IndexMap<String, String>),
}

impl TryFrom<RawSourcePath> for SourcePath {
    type Error = String;

    fn try_from(raw: RawSourcePath) -> Result<Self, Self::Error> {
        match raw {
            RawSourcePath::Attribute(name) => Ok(Self::Attribute(name)),
            RawSourcePath::Nested(table) => {
                if table.len() != 1 {
                    return Err(format!(
                        "a nested path must have exactly one `object = \"attribute\"` entry, found {}",
                        table.len()
                    ));
                }

                let (object, attribute) = table
                    .into_iter()
                    .next()
                    .ok_or_else(|| "a nested path must not be empty".to_owned())?;

                Ok(Self::Nested { object, attribute })
            }
        }
    }
}

/// Ordered mapping from local field name to response path
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResultSpec(IndexMap<String, SourcePath>);

impl ResultSpec {
    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourcePath)> {
        self.0.iter().map(|(local, path)| (local.as_str(), path))
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is declared
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SourcePath)> for ResultSpec {
    fn from_iter<I: IntoIterator<Item = (K, SourcePath)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(local, path)| (local.into(), path)).collect())
    }
}

/// Result specs keyed by operation kind
///
/// Loaded once at startup and shared read-only. Kinds without an entry are
/// projected by wrapping the whole response under the kind's key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, ResultSpec>")]
pub struct FieldMap(IndexMap<OperationKind, ResultSpec>);

impl FieldMap {
    /// Spec registered for `kind`, if any
    pub fn get(&self, kind: OperationKind) -> Option<&ResultSpec> {
        self.0.get(&kind)
    }

    /// Register or replace the spec for `kind`
    pub fn insert(&mut self, kind: OperationKind, spec: ResultSpec) -> Option<ResultSpec> {
        self.0.insert(kind, spec)
    }

    /// Registered specs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (OperationKind, &ResultSpec)> {
        self.0.iter().map(|(kind, spec)| (*kind, spec))
    }

    /// Whether no spec is registered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(OperationKind, ResultSpec)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (OperationKind, ResultSpec)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<IndexMap<String, ResultSpec>> for FieldMap {
    type Error = String;

    fn try_from(raw: IndexMap<String, ResultSpec>) -> Result<Self, Self::Error> {
        let mut map = IndexMap::with_capacity(raw.len());

        for (key, spec) in raw {
            let kind = key.parse::<OperationKind>()?;
            if map.insert(kind, spec).is_some() {
                return Err(format!("field map for `{kind}` is declared more than once"));
            }
        }

        Ok(Self(map))
    }
}
