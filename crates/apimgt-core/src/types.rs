//! Asset kinds, operations and the definitions they act on.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ManagerError;

/// The two kinds of asset a dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// An API gateway definition.
    Api,
    /// An access policy.
    Policy,
}

impl AssetKind {
    /// All kinds, in CLI order.
    pub const ALL: [AssetKind; 2] = [AssetKind::Api, AssetKind::Policy];

    /// Lowercase identifier used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Policy => "policy",
        }
    }

    /// JSON path of the human-readable name.
    #[must_use]
    pub fn name_path(self) -> &'static [&'static str] {
        match self {
            Self::Api => &["api_definition", "name"],
            Self::Policy => &["name"],
        }
    }

    /// JSON path of the provider-assigned identifier.
    #[must_use]
    pub fn id_path(self) -> &'static [&'static str] {
        match self {
            Self::Api => &["api_definition", "id"],
            Self::Policy => &["_id"],
        }
    }

    /// Dotted form of [`name_path`](Self::name_path), for messages.
    #[must_use]
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Api => "api_definition.name",
            Self::Policy => "name",
        }
    }

    /// Reads the name of `document` for this kind, if it is a string.
    #[must_use]
    pub fn name_of(self, document: &Value) -> Option<&str> {
        lookup(document, self.name_path()).and_then(Value::as_str)
    }

    /// Reads the remote identifier of `document` for this kind, if it is a
    /// non-blank string.
    #[must_use]
    pub fn id_of(self, document: &Value) -> Option<&str> {
        lookup(document, self.id_path())
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Self::Api),
            "policy" => Ok(Self::Policy),
            other => Err(ManagerError::InvalidAssetKind(other.to_string())),
        }
    }
}

/// What to do with the asset on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// All operations, in CLI order.
    pub const ALL: [Operation; 3] = [Operation::Create, Operation::Update, Operation::Delete];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(ManagerError::InvalidOperation(other.to_string())),
        }
    }
}

/// A parsed asset document together with the kind it was loaded as.
///
/// The name is validated once at construction; the document is never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDefinition {
    kind: AssetKind,
    name: String,
    document: Value,
}

impl AssetDefinition {
    /// Wraps `document`, checking that it is an object with a non-empty name
    /// at the path `kind` expects.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::MissingName` if the name is absent, not a
    /// string, or empty.
    pub fn new(kind: AssetKind, document: Value) -> Result<Self, ManagerError> {
        let name = kind
            .name_of(&document)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .ok_or(ManagerError::MissingName {
                kind,
                field: kind.name_field(),
            })?;

        Ok(Self {
            kind,
            name,
            document,
        })
    }

    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The document exactly as it was loaded.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Value {
        self.document
    }
}

/// Outcome of looking an asset up by name on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one remote asset matches; carries its identifier.
    Found(String),
    /// No remote asset matches.
    NotFound,
}

impl Resolution {
    /// Returns the remote identifier when found.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Candidates returned by a provider name search, in the kind's own shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub candidates: Vec<Value>,
}

impl SearchResponse {
    #[must_use]
    pub fn new(candidates: Vec<Value>) -> Self {
        Self { candidates }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}
