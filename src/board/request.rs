//! Requests offered to players and the proposals they answer with.
//!
//! A request lists every legal action a player may take this phase; a
//! proposal picks exactly one of them. On the wire both are tagged by
//! `type`, and "no request pending" is the empty object `{}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fleet::Purchase;
use crate::error::ProposalError;

/// The set of legal actions solicited from one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    /// Choose one purchase; the empty purchase builds nothing.
    Build { options: Vec<Purchase> },
}

impl Request {
    /// Encodes an optional request, using `{}` for `None`.
    pub fn to_value(request: Option<&Request>) -> Value {
        match request {
            Some(r) => serde_json::to_value(r).unwrap_or_else(|_| Value::Object(Map::new())),
            None => Value::Object(Map::new()),
        }
    }
}

/// A player's choice of one offered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Proposal {
    Build { option: Purchase },
}

impl Proposal {
    pub fn build(option: Purchase) -> Self {
        Proposal::Build { option }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Proposal::Build { .. } => "build",
        }
    }

    /// Decodes a proposal from loosely-typed JSON, reporting which field is
    /// missing or unrecognised.
    pub fn from_value(value: &Value) -> Result<Proposal, ProposalError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ProposalError::Malformed("expected a JSON object".into()))?;
        let kind = obj
            .get("type")
            .ok_or(ProposalError::MissingField("type"))?
            .as_str()
            .ok_or_else(|| ProposalError::Malformed("'type' must be a string".into()))?;
        match kind {
            "build" => {
                let option = obj.get("option").ok_or(ProposalError::MissingField("option"))?;
                let option: Purchase = serde_json::from_value(option.clone())
                    .map_err(|e| ProposalError::Malformed(e.to_string()))?;
                Ok(Proposal::Build { option })
            }
            other => Err(ProposalError::UnknownType(other.to_string())),
        }
    }
}

/// Serde adapter for `Option<Request>` that writes `None` as `{}`.
pub(crate) mod optional_request {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Request;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct NoRequest {}

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Pending(Request),
        Empty(NoRequest),
    }

    pub fn serialize<S: Serializer>(
        request: &Option<Request>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match request {
            Some(r) => r.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Request>, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Pending(r) => Some(r),
            Repr::Empty(_) => None,
        })
    }
}
