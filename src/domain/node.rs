//! Person nodes and their serialized record form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reserved identifier of the virtual root.
pub const VIRTUAL_ROOT_ID: NodeId = NodeId::Int(0);

/// Opaque node identifier, numeric or textual.
///
/// Ids are compared for equality only; there is no ordering and no
/// coercion between the two forms. The untagged serde representation
/// keeps the wire form a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl NodeId {
    pub fn is_root(&self) -> bool {
        *self == VIRTUAL_ROOT_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for NodeId {
    type Err = std::convert::Infallible;

    /// Tokens that parse as an integer become numeric ids, everything
    /// else stays text. This happens once at the input boundary; after
    /// that ids are opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeId::from(s))
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        s.parse::<i64>()
            .map(NodeId::Int)
            .unwrap_or_else(|_| NodeId::Text(s.to_string()))
    }
}

/// One person in the forest (plus the synthetic root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: NodeId,
    pub name: String,
    /// Current parent, None only for the virtual root or a node in the
    /// middle of a re-attachment.
    pub parent: Option<NodeId>,
    /// Child ids in insertion order.
    pub children: Vec<NodeId>,
}

/// Flat wire form: one record per node in the persisted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            parent_id: person.parent.clone(),
            children: person.children.clone(),
        }
    }
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            parent: record.parent_id,
            children: record.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_digit_token_when_parsing_then_yields_numeric_id() {
        let id: NodeId = "42".parse().unwrap();
        assert_eq!(id, NodeId::Int(42));
    }

    #[test]
    fn given_text_token_when_parsing_then_yields_text_id() {
        let id: NodeId = "abuela".parse().unwrap();
        assert_eq!(id, NodeId::Text("abuela".to_string()));
    }

    #[test]
    fn given_numeric_and_text_ids_when_comparing_then_never_equal() {
        assert_ne!(NodeId::Int(1), NodeId::Text("1".to_string()));
    }

    #[test]
    fn given_record_when_serializing_then_uses_wire_field_names() {
        let record = PersonRecord {
            id: NodeId::Int(1),
            name: "Grandma".to_string(),
            parent_id: Some(NodeId::Int(0)),
            children: vec![NodeId::Int(2)],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["parentId"], 0);
        assert_eq!(json["children"][0], 2);
    }

    #[test]
    fn given_null_parent_when_deserializing_then_parent_is_none() {
        let record: PersonRecord =
            serde_json::from_str(r#"{"id":0,"name":"ROOT","parentId":null,"children":[]}"#)
                .unwrap();
        assert_eq!(record.parent_id, None);
        assert_eq!(record.id, NodeId::Int(0));
    }
}
