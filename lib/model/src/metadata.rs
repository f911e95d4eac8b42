use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An error raised while reading [Metadata] from its JSON representation.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Invalid metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result-level facts that accompany a stream of results.
///
/// Only the fields that the engine interprets are typed. All other entries are kept in
/// [`Metadata::extra`] and survive every transformation of the metadata unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// An estimate of the number of results.
    ///
    /// Fractional estimates are rounded up when read.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_total_items"
    )]
    pub total_items: Option<u64>,
    /// A hypermedia hint pointing to the next page of a paginated source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Hypermedia hints of a [TREE](https://w3id.org/tree/specification) collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_properties: Option<TreeProperties>,
    /// Entries that are not interpreted by the engine.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    /// Creates a [Metadata] that only holds a cardinality estimate.
    pub fn with_total_items(total_items: u64) -> Self {
        Self {
            total_items: Some(total_items),
            ..Self::default()
        }
    }

    /// Reads the metadata from a JSON object.
    pub fn from_json(value: Value) -> Result<Self, MetadataError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the JSON representation of the metadata.
    pub fn to_json(&self) -> Result<Value, MetadataError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Returns the relations of the TREE hints, in the order in which they were declared.
    ///
    /// Returns an empty iterator if there are no TREE hints.
    pub fn tree_relations(&self) -> impl Iterator<Item = (&String, &TreeRelation)> {
        self.tree_properties
            .iter()
            .flat_map(|properties| properties.relations.iter())
    }

    /// Returns whether the metadata carries any hypermedia hint that can be followed.
    pub fn has_links(&self) -> bool {
        self.next.is_some() || self.tree_relations().next().is_some()
    }
}

/// The TREE hints of a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeProperties {
    /// Relations to other nodes, keyed by an opaque identifier of the relation.
    ///
    /// A JSON array of relations is also accepted, in which case the position of a relation is
    /// its key.
    #[serde(default, deserialize_with = "deserialize_relations")]
    pub relations: IndexMap<String, TreeRelation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Describes a single relation to another node of a TREE collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeRelation {
    /// The URL of the node that the relation points to.
    #[serde(alias = "tree:node")]
    pub node: String,
    /// Additional information on the relation (e.g., its type or value).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TreeRelation {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Integer(u64),
    Number(f64),
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Saturating conversion of a non-negative estimate"
)]
fn deserialize_total_items<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Integer(count)) => Ok(Some(count)),
        Some(Count::Number(count)) if count.is_finite() && count >= 0.0 => {
            Ok(Some(count.ceil() as u64))
        }
        Some(Count::Number(count)) => Err(D::Error::custom(format!(
            "totalItems must be a non-negative number but got {count}"
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Relations {
    Keyed(IndexMap<String, TreeRelation>),
    Listed(Vec<TreeRelation>),
}

fn deserialize_relations<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, TreeRelation>, D::Error> {
    Ok(match Relations::deserialize(deserializer)? {
        Relations::Keyed(relations) => relations,
        Relations::Listed(relations) => relations
            .into_iter()
            .enumerate()
            .map(|(idx, relation)| (idx.to_string(), relation))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_entries_are_kept() -> Result<(), MetadataError> {
        let metadata = Metadata::from_json(json!({
            "totalItems": 12,
            "pageSize": 4
        }))?;

        assert_eq!(metadata.total_items, Some(12));
        assert_eq!(metadata.extra.get("pageSize"), Some(&json!(4)));
        assert_eq!(
            metadata.to_json()?,
            json!({
                "totalItems": 12,
                "pageSize": 4
            })
        );
        Ok(())
    }

    #[test]
    fn tree_relations_keep_declaration_order() -> Result<(), MetadataError> {
        let metadata = Metadata::from_json(json!({
            "treeProperties": {
                "relations": {
                    "b": { "tree:node": "http://example.com/b" },
                    "a": { "node": "http://example.com/a", "type": "tree:GreaterThanRelation" }
                }
            }
        }))?;

        let nodes = metadata
            .tree_relations()
            .map(|(_, relation)| relation.node.as_str())
            .collect::<Vec<_>>();
        assert_eq!(nodes, vec!["http://example.com/b", "http://example.com/a"]);
        assert!(metadata.has_links());
        Ok(())
    }

    #[test]
    fn fractional_total_items_are_rounded_up() -> Result<(), MetadataError> {
        let whole = Metadata::from_json(json!({ "totalItems": 12.0 }))?;
        let fraction = Metadata::from_json(json!({ "totalItems": 2.5 }))?;

        assert_eq!(whole.total_items, Some(12));
        assert_eq!(fraction.total_items, Some(3));
        assert!(Metadata::from_json(json!({ "totalItems": -1 })).is_err());
        assert!(Metadata::from_json(json!({ "totalItems": "many" })).is_err());
        Ok(())
    }

    #[test]
    fn tree_relations_may_be_listed() -> Result<(), MetadataError> {
        let metadata = Metadata::from_json(json!({
            "treeProperties": {
                "relations": [
                    { "tree:node": "http://example.com/b" },
                    { "node": "http://example.com/a" }
                ]
            }
        }))?;

        let relations = metadata
            .tree_relations()
            .map(|(key, relation)| (key.as_str(), relation.node.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            relations,
            vec![
                ("0", "http://example.com/b"),
                ("1", "http://example.com/a")
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_metadata_has_no_links() {
        assert!(!Metadata::default().has_links());
        assert!(!Metadata {
            tree_properties: Some(TreeProperties::default()),
            ..Metadata::default()
        }
        .has_links());
    }
}
