use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use shopadmin_core::{AttributeId, AttributeValueId};

/// One possible setting of an attribute (e.g. "Red" for "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: AttributeValueId,
    #[serde(default)]
    pub value: String,
}

impl AttributeValue {
    pub fn new(id: AttributeValueId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// A named product dimension with its ordered set of possible values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: AttributeId,
    pub name: String,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl AttributeDefinition {
    pub fn new(id: AttributeId, name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            id,
            name: name.into(),
            values,
        }
    }

    /// Look up one of this attribute's values by identifier.
    pub fn value(&self, id: AttributeValueId) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == id)
    }
}

/// The attribute values chosen for one variant, keyed by attribute.
///
/// At most one value per attribute. Iteration is ordered by attribute id,
/// which is also the order of the value ids sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeValueMap(BTreeMap<AttributeId, AttributeValue>);

impl AttributeValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `attribute`, returning the value it replaced.
    pub fn insert(&mut self, attribute: AttributeId, value: AttributeValue) -> Option<AttributeValue> {
        self.0.insert(attribute, value)
    }

    pub fn get(&self, attribute: AttributeId) -> Option<&AttributeValue> {
        self.0.get(&attribute)
    }

    pub fn remove(&mut self, attribute: AttributeId) -> Option<AttributeValue> {
        self.0.remove(&attribute)
    }

    pub fn contains(&self, attribute: AttributeId) -> bool {
        self.0.contains_key(&attribute)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &AttributeValue)> {
        self.0.iter()
    }

    pub fn attributes(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.0.keys().copied()
    }

    /// Value identifiers in map iteration order.
    pub fn value_ids(&self) -> Vec<AttributeValueId> {
        self.0.values().map(|v| v.id).collect()
    }

    /// Copy of this map restricted to the `selected` attributes.
    pub fn pruned(&self, selected: &BTreeSet<AttributeId>) -> Self {
        self.0
            .iter()
            .filter(|(attribute, _)| selected.contains(attribute))
            .map(|(attribute, value)| (*attribute, value.clone()))
            .collect()
    }
}

impl FromIterator<(AttributeId, AttributeValue)> for AttributeValueMap {
    fn from_iter<I: IntoIterator<Item = (AttributeId, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeValueMap {
    type Item = (&'a AttributeId, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, AttributeId, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Deserialize an absent or `null` mapping as the empty mapping.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<AttributeValueMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AttributeValueMap>::deserialize(deserializer)?.unwrap_or_default())
}
