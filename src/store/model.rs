use std::collections::BTreeMap;

use serde_json::Value;

use super::Id;

/// A stored document together with its store-assigned metadata. The creation
/// timestamp is epoch milliseconds and is never taken from the caller.
#[derive(Clone, Debug)]
pub struct Document {
    id: Id,
    created_at: i64,
    body: Value,
}

impl Document {
    pub fn new(id: Id, created_at: i64, body: Value) -> Self {
        Self {
            id,
            created_at,
            body,
        }
    }

    pub const fn id(&self) -> &Id {
        &self.id
    }

    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    pub const fn body(&self) -> &Value {
        &self.body
    }
}

/// What a create or put handed back: the id and server timestamp the store
/// assigned.
#[derive(Clone, Debug)]
pub struct Created {
    id: Id,
    timestamp: i64,
}

impl Created {
    pub fn new(id: Id, timestamp: i64) -> Self {
        Self { id, timestamp }
    }

    pub const fn id(&self) -> &Id {
        &self.id
    }

    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[derive(Clone, Debug)]
pub enum Filter {
    All,
    /// Field equals value exactly.
    Eq(&'static str, Value),
    /// Array field contains value.
    Contains(&'static str, Value),
}

impl Filter {
    pub fn matches(&self, body: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Eq(field, value) => body.get(field) == Some(value),
            Self::Contains(field, value) => body
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
        }
    }
}

/// Field-level patch: each entry replaces one top-level field of the body.
#[derive(Clone, Debug, Default)]
pub struct Patch(BTreeMap<String, Value>);

impl Patch {
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(&self, body: &mut Value) {
        if let Some(object) = body.as_object_mut() {
            for (field, value) in &self.0 {
                object.insert(field.clone(), value.clone());
            }
        }
    }
}
