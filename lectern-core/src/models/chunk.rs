use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key-value metadata attached to a chunk record.
///
/// Well-known keys get typed accessors; everything else rides along in the
/// underlying JSON map and survives storage round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkMetadata(pub Map<String, Value>);

impl ChunkMetadata {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build metadata from (key, value) string pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut map = Map::new();
        for (k, v) in pairs {
            map.insert((*k).to_string(), Value::String((*v).to_string()));
        }
        Self(map)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.0
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn chunk_type(&self) -> Option<&str> {
        self.get_str("type")
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str("subject")
    }

    pub fn grade(&self) -> Option<&str> {
        self.get_str("grade")
    }

    pub fn source(&self) -> Option<&str> {
        self.get_str("source")
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get_str("user_id")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }
}

/// The unit stored per corpus: a text body, its metadata, and its embedding.
///
/// `id` is unique within a corpus; re-upserting the same id fully replaces
/// document, metadata, and embedding (last-write-wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
    pub embedding: Vec<f32>,
}

impl ChunkRecord {
    pub fn new(id: impl Into<String>, document: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            metadata: ChunkMetadata::new(),
            embedding,
        }
    }

    pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
