//! Model artifact reading.
//!
//! The artifact is a JSON document (see [`schema`]) describing the feature
//! schema, the tree forest and the output transform of a trained binary
//! classifier. Reading goes through the schema types and a validating
//! conversion into [`ChurnClassifier`].

pub mod convert;
pub mod error;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

pub use error::ReadError;
pub use schema::ClassifierSchema;

use crate::model::ChurnClassifier;

impl ChurnClassifier {
    /// Read and validate a classifier from a JSON reader.
    pub fn read_json<R: Read>(reader: R) -> Result<Self, ReadError> {
        let schema: ClassifierSchema = serde_json::from_reader(reader)?;
        debug!(
            "parsed classifier artifact: {} features, {} trees",
            schema.meta.num_features,
            schema.forest.trees.len()
        );
        ChurnClassifier::try_from(schema)
    }

    /// Read and validate a classifier from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_json(BufReader::new(file))
    }
}
