use serde::{Deserialize, Serialize};

/// Category entity. Read-only from the service's perspective; rows are
/// seeded out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
