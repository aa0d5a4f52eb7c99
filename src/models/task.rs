use serde::{Deserialize, Serialize};

// Tasks are global: there is no owning user reference.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub titulo: String,
    pub descripcion: String,
}
