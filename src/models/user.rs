use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub usuario: String,
    #[serde(rename = "contrasena")]
    pub password_hash: String,  // bcrypt hash, never the plain password
}

/// Claims carried by a verified session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Identity {
    pub id: u64,
    pub usuario: String,
}
