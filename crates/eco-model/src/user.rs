use serde::{Deserialize, Serialize};

/// The logged-in operator. A trusted name stamp, never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}
