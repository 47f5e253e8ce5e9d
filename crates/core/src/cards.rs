use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: u32,
    pub value: i32,
    pub name: String,
}

impl Card {
    pub fn new(id: u32, value: i32, name: &str) -> Self {
        Self {
            id,
            value,
            name: name.to_string(),
        }
    }
}
