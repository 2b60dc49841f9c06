use serde_derive::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub real_name: Option<String>,
}

impl User {
    pub fn real_name(&self) -> &str {
        self.real_name.as_deref().unwrap_or("")
    }
}
