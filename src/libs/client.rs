use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<String>,
}

impl Client {
    pub fn new(name: &str, email: Option<String>, phone: Option<String>) -> Self {
        Client {
            id: None,
            name: name.to_string(),
            email,
            phone,
            created_at: None,
        }
    }
}
