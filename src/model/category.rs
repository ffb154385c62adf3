use serde::{Deserialize, Serialize};

/// A label used to classify transactions, along with how it is presented.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    /// The value stored in a transaction's `category` field.
    key: String,
    /// The human-readable name.
    name: String,
    /// A display color, e.g. `#FF872C`.
    color: String,
}

impl Category {
    pub fn new(key: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The fixed, ordered list of categories known to the application. The order is the order in
/// which category breakdowns are reported.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Category>);

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(key, name, color)| Category::new(*key, *name, *color))
                .collect(),
        )
    }
}

const DEFAULT_CATEGORIES: [(&str, &str, &str); 6] = [
    ("purchases", "Compras", "#5636D3"),
    ("food", "Alimentação", "#FF872C"),
    ("salary", "Salário", "#12A454"),
    ("car", "Carro", "#E83F5B"),
    ("leisure", "Lazer", "#26195C"),
    ("studies", "Estudos", "#9C001A"),
];
