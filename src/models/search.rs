use super::{CharacterGender, CharacterStatus};

/// Filters accepted by `/character`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    /// Sent as `type`.
    pub kind: Option<String>,
    pub gender: Option<CharacterGender>,
    pub page: Option<u32>,
}

impl SearchFilters {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Query pairs in the order the API documents them. Blank strings are skipped.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let mut push_text = |key: &'static str, value: &Option<String>| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key, v.to_string()));
            }
        };
        push_text("name", &self.name);
        push_text("species", &self.species);
        push_text("type", &self.kind);

        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(gender) = self.gender {
            params.push(("gender", gender.as_str().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }

        params
    }
}
