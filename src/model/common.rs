use serde::{Deserialize, Serialize};

/// Lightweight id + name reference to a related resource (team, venue, referee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    pub name: String,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A normalized dropdown option for a filterable field.
///
/// The API is inconsistent about option shapes: some endpoints return bare
/// strings, others `{id, name, fullName}` objects with numeric or string ids.
/// Everything is normalized to `id` + `label` here, at the boundary, so the
/// rest of the crate never sees the raw shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(u64),
    Str(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Num(n) => n.to_string(),
            RawId::Str(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Detailed {
        id: Option<RawId>,
        name: Option<String>,
        #[serde(rename = "fullName")]
        full_name: Option<String>,
    },
}

impl<'de> Deserialize<'de> for FilterOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let option = match RawOption::deserialize(deserializer)? {
            RawOption::Plain(value) => FilterOption {
                id: value.clone(),
                label: value,
            },
            RawOption::Detailed {
                id,
                name,
                full_name,
            } => {
                let id = id.map(RawId::into_string);
                let label = full_name
                    .or_else(|| name.clone())
                    .or_else(|| id.clone())
                    .unwrap_or_default();
                FilterOption {
                    id: id.or(name).unwrap_or_else(|| label.clone()),
                    label,
                }
            }
        };
        Ok(option)
    }
}

/// The option lists a tournament exposes for dependent filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub categories: Vec<FilterOption>,
    #[serde(default)]
    pub formats: Vec<FilterOption>,
    #[serde(default)]
    pub rounds: Vec<FilterOption>,
    #[serde(default)]
    pub venues: Vec<FilterOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_option_from_bare_string() {
        let option: FilterOption = serde_json::from_str("\"quarter-final\"").unwrap();
        assert_eq!(option.id, "quarter-final");
        assert_eq!(option.label, "quarter-final");
    }

    #[test]
    fn filter_option_from_object_with_numeric_id() {
        let option: FilterOption =
            serde_json::from_str(r#"{"id": 12, "name": "U18", "fullName": "Under 18 Women"}"#)
                .unwrap();
        assert_eq!(option.id, "12");
        assert_eq!(option.label, "Under 18 Women");
    }

    #[test]
    fn filter_option_from_object_without_full_name() {
        let option: FilterOption =
            serde_json::from_str(r#"{"id": "beach", "name": "Beach"}"#).unwrap();
        assert_eq!(option.id, "beach");
        assert_eq!(option.label, "Beach");
    }

    #[test]
    fn page_has_next() {
        let page = Page::<u32> {
            items: vec![],
            page: 2,
            page_size: 20,
            total_items: 45,
            total_pages: 3,
        };
        assert!(page.has_next());

        let last = Page::<u32> { page: 3, ..page };
        assert!(!last.has_next());
    }
}
