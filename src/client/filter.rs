use std::convert::Infallible;
use std::str::FromStr;

use crate::types::dto::items::ItemResponse;

/// Category refinement applied to the cached items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// `all` (any case) or a blank value means no constraint
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        if value.is_empty() || value == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(value))
        }
    }
}

/// Local view refinement: category AND search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    category: CategoryFilter,
    search: String,
}

impl ItemFilter {
    pub fn new(category: CategoryFilter, search: &str) -> Self {
        Self {
            category,
            search: search.trim().to_lowercase(),
        }
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Normalized (trimmed, lowercase) search text
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn matches(&self, item: &ItemResponse) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        };
        if !category_ok {
            return false;
        }

        self.search.is_empty()
            || format!("{} {}", item.title, item.description)
                .to_lowercase()
                .contains(&self.search)
    }
}

/// Items passing the filter, in their original order
pub fn filter_items<'a>(items: &'a [ItemResponse], filter: &ItemFilter) -> Vec<&'a ItemResponse> {
    items.iter().filter(|item| filter.matches(item)).collect()
}
