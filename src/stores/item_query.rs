use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Condition, Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use crate::errors::internal::ItemError;
use crate::types::db::item;
use crate::types::internal::{ItemStatus, parse_timestamp};

/// Upper bound on the number of items any listing returns
pub const MAX_RESULTS: u64 = 100;

/// Shortest term the trigram search table can look up
const MIN_INDEXED_TERM_CHARS: usize = 3;

/// Escape character for LIKE patterns built from user input
const LIKE_ESCAPE: char = '!';

/// Ids of items whose title or description matches an FTS5 query
const SEARCH_TABLE_MATCH: &str =
    r#""items"."id" IN (SELECT "item_id" FROM "items_fts" WHERE "items_fts" MATCH ?)"#;

/// Raw list filters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQueryParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub active: Option<String>,
}

/// Parsed list filters, combined with AND
///
/// `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search_terms: Vec<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

impl ItemQuery {
    /// Build a query from raw parameters
    ///
    /// Empty strings count as absent, except for `active` where any present
    /// value other than the exact string `"true"` means `false`. Status and
    /// category are compared lowercase; unknown values match nothing.
    ///
    /// # Errors
    /// `ItemError::InvalidFilter` when `from` or `to` is not a parseable date
    pub fn from_params(params: &ItemQueryParams) -> Result<Self, ItemError> {
        Ok(Self {
            status: non_empty(params.status.as_deref()).map(str::to_lowercase),
            category: non_empty(params.category.as_deref()).map(str::to_lowercase),
            search_terms: non_empty(params.search.as_deref())
                .map(|search| search.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            from: parse_bound("from", params.from.as_deref())?,
            to: parse_bound("to", params.to.as_deref())?,
            active: params.active.as_deref().map(parse_active_flag),
        })
    }

    /// Active items with the given status (the `lost`/`found` listings)
    pub fn active_with_status(status: ItemStatus) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            active: Some(true),
            ..Default::default()
        }
    }

    /// The combined filter condition
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(status) = &self.status {
            condition = condition.add(item::Column::Status.eq(status.as_str()));
        }
        if let Some(category) = &self.category {
            condition = condition.add(item::Column::Category.eq(category.as_str()));
        }
        if let Some(active) = self.active {
            condition = condition.add(item::Column::Active.eq(active));
        }
        if let Some(from) = self.from {
            condition = condition.add(item::Column::DateLostOrFound.gte(from.timestamp_millis()));
        }
        if let Some(to) = self.to {
            condition = condition.add(item::Column::DateLostOrFound.lte(to.timestamp_millis()));
        }
        if !self.search_terms.is_empty() {
            condition = condition.add(self.text_condition());
        }

        condition
    }

    /// Any term as a literal, case-insensitive substring of the title or
    /// description
    ///
    /// Terms long enough for the trigram table are looked up there in one
    /// `MATCH`; shorter ones fall back to an escaped `LIKE` scan.
    fn text_condition(&self) -> Condition {
        let mut text = Condition::any();
        let mut phrases = Vec::new();

        for term in &self.search_terms {
            if term.chars().count() >= MIN_INDEXED_TERM_CHARS {
                phrases.push(fts_phrase(term));
            } else {
                let pattern = like_pattern(term);
                text = text
                    .add(
                        Expr::col((item::Entity, item::Column::Title))
                            .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                    )
                    .add(
                        Expr::col((item::Entity, item::Column::Description))
                            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
                    );
            }
        }

        if !phrases.is_empty() {
            text = text.add(Expr::cust_with_values(
                SEARCH_TABLE_MATCH,
                [phrases.join(" OR ")],
            ));
        }

        text
    }

    /// Filtered select, newest first, capped at [`MAX_RESULTS`]
    pub fn select(&self) -> Select<item::Entity> {
        item::Entity::find()
            .filter(self.condition())
            .order_by_desc(item::Column::CreatedAt)
            .order_by_desc(item::Column::Id)
            .limit(MAX_RESULTS)
    }
}

/// Quote a term as an FTS5 phrase so none of its characters act as query syntax
fn fts_phrase(term: &str) -> String {
    format!("\"{}\"", term.replace('"', "\"\""))
}

/// `%term%` with the LIKE wildcards and the escape character taken literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Only the exact string `"true"` is true
pub fn parse_active_flag(value: &str) -> bool {
    value == "true"
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bound(parameter: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, ItemError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            ItemError::invalid_filter(parameter, format!("'{}' is not a valid date", raw))
        }),
    }
}
