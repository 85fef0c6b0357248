use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::types::db::item;

pub const TITLE_MAX_LEN: usize = 140;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const LOCATION_MAX_LEN: usize = 140;
pub const CONTACT_MAX_LEN: usize = 120;

/// Whether the reporter lost the item or found it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Lost,
    Found,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 2] = [ItemStatus::Lost, ItemStatus::Found];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "lost" => Ok(ItemStatus::Lost),
            "found" => Ok(ItemStatus::Found),
            _ => Err(ValidationError::InvalidEnum {
                field: "status",
                allowed: allowed_values(ItemStatus::ALL.iter().map(|s| s.as_str())),
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of object being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Electronics,
    Wallet,
    Keys,
    Bag,
    Documents,
    Clothing,
    Jewelry,
    Pet,
    Other,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 9] = [
        ItemCategory::Electronics,
        ItemCategory::Wallet,
        ItemCategory::Keys,
        ItemCategory::Bag,
        ItemCategory::Documents,
        ItemCategory::Clothing,
        ItemCategory::Jewelry,
        ItemCategory::Pet,
        ItemCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronics => "electronics",
            ItemCategory::Wallet => "wallet",
            ItemCategory::Keys => "keys",
            ItemCategory::Bag => "bag",
            ItemCategory::Documents => "documents",
            ItemCategory::Clothing => "clothing",
            ItemCategory::Jewelry => "jewelry",
            ItemCategory::Pet => "pet",
            ItemCategory::Other => "other",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        ItemCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidEnum {
                field: "category",
                allowed: allowed_values(ItemCategory::ALL.iter().map(|c| c.as_str())),
                value: value.to_string(),
            })
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn allowed_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

/// Parse a timestamp given as RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) or a
/// plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Unvalidated item fields, as supplied by a caller or merged from a patch
///
/// The only way to obtain a [`ValidItem`] is [`ItemDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub date_lost_or_found: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

impl ItemDraft {
    /// Check the draft against the item schema
    ///
    /// Text fields are trimmed first. Required fields must be non-blank,
    /// `status` and `category` must name a known value (case-insensitive),
    /// and a blank `location` is treated as absent. `active` defaults to true.
    pub fn validate(self) -> Result<ValidItem, ValidationError> {
        let title = required_text("title", self.title, TITLE_MAX_LEN)?;
        let description = required_text("description", self.description, DESCRIPTION_MAX_LEN)?;
        let category: ItemCategory = required_text("category", self.category, usize::MAX)?.parse()?;
        let status: ItemStatus = required_text("status", self.status, usize::MAX)?.parse()?;
        let contact = required_text("contact", self.contact, CONTACT_MAX_LEN)?;
        let location = optional_text("location", self.location, LOCATION_MAX_LEN)?;

        Ok(ValidItem {
            title,
            description,
            category,
            status,
            location,
            contact,
            date_lost_or_found: self.date_lost_or_found,
            active: self.active.unwrap_or(true),
        })
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    optional_text(field, value, max)?.ok_or(ValidationError::Required { field })
}

fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_string()))
}

/// An item that passed schema validation and may be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    title: String,
    description: String,
    category: ItemCategory,
    status: ItemStatus,
    location: Option<String>,
    contact: String,
    date_lost_or_found: Option<DateTime<Utc>>,
    active: bool,
}

impl ValidItem {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn date_lost_or_found(&self) -> Option<DateTime<Utc>> {
        self.date_lost_or_found
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

/// A stored item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub contact: String,
    pub date_lost_or_found: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Current field values as a draft, the starting point for a patch
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category: Some(self.category.as_str().to_string()),
            status: Some(self.status.as_str().to_string()),
            location: self.location.clone(),
            contact: Some(self.contact.clone()),
            date_lost_or_found: self.date_lost_or_found,
            active: Some(self.active),
        }
    }
}

impl TryFrom<item::Model> for Item {
    type Error = InternalError;

    fn try_from(model: item::Model) -> Result<Self, Self::Error> {
        let category = model
            .category
            .parse::<ItemCategory>()
            .map_err(|e| InternalError::parse("item category", e.to_string()))?;
        let status = model
            .status
            .parse::<ItemStatus>()
            .map_err(|e| InternalError::parse("item status", e.to_string()))?;
        let date_lost_or_found = model
            .date_lost_or_found
            .map(|millis| millis_to_datetime("date_lost_or_found", millis))
            .transpose()?;
        let created_at = millis_to_datetime("created_at", model.created_at)?;

        Ok(Item {
            id: model.id,
            title: model.title,
            description: model.description,
            category,
            status,
            location: model.location,
            contact: model.contact,
            date_lost_or_found,
            active: model.active,
            created_at,
        })
    }
}

fn millis_to_datetime(field: &str, millis: i64) -> Result<DateTime<Utc>, InternalError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| InternalError::parse(field, format!("timestamp {} out of range", millis)))
}

/// One field of a partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldPatch<T> {
    /// Field was not supplied; keep the current value
    #[default]
    Unchanged,
    /// Field was supplied as null
    Clear,
    Set(T),
}

impl<T> FieldPatch<T> {
    fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            FieldPatch::Unchanged => current,
            FieldPatch::Clear => None,
            FieldPatch::Set(value) => Some(value),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldPatch::Unchanged)
    }
}

/// Partial update of an item. `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub title: FieldPatch<String>,
    pub description: FieldPatch<String>,
    pub category: FieldPatch<String>,
    pub status: FieldPatch<String>,
    pub location: FieldPatch<String>,
    pub contact: FieldPatch<String>,
    pub date_lost_or_found: FieldPatch<DateTime<Utc>>,
    pub active: FieldPatch<bool>,
}

impl ItemPatch {
    /// Overlay the supplied fields onto `draft`; omitted fields keep their value
    pub fn apply_to(self, draft: ItemDraft) -> ItemDraft {
        ItemDraft {
            title: self.title.apply(draft.title),
            description: self.description.apply(draft.description),
            category: self.category.apply(draft.category),
            status: self.status.apply(draft.status),
            location: self.location.apply(draft.location),
            contact: self.contact.apply(draft.contact),
            date_lost_or_found: self.date_lost_or_found.apply(draft.date_lost_or_found),
            active: self.active.apply(draft.active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wallet_draft() -> ItemDraft {
        ItemDraft {
            title: Some("Blue Wallet".to_string()),
            description: Some("Leather wallet".to_string()),
            category: Some("wallet".to_string()),
            status: Some("lost".to_string()),
            location: None,
            contact: Some("a@b.com".to_string()),
            date_lost_or_found: None,
            active: None,
        }
    }

    #[test]
    fn test_valid_draft_defaults_active_to_true() {
        let item = wallet_draft().validate().unwrap();

        assert_eq!(item.title(), "Blue Wallet");
        assert_eq!(item.category(), ItemCategory::Wallet);
        assert_eq!(item.status(), ItemStatus::Lost);
        assert!(item.active());
        assert_eq!(item.location(), None);
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for field in ["title", "description", "category", "status", "contact"] {
            let mut draft = wallet_draft();
            match field {
                "title" => draft.title = None,
                "description" => draft.description = None,
                "category" => draft.category = None,
                "status" => draft.status = None,
                "contact" => draft.contact = None,
                _ => unreachable!(),
            }

            assert_eq!(
                draft.validate(),
                Err(ValidationError::Required { field }),
                "expected {} to be required",
                field
            );
        }
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let mut draft = wallet_draft();
        draft.title = Some("   ".to_string());

        assert_eq!(draft.validate(), Err(ValidationError::Required { field: "title" }));
    }

    #[test]
    fn test_text_fields_are_trimmed_and_blank_location_dropped() {
        let mut draft = wallet_draft();
        draft.title = Some("  Blue Wallet \n".to_string());
        draft.location = Some("   ".to_string());

        let item = draft.validate().unwrap();
        assert_eq!(item.title(), "Blue Wallet");
        assert_eq!(item.location(), None);
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let mut draft = wallet_draft();
        draft.status = Some("stolen".to_string());

        match draft.validate() {
            Err(ValidationError::InvalidEnum { field, value, .. }) => {
                assert_eq!(field, "status");
                assert_eq!(value, "stolen");
            }
            other => panic!("Expected InvalidEnum, got: {:?}", other),
        }
    }

    #[test]
    fn test_enums_are_case_insensitive() {
        let mut draft = wallet_draft();
        draft.status = Some("FOUND".to_string());
        draft.category = Some(" Keys ".to_string());

        let item = draft.validate().unwrap();
        assert_eq!(item.status(), ItemStatus::Found);
        assert_eq!(item.category(), ItemCategory::Keys);
    }

    #[test]
    fn test_too_long_title_is_rejected() {
        let mut draft = wallet_draft();
        draft.title = Some("x".repeat(TITLE_MAX_LEN + 1));

        assert_eq!(
            draft.validate(),
            Err(ValidationError::TooLong {
                field: "title",
                max: TITLE_MAX_LEN
            })
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-01-31"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-31T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-31T00:00:00"), Some(midnight));
        assert_eq!(
            parse_timestamp("2024-01-31T02:00:00+02:00"),
            Some(midnight)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_patch_changes_only_supplied_fields() {
        let original = wallet_draft();
        let patch = ItemPatch {
            title: FieldPatch::Set("Red Wallet".to_string()),
            location: FieldPatch::Set("Library".to_string()),
            ..Default::default()
        };

        let merged = patch.apply_to(original.clone());
        assert_eq!(merged.title.as_deref(), Some("Red Wallet"));
        assert_eq!(merged.location.as_deref(), Some("Library"));
        assert_eq!(merged.description, original.description);
        assert_eq!(merged.status, original.status);
        assert_eq!(merged.contact, original.contact);
    }

    #[test]
    fn test_clearing_required_field_fails_validation() {
        let patch = ItemPatch {
            contact: FieldPatch::Clear,
            ..Default::default()
        };

        let merged = patch.apply_to(wallet_draft());
        assert_eq!(merged.validate(), Err(ValidationError::Required { field: "contact" }));
    }

    #[test]
    fn test_model_round_trip_through_item() {
        let model = item::Model {
            id: "0191".to_string(),
            title: "Keys".to_string(),
            description: "Car keys".to_string(),
            category: "keys".to_string(),
            status: "found".to_string(),
            location: Some("Gym".to_string()),
            contact: "x@y.z".to_string(),
            date_lost_or_found: Some(1_704_067_200_000),
            active: false,
            created_at: 1_704_153_600_000,
        };

        let item = Item::try_from(model).unwrap();
        assert_eq!(item.category, ItemCategory::Keys);
        assert_eq!(item.status, ItemStatus::Found);
        assert_eq!(
            item.date_lost_or_found,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(!item.active);

        let draft = item.to_draft();
        assert_eq!(draft.active, Some(false));
        assert_eq!(draft.category.as_deref(), Some("keys"));
    }

    #[test]
    fn test_corrupt_stored_status_is_a_parse_error() {
        let model = item::Model {
            id: "0191".to_string(),
            title: "Keys".to_string(),
            description: "Car keys".to_string(),
            category: "keys".to_string(),
            status: "stolen".to_string(),
            location: None,
            contact: "x@y.z".to_string(),
            date_lost_or_found: None,
            active: true,
            created_at: 0,
        };

        assert!(matches!(
            Item::try_from(model),
            Err(InternalError::Parse { .. })
        ));
    }
}
