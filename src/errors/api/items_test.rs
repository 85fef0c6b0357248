#[cfg(test)]
mod tests {
    use crate::errors::api::ItemApiError;
    use crate::errors::internal::{InternalError, ItemError, ValidationError};
    use sea_orm::DbErr;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ItemApiError::from_internal_error(InternalError::not_found("abc"));

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Not found");
    }

    #[test]
    fn test_validation_maps_to_400_with_message() {
        let err = ItemApiError::from_internal_error(
            ValidationError::Required { field: "title" }.into(),
        );

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "title is required");
    }

    #[test]
    fn test_invalid_filter_maps_to_400() {
        let err = ItemApiError::from_internal_error(InternalError::Item(
            ItemError::invalid_filter("from", "'yesterday' is not a valid date"),
        ));

        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("from"));
        assert!(err.message().contains("yesterday"));
    }

    #[test]
    fn test_database_error_is_hidden() {
        let err = ItemApiError::from_internal_error(InternalError::database(
            "insert_item",
            DbErr::Custom("disk I/O error".to_string()),
        ));

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "An internal error occurred");
        assert!(!err.to_string().contains("disk"));
    }

    #[test]
    fn test_parse_error_is_hidden() {
        let err = ItemApiError::from_internal_error(InternalError::parse("item status", "bogus"));

        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("bogus"));
    }
}
