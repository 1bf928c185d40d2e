mod post_create;
mod post_delete;
mod post_get;
mod post_list;
mod post_update;

pub use post_create::post_create;
pub use post_delete::post_delete;
pub use post_get::post_get;
pub use post_list::post_list;
pub use post_update::post_update;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids are UUIDs; anything else is a malformed identifier (400, no body)
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation_failure())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_id_is_a_validation_failure() {
        let err = parse_post_id("xxx").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), None);
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_post_id(&id.to_string()).unwrap(), id);
    }
}
