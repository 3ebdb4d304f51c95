//! Validation modules

pub mod content;

pub use content::{
    apply_update, parse_bool_like, parse_date, parse_media_list, validate_date_range,
    validate_new_content, MSG_DATES_REQUIRED, MSG_END_BEFORE_START, MSG_INVALID_TYPE,
    MSG_REQUIRED_FIELDS,
};
