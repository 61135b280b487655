pub mod contact;
pub mod form;
pub mod id;
pub mod manager;
pub mod view;

use crate::errors::{AppError, NOTICE_INVALID_PHONE, NOTICE_MISSING_FIELDS, NOTICE_NAME_TOO_LONG};
use uuid::Uuid;
