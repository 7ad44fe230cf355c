mod user;

pub use user::{parse_created_at, Gender, UserFields, UserId, UserRecord, CREATED_AT_FORMAT};
