use time::OffsetDateTime;

/// Calendar year in UTC, for the footer.
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}
