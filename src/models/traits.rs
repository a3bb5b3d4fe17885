/// Table metadata consumed by the shared paginated query builder.
///
/// `COLUMNS` is the allowlist of column names that client-supplied filter,
/// search and sort fields are checked against before they are spliced into
/// SQL; anything else in a request is ignored.
pub trait Table {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
}
