//! Table schema description.

/// Compile-time description of a table an entity maps to.
///
/// Implemented per entity; the column list doubles as the identifier
/// whitelist for filter validation.
///
/// # Example
///
/// ```rust
/// use odata_orm::Schema;
///
/// struct Products;
///
/// impl Schema for Products {
///     const TABLE: &'static str = "products";
///     const COLUMNS: &'static [&'static str] = &["id", "name", "test_value"];
/// }
/// ```
pub trait Schema {
    /// The table name.
    const TABLE: &'static str;
    /// All column names, in storage form.
    const COLUMNS: &'static [&'static str];
}
