use super::AggregateId;

/// Trait for the aggregates listed and edited by the console
///
/// Instance methods describe one record; the static methods describe the
/// aggregate class and drive page ids and titles in the frontend.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id: AggregateId;

    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Record id
    fn id(&self) -> Self::Id;

    /// Display name of the record
    fn description(&self) -> &str;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "store")
    fn collection_name() -> &'static str;

    /// UI element name, singular (e.g. "Tienda")
    fn element_name() -> &'static str;

    /// UI list name, plural (e.g. "Tiendas")
    fn list_name() -> &'static str;

    // ============================================================================
    // Provided methods
    // ============================================================================

    /// Full aggregate name (e.g. "a001_store")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Page id of the aggregate list page (e.g. "a001_store--list")
    fn list_page_id() -> String {
        format!("{}--list", Self::full_name())
    }
}
