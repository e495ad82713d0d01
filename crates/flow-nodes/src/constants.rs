//! Default values seeded into new nodes

/// Status code of a fresh Output node
pub const DEFAULT_STATUS: u16 = 200;

pub mod mongo {
    /// Documents returned by a query when no limit is given
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const DEFAULT_QUERY: &str = "deleted == false";
    pub const DEFAULT_DATABASE: &str = "rules";
    pub const DEFAULT_COLLECTION: &str = "cache";
}
