//! Record identifiers.
//!
//! Every table keys its rows by an opaque text id. New ids are UUIDv7 so
//! that rows sort by creation time; callers never rely on the format and
//! lookups with arbitrary strings simply miss.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a new record id in its stored text form.
pub fn new_id() -> String {
    uuidv7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuidv7_is_valid() {
        let id = uuidv7();
        assert_eq!(id.get_version(), Some(uuid::Version::SortRand));
    }

    #[test]
    fn new_ids_are_distinct_and_sortable() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(b >= a);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
