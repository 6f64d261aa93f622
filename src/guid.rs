use uuid::Uuid;

/// Returns a new, randomly generated globally unique identifier.
///
/// The identifier is a version 4 UUID in the braced, upper-case form used by E57 files, e.g.
/// `{2F1E0A54-4C7B-4B53-9E0D-7F6A2C1B8E33}`.
///
/// # Examples
///
/// ```
/// let guid = e57_simple::new_guid();
/// assert_eq!(38, guid.len());
/// assert!(guid.starts_with('{'));
/// assert_ne!(guid, e57_simple::new_guid());
/// ```
pub fn new_guid() -> String {
    Uuid::new_v4().braced().to_string().to_uppercase()
}
