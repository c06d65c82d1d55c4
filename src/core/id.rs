//! Short identifiers for studios, cycles and workouts.

use uuid::Uuid;

/// Length of generated identifiers.
const ID_LEN: usize = 9;

/// Generate a short random identifier (9 lowercase hex characters).
pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
