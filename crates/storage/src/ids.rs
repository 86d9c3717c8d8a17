//! In-place edits of id lists
//!
//! Both helpers act on the first occurrence only and report the position it
//! was found at, `None` when the id is not in the list.

use normstore_core::RecordId;

/// Remove the first occurrence of `id`
pub fn remove_id(ids: &mut Vec<RecordId>, id: &RecordId) -> Option<usize> {
    let position = ids.iter().position(|candidate| candidate == id)?;
    ids.remove(position);
    Some(position)
}

/// Move the first occurrence of `id` to the tail
pub fn move_to_end(ids: &mut Vec<RecordId>, id: &RecordId) -> Option<usize> {
    let position = remove_id(ids, id)?;
    ids.push(id.clone());
    Some(position)
}
