//! Ordered post sequence maintenance.

use std::collections::HashSet;

use crate::models::Post;

/// Sort posts by position and drop repeated `post_id`s, keeping the first.
pub fn normalize(posts: &mut Vec<Post>) {
    let mut seen = HashSet::with_capacity(posts.len());
    posts.retain(|p| seen.insert(p.post_id));
    posts.sort_by_key(|p| p.position);
}

/// Append a fetched page to an ordered sequence.
///
/// Posts whose id is already present are skipped. The result stays
/// ordered by `position`; the sort is stable so equal positions keep
/// arrival order. Returns how many posts were added.
pub fn merge_page(existing: &mut Vec<Post>, page: Vec<Post>) -> usize {
    let mut seen: HashSet<u32> = existing.iter().map(|p| p.post_id).collect();
    let before = existing.len();

    existing.extend(page.into_iter().filter(|p| seen.insert(p.post_id)));

    let added = existing.len() - before;
    if added > 0 {
        existing.sort_by_key(|p| p.position);
    }
    added
}
