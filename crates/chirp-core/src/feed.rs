//! Feed assembly
//!
//! A feed is built in three steps: fetch posts for the viewer's author set,
//! resolve author profiles for the distinct author ids, then attach the
//! viewer's like state. The functions here are the pure parts of that
//! pipeline; the I/O is done by the service layer through the repository
//! traits.

use std::collections::{HashMap, HashSet};

use crate::entities::{AuthorProfile, FeedPost, PostWithCounts, Profile};
use crate::value_objects::Snowflake;

/// Viewer plus everyone they follow, deduplicated, viewer first
pub fn author_set(viewer_id: Snowflake, following: &[Snowflake]) -> Vec<Snowflake> {
    let mut seen = HashSet::with_capacity(following.len() + 1);
    std::iter::once(viewer_id)
        .chain(following.iter().copied())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Distinct ids in first-seen order
pub fn distinct_ids<I>(ids: I) -> Vec<Snowflake>
where
    I: IntoIterator<Item = Snowflake>,
{
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Map every requested id to an author, falling back to the
/// "Unknown User" placeholder for ids missing from `found`.
pub fn resolve_authors(ids: &[Snowflake], found: &[Profile]) -> HashMap<Snowflake, AuthorProfile> {
    let mut authors: HashMap<Snowflake, AuthorProfile> = found
        .iter()
        .map(|profile| (profile.id, AuthorProfile::from(profile)))
        .collect();

    for id in ids {
        authors
            .entry(*id)
            .or_insert_with(|| AuthorProfile::unknown(*id));
    }
    authors
}

/// Join posts with their authors and the viewer's liked set, keeping post order
pub fn assemble_feed(
    posts: Vec<PostWithCounts>,
    authors: &HashMap<Snowflake, AuthorProfile>,
    liked: &HashSet<Snowflake>,
) -> Vec<FeedPost> {
    posts
        .into_iter()
        .map(|item| {
            let author = authors
                .get(&item.post.user_id)
                .cloned()
                .unwrap_or_else(|| AuthorProfile::unknown(item.post.user_id));
            let liked_by_viewer = liked.contains(&item.post.id);

            FeedPost {
                author,
                likes_count: item.likes_count,
                comments_count: item.comments_count,
                liked_by_viewer,
                post: item.post,
            }
        })
        .collect()
}
