//! Summaries for clustered markers

use aq_core::Category;
use std::collections::HashMap;

use crate::marker::Marker;

/// The (up to) two most frequent categories among `markers`.
///
/// Ties go to the more severe category. `Unknown` only appears when there is
/// room left after every classified category.
pub fn dominant_categories(markers: &[Marker]) -> Vec<Category> {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for marker in markers {
        *counts.entry(marker.category).or_insert(0) += 1;
    }

    let mut ranked: Vec<(Category, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a, a_count), (b, b_count)| {
        a.is_known()
            .cmp(&b.is_known())
            .reverse()
            .then(b_count.cmp(a_count))
            .then(b.cmp(a))
    });

    ranked.into_iter().take(2).map(|(category, _)| category).collect()
}

/// Count badge text for a cluster showing two representatives: "3 + " for five
/// members, empty for two or fewer.
pub fn cluster_count_label(member_count: usize) -> String {
    if member_count > 2 {
        format!("{} + ", member_count - 2)
    } else {
        String::new()
    }
}
