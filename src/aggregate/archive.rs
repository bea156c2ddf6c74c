//! Chronological archive buckets

use std::collections::BTreeMap;

use crate::article::{ArchiveBucket, ArticleSummary};

/// Bucket articles by (creation year, month), newest bucket first.
///
/// Every input article lands in exactly one bucket and bucket members
/// keep their input order, which is already the display order from the
/// source query.
pub fn group_by_month(articles: Vec<ArticleSummary>) -> Vec<ArchiveBucket> {
    use chrono::Datelike;

    let mut buckets: BTreeMap<(i32, u32), Vec<ArticleSummary>> = BTreeMap::new();
    for article in articles {
        let key = (article.created_at.year(), article.created_at.month());
        buckets.entry(key).or_default().push(article);
    }

    buckets
        .into_iter()
        .rev()
        .map(|((year, month), articles)| ArchiveBucket {
            year,
            month,
            articles,
        })
        .collect()
}
