use std::collections::{BTreeMap, btree_map::Entry};

use avafr_types::{ActivityRecord, MergedRecord, SleepRecord, UserDay};

/// Inner join of activity and sleep days on `(user_id, date)`.
///
/// Exact duplicate rows collapse to one. Two different rows for the same
/// key keep the first one seen. Days missing on either side are dropped.
/// The result is ordered by key, independent of input order.
pub fn merge(activity: &[ActivityRecord], sleep: &[SleepRecord]) -> Vec<MergedRecord> {
    let activity = dedup_by_key(activity, ActivityRecord::key, "activity");
    let sleep = dedup_by_key(sleep, SleepRecord::key, "sleep");

    let merged = activity
        .iter()
        .filter_map(|(key, activity)| {
            sleep
                .get(key)
                .map(|sleep| MergedRecord::join(activity, sleep))
        })
        .collect::<Vec<_>>();

    info!(
        "merged {} days ({} activity, {} sleep)",
        merged.len(),
        activity.len(),
        sleep.len()
    );

    merged
}

fn dedup_by_key<'a, T, K>(rows: &'a [T], key: K, source: &str) -> BTreeMap<UserDay, &'a T>
where
    T: PartialEq,
    K: Fn(&T) -> UserDay,
{
    let mut unique = BTreeMap::new();
    let mut duplicates = 0;

    for row in rows {
        match unique.entry(key(row)) {
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
            Entry::Occupied(entry) => {
                if *entry.get() != row {
                    warn!(
                        "conflicting {} rows for user {} on {}, keeping the first",
                        source,
                        entry.key().user_id,
                        entry.key().date
                    );
                }
                duplicates += 1;
            }
        }
    }

    if duplicates > 0 {
        debug!("dropped {} duplicate {} rows", duplicates, source);
    }

    unique
}
