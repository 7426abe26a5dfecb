//! Author aggregation.
//!
//! Events are appended to their author's list in arrival order. Nothing is
//! sorted here; the sequence builder sorts each finished list once.

use std::collections::HashMap;

use rayon::prelude::*;

use mobility_model::PublicationEvent;

/// Deterministic shard selection for an author identifier.
pub fn shard_for(author_id: &str, shards: usize) -> usize {
    // 64-bit FNV-1a keeps shard assignment stable across runs and toolchains.
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let hash = author_id.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    });
    (hash % shards.max(1) as u64) as usize
}

/// Events collected for one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEvents {
    pub author_id: String,
    /// Input position of the author's first accepted row.
    pub first_seen: u64,
    /// Events in arrival order.
    pub events: Vec<PublicationEvent>,
}

/// Single-threaded reducer owning the growing per-author lists.
#[derive(Debug, Default)]
pub struct AuthorAggregator {
    index: HashMap<String, usize>,
    authors: Vec<AuthorEvents>,
    events: u64,
}

impl AuthorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event`, seen at input position `position`.
    pub fn push(&mut self, position: u64, event: PublicationEvent) {
        self.events += 1;
        if let Some(&slot) = self.index.get(event.author_id.as_str()) {
            self.authors[slot].events.push(event);
            return;
        }
        let slot = self.authors.len();
        self.index.insert(event.author_id.clone(), slot);
        self.authors.push(AuthorEvents {
            author_id: event.author_id.clone(),
            first_seen: position,
            events: vec![event],
        });
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn event_count(&self) -> u64 {
        self.events
    }

    /// Hand over the collected lists in first-seen order.
    pub fn into_authors(self) -> Vec<AuthorEvents> {
        self.authors
    }
}

/// Hash-partitioned aggregation across independent single-threaded shards.
///
/// Each author lives in exactly one shard, so per-author arrival order is
/// the same as with a single reducer.
#[derive(Debug)]
pub struct ShardedAggregator {
    shards: Vec<AuthorAggregator>,
}

impl ShardedAggregator {
    pub fn new(shards: usize) -> Self {
        Self {
            shards: (0..shards.max(1)).map(|_| AuthorAggregator::new()).collect(),
        }
    }

    /// Append a batch of positioned events.
    ///
    /// The batch is partitioned by shard first, then every shard consumes its
    /// partition on its own worker.
    pub fn push_batch(&mut self, events: Vec<(u64, PublicationEvent)>) {
        if let [shard] = self.shards.as_mut_slice() {
            for (position, event) in events {
                shard.push(position, event);
            }
            return;
        }
        let count = self.shards.len();
        let mut partitions: Vec<Vec<(u64, PublicationEvent)>> =
            (0..count).map(|_| Vec::new()).collect();
        for (position, event) in events {
            partitions[shard_for(&event.author_id, count)].push((position, event));
        }
        self.shards
            .par_iter_mut()
            .zip(partitions.into_par_iter())
            .for_each(|(shard, partition)| {
                for (position, event) in partition {
                    shard.push(position, event);
                }
            });
    }

    pub fn author_count(&self) -> usize {
        self.shards.iter().map(AuthorAggregator::author_count).sum()
    }

    pub fn event_count(&self) -> u64 {
        self.shards.iter().map(AuthorAggregator::event_count).sum()
    }

    /// Merge all shards, ordering authors by first appearance in the input.
    pub fn finish(self) -> Vec<AuthorEvents> {
        let mut authors: Vec<AuthorEvents> = self
            .shards
            .into_iter()
            .flat_map(AuthorAggregator::into_authors)
            .collect();
        authors.sort_by_key(|author| author.first_seen);
        authors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobility_model::CountryField;

    fn event(author: &str, year: i32, countries: &str) -> PublicationEvent {
        PublicationEvent::new(author, year, CountryField::parse_serialized(countries))
    }

    #[test]
    fn groups_in_arrival_order() {
        let mut aggregator = AuthorAggregator::new();
        aggregator.push(0, event("A1", 2005, "FR"));
        aggregator.push(1, event("A2", 2001, "US"));
        aggregator.push(2, event("A1", 2001, "DE"));
        assert_eq!(aggregator.author_count(), 2);
        assert_eq!(aggregator.event_count(), 3);

        let authors = aggregator.into_authors();
        assert_eq!(authors[0].author_id, "A1");
        assert_eq!(authors[0].first_seen, 0);
        let years: Vec<i32> = authors[0].events.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2005, 2001]);
        assert_eq!(authors[1].author_id, "A2");
        assert_eq!(authors[1].first_seen, 1);
    }

    #[test]
    fn shard_assignment_is_stable() {
        assert_eq!(shard_for("A5000002327", 8), shard_for("A5000002327", 8));
        assert!(shard_for("A5000002327", 8) < 8);
        assert_eq!(shard_for("anything", 1), 0);
        assert_eq!(shard_for("anything", 0), 0);
    }

    #[test]
    fn sharded_matches_single_reducer() {
        let events: Vec<(u64, PublicationEvent)> = (0..200u64)
            .map(|i| {
                let author = format!("A{}", i % 17);
                (i, event(&author, 2000 + (i % 7) as i32, "FR"))
            })
            .collect();

        let mut single = AuthorAggregator::new();
        for (position, event) in events.clone() {
            single.push(position, event);
        }
        let expected = single.into_authors();

        for shards in [1, 2, 3, 8] {
            let mut sharded = ShardedAggregator::new(shards);
            for chunk in events.chunks(13) {
                sharded.push_batch(chunk.to_vec());
            }
            assert_eq!(sharded.author_count(), 17);
            assert_eq!(sharded.event_count(), 200);
            assert_eq!(sharded.finish(), expected, "shards = {shards}");
        }
    }
}
