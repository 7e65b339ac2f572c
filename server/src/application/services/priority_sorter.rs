//! Priority sorter (C7)
//!
//! Orders candidates within one bucket: remux first, then by the caller's
//! resolution preference, then by size. Stable, so provider order from C6
//! is the final tie-break.

use crate::domain::entities::TorrentCandidate;
use torrent_identifier::Resolution;

pub struct PrioritySorter;

impl PrioritySorter {
    /// `preference` is ordered most-wanted first; a resolution absent from
    /// it ranks after every resolution that is present.
    pub fn sort(candidates: &mut [TorrentCandidate], preference: &[Resolution]) {
        let rank = |res: Resolution| -> usize {
            preference.iter().position(|&p| p == res).unwrap_or(preference.len())
        };

        candidates.sort_by(|a, b| {
            let remux_rank = |c: &TorrentCandidate| !c.is_remux();
            remux_rank(a)
                .cmp(&remux_rank(b))
                .then_with(|| rank(a.parsed.resolution).cmp(&rank(b.parsed.resolution)))
                .then_with(|| b.size_bytes.cmp(&a.size_bytes))
        });
    }
}
