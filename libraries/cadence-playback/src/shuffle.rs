//! Shuffle algorithms for track lists
//!
//! Fisher-Yates via `rand`: every permutation is equally likely.

use cadence_core::TrackId;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Shuffle a track list in place
pub fn shuffle(tracks: &mut [TrackId]) {
    shuffle_with_rng(tracks, &mut thread_rng());
}

/// Shuffle with a caller-provided RNG
pub fn shuffle_with_rng<R: Rng + ?Sized>(tracks: &mut [TrackId], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Shuffle so that `anchor` comes first
///
/// The remaining tracks are a uniformly random ordering of the rest. If
/// `anchor` is not in the list this is a plain shuffle.
pub fn shuffle_anchored(tracks: Vec<TrackId>, anchor: &TrackId) -> Vec<TrackId> {
    shuffle_anchored_with_rng(tracks, anchor, &mut thread_rng())
}

/// [`shuffle_anchored`] with a caller-provided RNG
pub fn shuffle_anchored_with_rng<R: Rng + ?Sized>(
    tracks: Vec<TrackId>,
    anchor: &TrackId,
    rng: &mut R,
) -> Vec<TrackId> {
    let (anchored, mut rest): (Vec<TrackId>, Vec<TrackId>) =
        tracks.into_iter().partition(|id| id == anchor);

    rest.shuffle(rng);

    let mut result = Vec::with_capacity(anchored.len() + rest.len());
    result.extend(anchored);
    result.extend(rest);
    result
}
