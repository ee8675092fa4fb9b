//! Seat order and dealer button movement.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::player::{Player, PlayerHandle, Seat};

/// Players who will be dealt the next hand, sorted clockwise by seat.
pub fn seat_order(players: &[Player]) -> Vec<PlayerHandle> {
    let mut seated: Vec<(Seat, PlayerHandle)> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_eligible())
        .filter_map(|(i, p)| p.seat().map(|s| (s, PlayerHandle(i))))
        .collect();
    seated.sort();
    seated.into_iter().map(|(_, h)| h).collect()
}

/// The first eligible player clockwise strictly after `seat`, wrapping
/// around the table. The player in `seat` itself comes last.
pub fn next_dealer(players: &[Player], seat: Seat) -> Option<PlayerHandle> {
    let order = seat_order(players);
    let seat_of = |h: &PlayerHandle| players[h.0].seat();
    order
        .iter()
        .find(|h| seat_of(h).is_some_and(|s| s > seat))
        .or_else(|| order.first())
        .copied()
}

pub fn random_dealer<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Option<PlayerHandle> {
    seat_order(players).choose(rng).copied()
}
