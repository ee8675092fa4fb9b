use crate::player::PlayerHandle;

/// Splits `pot` evenly among `winners`.
///
/// `winners` must be in payout order (seat order starting left of the
/// dealer); leftover chips go one each to the earliest winners. The shares
/// always sum to `pot`. No winners means nobody is paid.
///
/// ```
/// use pokerroom_engine::player::PlayerHandle;
/// use pokerroom_engine::pot::split_pot;
///
/// let shares = split_pot(25, &[PlayerHandle(2), PlayerHandle(0)]);
/// assert_eq!(shares, vec![(PlayerHandle(2), 13), (PlayerHandle(0), 12)]);
/// ```
pub fn split_pot(pot: u32, winners: &[PlayerHandle]) -> Vec<(PlayerHandle, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let count = winners.len() as u32;
    let share = pot / count;
    let remainder = (pot % count) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &h)| (h, share + u32::from(i < remainder)))
        .collect()
}
