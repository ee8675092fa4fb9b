//! Best-hand selection and hand ranking.
//!
//! Every `category` function returns the (at most) five cards making the hand,
//! ordered for comparison:
//!
//! - straight flush / straight: highest to lowest; the wheel is `5 4 3 2 A`
//! - four of a kind: the four cards, then the kicker
//! - full house: the three of a kind, then the pair
//! - flush / high card: highest to lowest
//! - three of a kind, two pair, pair: the sets, then kickers high to low
//!
//! Cards of equal rank are listed spades, hearts, diamonds, clubs. A category
//! function assumes every stronger category was already ruled out; called on
//! cards holding a better hand its answer is unspecified.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// A made hand: its category plus the cards that make it, in tie-break order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandQuality {
    pub category: Category,
    pub cards: Vec<Card>,
}

impl HandQuality {
    fn new(category: Category, cards: Vec<Card>) -> Self {
        Self { category, cards }
    }

    /// Rank values in tie-break order. The Ace of a wheel counts as 1.
    pub fn tiebreak(&self) -> Vec<u8> {
        let mut ranks: Vec<u8> = self.cards.iter().map(|c| c.rank.value()).collect();
        let is_straight = matches!(
            self.category,
            Category::Straight | Category::StraightFlush
        );
        if is_straight && ranks.first() == Some(&5) {
            if let Some(last) = ranks.last_mut() {
                if *last == 14 {
                    *last = 1;
                }
            }
        }
        ranks
    }
}

/// Strength comparison: category first, then the tie-break ranks. Suits never
/// matter, so two hands may compare `Equal` while holding different cards.
pub fn compare_hands(a: &HandQuality, b: &HandQuality) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak().cmp(&b.tiebreak()),
        ord => ord,
    }
}

/// Best hand among 2 to 7 distinct cards.
pub fn best_hand(cards: &[Card]) -> HandQuality {
    debug_assert!(
        (2..=7).contains(&cards.len()),
        "best_hand expects 2..=7 cards, got {}",
        cards.len()
    );

    straight_flush(cards)
        .or_else(|| four_of_a_kind(cards))
        .or_else(|| full_house(cards))
        .or_else(|| flush(cards))
        .or_else(|| straight(cards))
        .or_else(|| three_of_a_kind(cards))
        .or_else(|| two_pair(cards))
        .or_else(|| pair(cards))
        .unwrap_or_else(|| high_card(cards))
}

pub fn straight_flush(cards: &[Card]) -> Option<HandQuality> {
    let suited = chunk_by_suit(cards).into_iter().find(|g| g.len() >= 5)?;
    let run = straight(&suited)?;
    Some(HandQuality::new(Category::StraightFlush, run.cards))
}

pub fn four_of_a_kind(cards: &[Card]) -> Option<HandQuality> {
    let quads = chunk_by_rank(cards).into_iter().find(|g| g.len() == 4)?;
    let mut made = quads.clone();
    made.extend(extra_cards(cards, 1, &quads));
    Some(HandQuality::new(Category::FourOfAKind, made))
}

pub fn full_house(cards: &[Card]) -> Option<HandQuality> {
    let chunks = chunk_by_rank(cards);
    let trips = chunks.iter().find(|g| g.len() >= 3)?;
    let pair = chunks
        .iter()
        .find(|g| g.len() >= 2 && g[0].rank != trips[0].rank)?;
    let mut made: Vec<Card> = trips.iter().take(3).copied().collect();
    made.extend(pair.iter().take(2));
    Some(HandQuality::new(Category::FullHouse, made))
}

pub fn flush(cards: &[Card]) -> Option<HandQuality> {
    let suited = chunk_by_suit(cards).into_iter().find(|g| g.len() >= 5)?;
    Some(HandQuality::new(
        Category::Flush,
        suited.into_iter().take(5).collect(),
    ))
}

pub fn straight(cards: &[Card]) -> Option<HandQuality> {
    let chunks = chunk_by_rank(cards);
    if chunks.len() < 5 {
        return None;
    }

    // One representative per rank, highest first, plus a low ace when present.
    let mut highs: Vec<(u8, Card)> = chunks.iter().map(|g| (g[0].rank.value(), g[0])).collect();
    if let Some(&(14, ace)) = highs.first() {
        highs.push((1, ace));
    }

    for len in 5..=8 {
        if highs.len() < len {
            break;
        }
        let window = &highs[len - 5..len];
        if window[0].0 - window[4].0 == 4 {
            return Some(HandQuality::new(
                Category::Straight,
                window.iter().map(|&(_, c)| c).collect(),
            ));
        }
    }
    None
}

pub fn three_of_a_kind(cards: &[Card]) -> Option<HandQuality> {
    let trips = chunk_by_rank(cards).into_iter().find(|g| g.len() == 3)?;
    let mut made = trips.clone();
    made.extend(extra_cards(cards, 2, &trips));
    Some(HandQuality::new(Category::ThreeOfAKind, made))
}

pub fn two_pair(cards: &[Card]) -> Option<HandQuality> {
    let pairs: Vec<Vec<Card>> = chunk_by_rank(cards)
        .into_iter()
        .filter(|g| g.len() == 2)
        .take(2)
        .collect();
    if pairs.len() != 2 {
        return None;
    }
    let mut made: Vec<Card> = pairs.concat();
    let kicker = extra_cards(cards, 1, &made);
    made.extend(kicker);
    Some(HandQuality::new(Category::TwoPair, made))
}

pub fn pair(cards: &[Card]) -> Option<HandQuality> {
    let pair = chunk_by_rank(cards).into_iter().find(|g| g.len() == 2)?;
    let mut made = pair.clone();
    made.extend(extra_cards(cards, 3, &pair));
    Some(HandQuality::new(Category::Pair, made))
}

pub fn high_card(cards: &[Card]) -> HandQuality {
    HandQuality::new(
        Category::HighCard,
        sort_by_rank(cards).into_iter().take(5).collect(),
    )
}

/// One entrant of a showdown: its position in the input and its best hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedHand {
    pub index: usize,
    pub quality: HandQuality,
}

/// Ranks several hands into equivalence classes, strongest class first.
///
/// Entrants inside a class are exactly tied (same category and tie-break
/// ranks) and are kept in input order. A class with more than one member is a
/// split pot.
pub fn winners(hands: &[Vec<Card>]) -> Vec<Vec<RankedHand>> {
    let mut ranked: Vec<RankedHand> = hands
        .iter()
        .enumerate()
        .map(|(index, cards)| RankedHand {
            index,
            quality: best_hand(cards),
        })
        .collect();
    ranked.sort_by(|a, b| compare_hands(&b.quality, &a.quality));

    let mut classes: Vec<Vec<RankedHand>> = Vec::new();
    for entry in ranked {
        match classes.last_mut() {
            Some(class) if compare_hands(&class[0].quality, &entry.quality).is_eq() => {
                class.push(entry)
            }
            _ => classes.push(vec![entry]),
        }
    }
    classes
}

/// [`winners`] for hold'em: each entrant's two hole cards plus the shared board.
pub fn showdown(holes: &[[Card; 2]], board: &[Card]) -> Vec<Vec<RankedHand>> {
    let hands: Vec<Vec<Card>> = holes
        .iter()
        .map(|hole| hole.iter().chain(board).copied().collect())
        .collect();
    winners(&hands)
}

// rank descending, then spades, hearts, diamonds, clubs
fn display_order(a: &Card, b: &Card) -> Ordering {
    b.rank.cmp(&a.rank).then(b.suit.cmp(&a.suit))
}

fn sort_by_rank(cards: &[Card]) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort_by(display_order);
    v
}

fn chunk_by_rank(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for card in sort_by_rank(cards) {
        match groups.last_mut() {
            Some(group) if group[0].rank == card.rank => group.push(card),
            _ => groups.push(vec![card]),
        }
    }
    groups
}

fn chunk_by_suit(cards: &[Card]) -> Vec<Vec<Card>> {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
        .iter()
        .map(|&suit| {
            let same: Vec<Card> = cards.iter().copied().filter(|c| c.suit == suit).collect();
            sort_by_rank(&same)
        })
        .filter(|group| !group.is_empty())
        .collect()
}

fn extra_cards(cards: &[Card], amount: usize, exclude: &[Card]) -> Vec<Card> {
    let rest: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|c| !exclude.contains(c))
        .collect();
    sort_by_rank(&rest).into_iter().take(amount).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn chunks_group_ranks_high_to_low_with_suit_order() {
        let cards = parse_cards("AD 4H JD QH AC").unwrap();
        let chunks = chunk_by_rank(&cards);
        assert_eq!(chunks[0], parse_cards("AD AC").unwrap());
        assert_eq!(chunks[1], parse_cards("QH").unwrap());
        assert_eq!(chunks.len(), 4);
    }

    #[test]
    fn suit_chunks_list_spades_first() {
        let cards = parse_cards("AD 4H JD QH AC").unwrap();
        let chunks = chunk_by_suit(&cards);
        assert_eq!(chunks[0], parse_cards("QH 4H").unwrap());
        assert_eq!(chunks[1], parse_cards("AD JD").unwrap());
        assert_eq!(chunks[2], parse_cards("AC").unwrap());
    }

    #[test]
    fn wheel_tiebreak_treats_ace_as_one() {
        let wheel = straight(&parse_cards("AS 2D 3C 4H 5S").unwrap()).unwrap();
        assert_eq!(wheel.tiebreak(), vec![5, 4, 3, 2, 1]);
        let six_high = straight(&parse_cards("6S 2D 3C 4H 5S").unwrap()).unwrap();
        assert!(compare_hands(&six_high, &wheel).is_gt());
    }
}
