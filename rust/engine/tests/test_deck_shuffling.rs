use std::collections::HashSet;

use pokerroom_engine::cards::{parse_cards, Card};
use pokerroom_engine::deck::Deck;

#[test]
fn reshuffling_restores_all_52_cards() {
    let mut deck = Deck::shuffled(42);
    deck.deal_card();
    deck.shuffle();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        deck.deal_card().is_none(),
        "after 52 cards, deck should be empty"
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
    assert_eq!(d1.seed(), Some(12345));
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffled_deck_is_a_seeded_permutation() {
    let mut deck = Deck::shuffled(77);
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deck.seed(), Some(77));

    let mut by_hand = Deck::new_with_seed(77);
    by_hand.shuffle();
    assert_eq!(deck.deal_card(), by_hand.deal_card());

    let dealt: HashSet<Card> = (0..51).filter_map(|_| deck.deal_card()).collect();
    assert_eq!(dealt.len(), 51);
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn staged_deck_deals_in_the_given_order() {
    let order = parse_cards("AS KD 2C").unwrap();
    let mut deck = Deck::from_cards(order.clone());
    assert_eq!(deck.remaining(), 3);
    let dealt: Vec<Card> = (0..3).filter_map(|_| deck.deal_card()).collect();
    assert_eq!(dealt, order);
    assert_eq!(deck.deal_card(), None);
    assert_eq!(deck.seed(), None);
}
