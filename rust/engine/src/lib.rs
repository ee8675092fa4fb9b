//! # pokerroom-engine: Texas Hold'em table rules
//!
//! The rules side of a multiplayer no-limit Hold'em table for two to nine
//! players: hand evaluation, the per-street betting state machine and the
//! hand lifecycle from blinds to payout. Transport, rooms and presentation
//! live elsewhere; this crate is synchronous and does no I/O apart from the
//! optional hand-history file.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded Fisher-Yates shuffling with ChaCha20
//! - [`hand`] - Best five-card hand selection and showdown ranking
//! - [`rules`] - Legality of a single wagering action
//! - [`betting`] - One street of betting: contributions and turn order
//! - [`round`] - One hand: dealing, streets, showdown and payout
//! - [`engine`] - The table: seats, dealer button, starting and ending hands
//! - [`game`] - Seat order and dealer rotation
//! - [`pot`] - Splitting a pot between tied winners
//! - [`logger`] - Hand history records written as JSON lines
//! - [`errors`] - Why a request was refused
//!
//! ## Quick Start
//!
//! ```rust
//! use pokerroom_engine::cards::parse_cards;
//! use pokerroom_engine::hand::{best_hand, Category};
//!
//! let cards = parse_cards("10C JD 4C JC 9C 7C 8C").unwrap();
//! let best = best_hand(&cards);
//! assert_eq!(best.category, Category::StraightFlush);
//! assert_eq!(best.cards, parse_cards("JC 10C 9C 8C 7C").unwrap());
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use pokerroom_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod round;
pub mod rules;
