//! Snapshots of a room as clients see them.
//!
//! [`GameStateView`] goes to everyone and carries only public information:
//! no secret ids and no hole cards. [`PlayerStateView`] goes to one player
//! and carries their own cards.

use pokerroom_engine::betting::{BettingRound, Contribution};
use pokerroom_engine::cards::Card;
use pokerroom_engine::engine::Engine;
use pokerroom_engine::hand::Category;
use pokerroom_engine::player::{Player, PlayerHandle, Seat};
use pokerroom_engine::round::{Phase, Round, RoundSummary};
use serde::Serialize;

use crate::settings::TableSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayer {
    pub public_id: String,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub table_position: Option<Seat>,
    pub is_connected: bool,
    pub is_away: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chips: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionView {
    pub player_id: String,
    pub contribution: Contribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingRoundView {
    pub current_trick_starting_player_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_raiser_player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_raise: Option<u32>,
    pub current_bet: u32,
    pub contributions: Vec<ContributionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerView {
    pub player_id: String,
    pub amount: u32,
    /// Absent when everyone else folded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub round_ended: bool,
    pub phase: Phase,
    pub community: Vec<Card>,
    pub pot: u32,
    pub folded_players: Vec<String>,
    pub dealer_player_id: String,
    pub small_blind_player_id: String,
    pub big_blind_player_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_turn_player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betting_round: Option<BettingRoundView>,
    pub winners: Vec<WinnerView>,
    pub big_blind: u32,
    pub small_blind: u32,
}

/// One chat line. `time` is unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageEntry {
    pub public_player_id: String,
    pub time: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub max_name_length: usize,
    pub min_name_length: usize,
    pub max_initial_chip_count: u32,
    pub min_initial_chip_count: u32,
    pub max_text_message_length: usize,
    pub players: Vec<PublicPlayer>,
    pub text_message_history: Vec<TextMessageEntry>,
    pub game_started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
    pub big_blind: u32,
    pub small_blind: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<[Card; 2]>,
    pub is_leader: bool,
    pub is_connected: bool,
    pub is_away: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chips: Option<u32>,
}

impl PublicPlayer {
    fn from_player(p: &Player) -> Self {
        Self {
            public_id: p.public_id().to_string(),
            guest_name: p.guest_name().to_string(),
            name: p.name().map(str::to_string),
            table_position: p.seat(),
            is_connected: p.is_connected(),
            is_away: p.is_away(),
            chips: p.chips(),
        }
    }
}

impl PlayerStateView {
    pub fn from_player(p: &Player) -> Self {
        Self {
            hand: p.hole_cards(),
            is_leader: p.is_leader(),
            is_connected: p.is_connected(),
            is_away: p.is_away(),
            chips: p.chips(),
        }
    }
}

impl GameStateView {
    pub fn build(engine: &Engine, settings: &TableSettings, chat: &[TextMessageEntry]) -> Self {
        let players = engine.players();
        Self {
            max_name_length: settings.max_name_length,
            min_name_length: settings.min_name_length,
            max_initial_chip_count: settings.max_initial_chips,
            min_initial_chip_count: settings.min_initial_chips,
            max_text_message_length: settings.max_text_message_length,
            players: players.iter().map(PublicPlayer::from_player).collect(),
            text_message_history: chat.to_vec(),
            game_started: engine.game_started(),
            round: engine.round().map(|r| RoundView::build(r, players)),
            big_blind: engine.big_blind(),
            small_blind: engine.small_blind(),
        }
    }
}

impl RoundView {
    fn build(round: &Round, players: &[Player]) -> Self {
        let id = |h: PlayerHandle| players[h.0].public_id().to_string();
        Self {
            round_ended: round.is_complete(),
            phase: round.phase(),
            community: round.community().to_vec(),
            pot: round.pot(),
            folded_players: round.folded().iter().map(|&h| id(h)).collect(),
            dealer_player_id: id(round.dealer()),
            small_blind_player_id: id(round.small_blind_player()),
            big_blind_player_id: id(round.big_blind_player()),
            current_turn_player_id: round.current_turn().map(id),
            betting_round: round.betting().map(|b| betting_view(b, &id)),
            winners: round.summary().map(|s| winners(s, &id)).unwrap_or_default(),
            big_blind: round.big_blind(),
            small_blind: round.big_blind() / 2,
        }
    }
}

fn betting_view(b: &BettingRound, id: &impl Fn(PlayerHandle) -> String) -> BettingRoundView {
    BettingRoundView {
        current_trick_starting_player_id: id(b.starting_player()),
        last_raiser_player_id: b.last_raiser().map(id),
        last_raise: b.last_raise(),
        current_bet: b.current_bet(),
        contributions: b
            .contributions()
            .map(|(h, contribution)| ContributionView {
                player_id: id(h),
                contribution,
            })
            .collect(),
    }
}

fn winners(summary: &RoundSummary, id: &impl Fn(PlayerHandle) -> String) -> Vec<WinnerView> {
    summary
        .payouts
        .iter()
        .map(|p| WinnerView {
            player_id: id(p.player),
            amount: p.amount,
            category: p.hand.as_ref().map(|q| q.category),
        })
        .collect()
}
