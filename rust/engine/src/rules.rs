use crate::errors::GameError;
use crate::player::BettingAction as A;

/// Chips each legal action actually moves from the stack into the pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    /// `chips` moved in total, `raise_by` on top of the call.
    Raise { chips: u32, raise_by: u32 },
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c) | ValidatedAction::Bet(c) => *c,
            ValidatedAction::Raise { chips, .. } => *chips,
        }
    }
}

/// What the acting player faces on the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WagerContext {
    /// Chips behind
    pub stack: u32,
    /// Chips needed to match the highest contribution this street
    pub to_call: u32,
    /// Highest contribution this street
    pub current_bet: u32,
    /// Size of the last bet or raise, if any
    pub last_raise: Option<u32>,
    pub big_blind: u32,
}

/// Validates a wagering action against the betting rules and the stack.
///
/// # Errors
///
/// - [`GameError::OutstandingBet`] - checking or opening when a bet is owed
/// - [`GameError::NoOutstandingBet`] - calling or raising with nothing to match
/// - [`GameError::NoChips`] - calling with an empty stack
/// - [`GameError::InsufficientChips`] - wagering more than the stack
/// - [`GameError::InvalidBetAmount`] - bet below the big blind, or raise
///   below the last raise, unless the player is all-in
///
/// # Examples
///
/// ```
/// use pokerroom_engine::player::BettingAction;
/// use pokerroom_engine::rules::{validate_action, ValidatedAction, WagerContext};
///
/// let ctx = WagerContext { stack: 60, to_call: 100, current_bet: 100, last_raise: Some(100), big_blind: 20 };
/// // a short stack calls all-in for less
/// assert_eq!(validate_action(&ctx, BettingAction::Call), Ok(ValidatedAction::Call(60)));
/// ```
pub fn validate_action(ctx: &WagerContext, action: A) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check | A::Bet(0) => {
            if ctx.to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::OutstandingBet {
                    to_call: ctx.to_call,
                })
            }
        }
        A::Call => {
            if ctx.current_bet == 0 || ctx.to_call == 0 {
                return Err(GameError::NoOutstandingBet);
            }
            if ctx.stack == 0 {
                return Err(GameError::NoChips);
            }
            Ok(ValidatedAction::Call(ctx.to_call.min(ctx.stack)))
        }
        A::Bet(amount) => {
            if ctx.current_bet > 0 {
                return Err(GameError::OutstandingBet {
                    to_call: ctx.to_call,
                });
            }
            if amount > ctx.stack {
                return Err(GameError::InsufficientChips {
                    needed: amount,
                    stack: ctx.stack,
                });
            }
            if amount < ctx.big_blind && amount != ctx.stack {
                return Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: ctx.big_blind,
                });
            }
            Ok(ValidatedAction::Bet(amount))
        }
        A::Raise(amount) => {
            let last_raise = match ctx.last_raise {
                Some(size) if ctx.current_bet > 0 => size,
                _ => return Err(GameError::NoOutstandingBet),
            };
            let chips = ctx
                .to_call
                .checked_add(amount)
                .ok_or(GameError::InsufficientChips {
                    needed: u32::MAX,
                    stack: ctx.stack,
                })?;
            if chips > ctx.stack {
                return Err(GameError::InsufficientChips {
                    needed: chips,
                    stack: ctx.stack,
                });
            }
            let all_in = chips == ctx.stack;
            if amount == 0 || (amount < last_raise && !all_in) {
                return Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: last_raise,
                });
            }
            Ok(ValidatedAction::Raise {
                chips,
                raise_by: amount,
            })
        }
    }
}
