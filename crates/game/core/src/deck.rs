//! Deck and hand randomization.
//!
//! Decks are bags of card codes. Draws remove a uniformly random unit, so a
//! card is never drawn twice.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::state::CardCode;

/// Builds a shuffled deck holding `copies` units of every code.
pub fn build_deck<R: Rng + ?Sized>(codes: &[CardCode], copies: usize, rng: &mut R) -> Vec<CardCode> {
    let mut deck: Vec<CardCode> = codes
        .iter()
        .flat_map(|code| std::iter::repeat_n(code.clone(), copies))
        .collect();
    deck.shuffle(rng);
    deck
}

/// Removes one uniformly random unit from `deck`.
pub fn draw_random<R: Rng + ?Sized>(deck: &mut Vec<CardCode>, rng: &mut R) -> Option<CardCode> {
    if deck.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..deck.len());
    Some(deck.remove(index))
}

/// Draws up to `count` cards; fewer if the deck runs out.
pub fn deal<R: Rng + ?Sized>(deck: &mut Vec<CardCode>, count: usize, rng: &mut R) -> Vec<CardCode> {
    (0..count).map_while(|_| draw_random(deck, rng)).collect()
}

/// Picks a uniformly random card without removing it.
pub fn pick_random<'c, R: Rng + ?Sized>(cards: &'c [CardCode], rng: &mut R) -> Option<&'c CardCode> {
    cards.choose(rng)
}
