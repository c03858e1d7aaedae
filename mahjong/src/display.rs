//! Text output for the interactive table

use mahjong_core::{format_hand, format_tiles, Hand};
use mahjong_engine::{Game, Settlement, TurnEvent, N_SEATS};
use mahjong_score::{max_score, visible_score};

pub fn print_hand(hand: &Hand) {
    print!("{}", hand);
}

/// Print an event. With a human seat, tiles drawn by other seats stay hidden.
pub fn print_event(event: &TurnEvent, human_seat: Option<usize>) {
    match *event {
        TurnEvent::Drew { seat, .. } if human_seat.is_some_and(|h| h != seat) => {
            println!("Player {} draws a tile", seat);
        }
        _ => println!("{}", event),
    }
}

/// Every seat's hand with its score. Without a human seat all hands are shown
/// in full; otherwise other seats show only their exposed tiles.
pub fn print_table(game: &Game, human_seat: Option<usize>) {
    let round = game.round();
    println!(
        "Round {} ({} wind), {} tiles left",
        game.round_number(),
        round.round_wind(),
        round.set().len()
    );
    for player in round.players() {
        let concealed = human_seat.is_some_and(|h| h != player.seat);
        let (shown, score) = if concealed {
            let visible = player.hand.visible_hand();
            let score = visible_score(&player.hand, round.round_wind(), player.seat_wind);
            (visible, score)
        } else {
            let score = max_score(&player.hand, round.round_wind(), player.seat_wind);
            (player.hand.clone(), score)
        };
        println!(
            "Player {} ({}, {}): {} | score {}",
            player.seat,
            player.seat_wind,
            game.policy_name(player.seat).unwrap_or("?"),
            format_hand(&shown),
            score
        );
    }
}

pub fn print_pile(game: &Game) {
    let discards = game.round().discards();
    if discards.is_empty() {
        println!("The discard pile is empty");
    } else {
        println!("Discards ({}): {}", discards.len(), format_tiles(discards.tiles()));
    }
}

pub fn print_settlement(settlement: &Settlement, game: &Game) {
    match settlement.outcome.winner() {
        Some(seat) => println!("Player {} wins round {}", seat, game.round_number()),
        None => println!("Round {} ends with the set exhausted", game.round_number()),
    }
    for (seat, breakdown) in settlement.breakdowns.iter().enumerate() {
        let bonuses: Vec<String> = breakdown.bonuses.iter().map(|b| b.to_string()).collect();
        println!(
            "  Player {}: {} -> {}{}",
            seat,
            breakdown.total,
            settlement.awarded[seat],
            if bonuses.is_empty() {
                String::new()
            } else {
                format!(" [{}]", bonuses.join(", "))
            }
        );
    }
    print_totals(game);
}

pub fn print_totals(game: &Game) {
    let scores = game.scores();
    let wins = game.wins();
    let totals: Vec<String> = (0..N_SEATS)
        .map(|seat| format!("P{} {} ({} wins)", seat, scores[seat], wins[seat]))
        .collect();
    println!("Totals: {}", totals.join(", "));
}
