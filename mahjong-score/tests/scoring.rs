use mahjong_core::{parse_hand, Hand, Wind};
use mahjong_score::{max_score, round_end_score, visible_score, Score, SCORE_CAP};

/// Reveal the first pong of a hand
fn with_first_pong_revealed(hand: &Hand) -> Hand {
    let pong = hand.melds().pongs[0].clone();
    let mut revealed = hand.clone();
    revealed.reveal(&pong.positions);
    revealed
}

#[test]
fn test_revealing_numeric_pong_raises_base() {
    let hand = parse_hand("c4 c4 c4 b1 b2 b3").unwrap();
    let before = max_score(&hand, Wind::East, Wind::East);
    let after = max_score(&with_first_pong_revealed(&hand), Wind::East, Wind::East);
    assert_eq!(before, Score::new(4, 0));
    assert_eq!(after, Score::new(8, 0));
}

#[test]
fn test_revealing_never_lowers_base() {
    let hands = [
        "k2 k2 k2 k5 k6 k7 dr dr",
        "ws ws ws c1 c1",
        "dg dg dg b9 b9 b9 we we",
    ];
    for text in hands {
        let hand = parse_hand(text).unwrap();
        for (round, seat) in [(Wind::East, Wind::South), (Wind::South, Wind::South)] {
            let before = max_score(&hand, round, seat);
            let after = max_score(&with_first_pong_revealed(&hand), round, seat);
            assert!(after.base >= before.base, "{}: {:?} -> {:?}", text, before, after);
        }
    }
}

#[test]
fn test_visible_score_of_concealed_hand_is_zero() {
    let hand = parse_hand("c1 c2 c3 b4 b5 b6 k7 k8 k9 we we we dr dr").unwrap();
    assert_eq!(visible_score(&hand, Wind::East, Wind::East), Score::ZERO);
}

#[test]
fn test_winner_total_includes_bonuses() {
    let hand = parse_hand("c1 c2 c3 b4 b5 b6 k7 k8 k9 we we we dr dr").unwrap();
    let loser = round_end_score(&hand, Wind::South, Wind::West, false);
    let winner = round_end_score(&hand, Wind::South, Wind::West, true);

    // Concealed: +20 Mahjong, +20 concealed
    assert_eq!(winner.total.base, loser.total.base + 40);
    assert_eq!(winner.total.exponent, loser.total.exponent);
    assert!(winner.capped(SCORE_CAP) <= SCORE_CAP);
}
