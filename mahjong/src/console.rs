//! Human decisions read from the terminal

use crate::display::print_hand;
use mahjong_engine::{DecisionKind, PickupAction, Policy, StateView};
use std::io::{self, BufRead, Write};

/// Prompts on stdout and reads the choice from stdin.
///
/// Invalid input is reported and asked again. At end of input the first
/// option is taken.
#[derive(Debug, Default)]
pub struct ConsolePolicy;

impl ConsolePolicy {
    fn describe(kind: DecisionKind, option: usize, state: &StateView) -> String {
        match kind {
            DecisionKind::Discard => match state.hand.get(option) {
                Some(hand_tile) => hand_tile.tile.to_string(),
                None => format!("position {}", option),
            },
            DecisionKind::Pickup => match PickupAction::from_code(option) {
                Some(PickupAction::None) => "Pass".to_string(),
                Some(action) => action.to_string(),
                None => format!("action {}", option),
            },
            DecisionKind::Chow => match state.chow_options.get(option) {
                Some(meld) => meld.to_string(),
                None => format!("chow {}", option),
            },
        }
    }

    fn prompt(kind: DecisionKind, options: &[usize], state: &StateView) {
        println!();
        match (kind, state.claimed_tile) {
            (DecisionKind::Discard, _) => println!("Your hand:"),
            (_, Some(tile)) => println!("{} was discarded. Your hand:", tile),
            (_, None) => println!("Your hand:"),
        }
        print_hand(&state.hand);
        println!("{} options:", kind);
        for (i, &option) in options.iter().enumerate() {
            println!("  [{}] {}", i, Self::describe(kind, option, state));
        }
    }
}

/// Parse a choice typed by the user, either an option number or for
/// discards a hand position
pub fn parse_choice(input: &str, kind: DecisionKind, options: &[usize]) -> Option<usize> {
    let input = input.trim();
    if kind == DecisionKind::Discard {
        if let Some(position) = input.strip_prefix('p') {
            let position: usize = position.parse().ok()?;
            return options.iter().position(|&o| o == position);
        }
    }
    let index: usize = input.parse().ok()?;
    (index < options.len()).then_some(index)
}

impl Policy for ConsolePolicy {
    fn select_action(&mut self, kind: DecisionKind, options: &[usize], state: &StateView) -> usize {
        Self::prompt(kind, options, state);
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("Choose 0-{}: ", options.len().saturating_sub(1));
            io::stdout().flush().ok();

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => {
                    println!();
                    return 0;
                }
                Ok(_) => {}
            }
            match parse_choice(&line, kind, options) {
                Some(index) => return index,
                None => println!("Invalid choice '{}'", line.trim()),
            }
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}
