//! Interactive table driven by typed commands

use crate::console::ConsolePolicy;
use crate::display::{print_event, print_hand, print_pile, print_settlement, print_table, print_totals};
use crate::parallel::{self, SimConfig};
use mahjong_engine::{Game, GameConfig, GameError, Phase, Policy, PolicyKind, TurnEvent, N_SEATS};
use mahjong_score::max_score;
use std::io::{self, BufRead, Write};
use std::time::Instant;

const DEFAULT_SIM_ROUNDS: usize = 1000;

const HELP: &str = "\
Commands:
  hand         show your hand and its best score
  sort         sort your hand
  pile         show the discard pile
  set          show how many tiles are left
  score        show every seat with its current score
  draw         draw for the seat whose turn it is
  discard N    discard the tile at hand position N
  turn         play until the next seat is due to draw
  game         play the rest of the round
  sim [N]      simulate N rounds in parallel (default 1000)
  help         show this list
  quit         leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hand,
    Sort,
    Pile,
    Set,
    Score,
    Draw,
    Discard(usize),
    Turn,
    Game,
    Sim(usize),
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("");
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("Too many arguments to '{}'", name));
        }
        let number = |default: Option<usize>| -> Result<usize, String> {
            match (arg, default) {
                (Some(text), _) => text
                    .parse()
                    .map_err(|_| format!("'{}' is not a number", text)),
                (None, Some(default)) => Ok(default),
                (None, None) => Err(format!("'{}' needs a number", name)),
            }
        };
        let command = match name {
            "hand" => Command::Hand,
            "sort" => Command::Sort,
            "pile" => Command::Pile,
            "set" => Command::Set,
            "score" => Command::Score,
            "draw" => Command::Draw,
            "discard" => Command::Discard(number(None)?),
            "turn" => Command::Turn,
            "game" => Command::Game,
            "sim" => Command::Sim(number(Some(DEFAULT_SIM_ROUNDS))?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(format!("Unknown command '{}', type 'help'", name)),
        };
        if arg.is_some() && !matches!(command, Command::Discard(_) | Command::Sim(_)) {
            return Err(format!("'{}' takes no argument", name));
        }
        Ok(command)
    }
}

pub struct Repl {
    game: Game,
    human_seat: Option<usize>,
    seed: u64,
    threads: usize,
}

impl Repl {
    pub fn new(
        seed: u64,
        policy: PolicyKind,
        human_seat: Option<usize>,
        threads: usize,
    ) -> Result<Self, GameError> {
        if let Some(seat) = human_seat {
            if seat >= N_SEATS {
                return Err(GameError::InvalidSeat(seat));
            }
        }
        let policies: [Box<dyn Policy>; N_SEATS] = std::array::from_fn(|seat| {
            if human_seat == Some(seat) {
                Box::new(ConsolePolicy) as Box<dyn Policy>
            } else {
                policy.build(seed.wrapping_add(seat as u64 + 1))
            }
        });
        let game = Game::new(GameConfig::with_seed(seed), policies)?;
        Ok(Repl {
            game,
            human_seat,
            seed,
            threads,
        })
    }

    /// Read commands until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        println!("Mahjong table, seed {}. Type 'help' for commands.", self.seed);
        print_table(&self.game, self.human_seat);

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("> ");
            io::stdout().flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => {
                    if let Err(e) = self.execute(command) {
                        println!("Error: {}", e);
                    }
                }
                Err(message) => println!("{}", message),
            }
        }
    }

    /// Seat whose hand `hand`, `sort` and `score` refer to
    fn focus_seat(&self) -> usize {
        self.human_seat
            .or_else(|| self.game.round().current_seat())
            .unwrap_or(0)
    }

    fn execute(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Hand => {
                let round = self.game.round();
                let player = round.player(self.focus_seat())?;
                println!("Player {} ({}):", player.seat, player.seat_wind);
                print_hand(&player.hand);
                println!(
                    "Best score: {}",
                    max_score(&player.hand, round.round_wind(), player.seat_wind)
                );
            }
            Command::Sort => {
                let seat = self.focus_seat();
                self.game.round_mut().sort_hand(seat)?;
                print_hand(&self.game.round().player(seat)?.hand);
            }
            Command::Pile => print_pile(&self.game),
            Command::Set => println!("{} tiles left in the set", self.game.round().set().len()),
            Command::Score => {
                print_table(&self.game, self.human_seat);
                print_totals(&self.game);
            }
            Command::Draw => {
                self.start_next_round_if_over()?;
                match self.game.round().phase() {
                    Phase::AwaitDraw { seat } => {
                        let event = self.game.round_mut().draw(seat)?;
                        self.report(&event);
                    }
                    phase => println!("Nobody is due to draw ({:?})", phase),
                }
            }
            Command::Discard(index) => match self.game.round().phase() {
                Phase::AwaitDiscard { seat } if self.human_seat.is_some_and(|h| h != seat) => {
                    println!("Not your turn: player {} is due to discard", seat);
                }
                Phase::AwaitDiscard { seat } => {
                    let event = self.game.round_mut().discard(seat, index)?;
                    self.report(&event);
                }
                phase => println!("Nobody is due to discard ({:?})", phase),
            },
            Command::Turn => {
                self.start_next_round_if_over()?;
                loop {
                    let event = self.game.step()?;
                    self.report(&event);
                    let phase = self.game.round().phase();
                    if matches!(phase, Phase::AwaitDraw { .. } | Phase::Finished) {
                        break;
                    }
                }
            }
            Command::Game => {
                self.start_next_round_if_over()?;
                while !self.game.round().is_finished() {
                    let event = self.game.step()?;
                    self.report(&event);
                }
            }
            Command::Sim(rounds) => {
                let config = SimConfig {
                    rounds,
                    seed: self.seed,
                    num_threads: self.threads,
                    ..Default::default()
                };
                let start = Instant::now();
                let stats = parallel::run(&config)?;
                stats.report(start.elapsed());
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
        }
        Ok(())
    }

    fn report(&mut self, event: &TurnEvent) {
        print_event(event, self.human_seat);
        if let Some(settlement) = self.game.settle() {
            print_settlement(&settlement, &self.game);
        }
    }

    fn start_next_round_if_over(&mut self) -> Result<(), GameError> {
        if self.game.round().is_finished() {
            self.game.settle();
            self.game.next_round()?;
            println!("Starting round {}", self.game.round_number());
            print_table(&self.game, self.human_seat);
        }
        Ok(())
    }
}
