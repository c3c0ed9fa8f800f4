//! Prompts and table rendering for the terminal.

use std::io::{self, BufRead, Write};

use bjcount::{
    Action, ActionError, Actions, BetError, Card, CountAdvice, Decider, Game, Hand, HandOutcome,
    HandStatus, Money, Player, RoundResult,
};

const RULES: &str = "\
OBJECTIVE
  Beat the dealer by getting closer to 21 without going over.

CARD VALUES
  Number cards count their face value, J/Q/K count 10,
  and an Ace counts 1 or 11, whichever is better.

GAMEPLAY
  1. Place your bet.
  2. You get two cards face up; the dealer gets one up, one down.
  3. Hit, Stand, Double Down, or Split.
  4. The dealer reveals the hidden card and draws until 17 or more.

PAYOUTS
  Regular win pays 1:1, blackjack pays 3:2, a push returns your bet.

SPECIAL RULES
  Dealer hits 16 and below and stands on 17 and above.
  Blackjack beats a regular 21.
  Double down only on your first two cards.
  Split only two cards of the same rank, for a second equal bet.
  Split aces receive one card each.
  21 after a split is not a blackjack and pays 1:1.

CARD TRACKING
  The shoe holds several decks and is only reshuffled once
  three quarters of it has been played. The Hi-Lo count counts
  2-6 as +1, 7-9 as 0, and 10-A as -1.
";

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Stats,
    Rules,
    Exit,
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    if !card.is_face_up() {
        return colorize(&card.to_string(), "94");
    }
    let code = if card.suit.is_red() { "91" } else { "97" };
    colorize(&card.to_string(), code)
}

fn format_cards(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(no cards)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_status(hand: &Hand) -> String {
    if hand.is_blackjack() {
        colorize(" BLACKJACK!", "93")
    } else if hand.status() == HandStatus::Bust {
        colorize(" BUST!", "91")
    } else {
        String::new()
    }
}

fn format_advice(advice: CountAdvice) -> String {
    match advice {
        CountAdvice::Favorable => colorize("Player advantage. Bet high!", "92"),
        CountAdvice::Neutral => colorize("Neutral. Bet normally.", "93"),
        CountAdvice::Unfavorable => colorize("Dealer advantage. Bet low.", "91"),
    }
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn format_actions(offered: Actions) -> String {
    let parts = [
        format_action("hit", "h", offered.hit),
        format_action("stand", "s", offered.stand),
        format_action("double", "d", offered.double),
        format_action("split", "p", offered.split),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn parse_action(input: &str) -> Option<Action> {
    match input {
        "h" | "hit" => Some(Action::Hit),
        "s" | "stand" => Some(Action::Stand),
        "d" | "double" => Some(Action::Double),
        "p" | "split" => Some(Action::Split),
        _ => None,
    }
}

/// Reads decisions from stdin and renders the table to stdout.
pub struct Terminal {
    input: io::StdinLock<'static>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }

    /// Prints `prompt` and reads one trimmed line. `None` on end of input.
    fn prompt_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        if let Err(err) = io::stdout().flush() {
            log::warn!("could not flush stdout: {err}");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    pub fn menu(&mut self) -> Option<MenuChoice> {
        loop {
            println!("\n{}", colorize(&"=".repeat(50), "92"));
            println!("{:^50}", "BLACKJACK");
            println!("{}\n", colorize(&"=".repeat(50), "92"));
            println!("1. Play Game");
            println!("2. View Statistics");
            println!("3. Rules & Help");
            println!("4. Exit\n");

            match self.prompt_line(&colorize("Choose option (1-4): ", "93"))?.as_str() {
                "1" => return Some(MenuChoice::Play),
                "2" => return Some(MenuChoice::Stats),
                "3" => return Some(MenuChoice::Rules),
                "4" | "q" => return Some(MenuChoice::Exit),
                _ => println!("{}", colorize("Invalid choice!", "91")),
            }
        }
    }

    pub fn prompt_name(&mut self) -> Option<String> {
        self.prompt_line("Enter your name: ")
    }

    /// Waits for Enter. Returns `false` on end of input.
    pub fn pause(&mut self, prompt: &str) -> bool {
        self.prompt_line(&colorize(prompt, "96")).is_some()
    }

    pub fn welcome(&self, player: &Player, restored: bool) {
        if restored {
            println!(
                "\n{}",
                colorize(
                    &format!(
                        "Welcome back, {}! Your progress has been loaded.",
                        player.name()
                    ),
                    "96"
                )
            );
        } else {
            println!(
                "\n{}",
                colorize(
                    &format!(
                        "Welcome, {}! A new profile will be created for you.",
                        player.name()
                    ),
                    "92"
                )
            );
        }
        println!("Balance: ${}", player.balance());
    }

    pub fn show_rules(&mut self) {
        println!("\n{RULES}");
        self.pause("Press Enter to return to menu...");
    }

    fn print_stats(player: &Player) {
        println!("\n{}", colorize("=== Player Stats ===", "96"));
        println!("Name: {}", player.name());
        println!("Balance: ${}", player.balance());
        println!("Total Winnings: ${}", player.total_winnings());
        println!("Hands Played: {}", player.hands_played());
        println!("Hands Won: {}", player.hands_won());
        println!("Win Rate: {:.1}%", player.win_rate());
    }

    pub fn show_stats(&mut self, player: Option<&Player>) {
        match player {
            Some(player) => Self::print_stats(player),
            None => println!("\nNo games played yet."),
        }
        self.pause("Press Enter to return to menu...");
    }

    /// Prints the final stats on the way out.
    pub fn farewell(&self, player: Option<&Player>) {
        if let Some(player) = player {
            Self::print_stats(player);
        }
        println!("\n{}", colorize("Thanks for playing! See you next time!", "92"));
    }

    pub fn game_over(&mut self) {
        println!("\n{}", colorize("You're out of money! Game Over!", "91"));
        self.pause("Press Enter to return to the menu...");
    }

    fn print_table(&self, game: &Game) {
        let shoe = game.shoe();
        let stats = shoe.stats();
        println!(
            "\nShoe: {}/{} cards ({:.1}% remaining)",
            stats.remaining, stats.total, stats.percent_remaining
        );
        println!(
            "Running count: {} | True count: {:.1} | {}",
            shoe.running_count(),
            shoe.true_count(),
            format_advice(shoe.advice())
        );

        let dealer = game.dealer_hand();
        println!(
            "\nDealer: {} (Value: {}){}",
            format_cards(dealer),
            dealer.best_value(),
            format_status(dealer)
        );

        let hands = game.hands();
        let current = game.current_hand_index();
        for (index, hand) in hands.iter().enumerate() {
            let marker = if current == Some(index) { ">" } else { " " };
            let label = if hands.len() > 1 {
                format!("Hand {}", index + 1)
            } else {
                "Player".to_string()
            };
            let bet = game.bet_for(hand.id()).unwrap_or_default();
            println!(
                "{marker} {label}: {} (Value: {}) | bet ${bet}{}",
                format_cards(hand),
                hand.best_value(),
                format_status(hand)
            );
        }
        println!("\nBalance: ${}", game.player().balance());
    }

    pub fn show_result(&self, game: &Game, result: &RoundResult) {
        self.print_table(game);
        println!();

        let split = result.hands.len() > 1;
        for (index, hand) in result.hands.iter().enumerate() {
            let prefix = if split {
                format!("Hand {}: ", index + 1)
            } else {
                String::new()
            };
            let line = match hand.outcome {
                HandOutcome::Blackjack => colorize(
                    &format!("{prefix}Blackjack! You win ${}", hand.payout - hand.bet),
                    "93",
                ),
                HandOutcome::Win => colorize(
                    &format!("{prefix}You win ${}", hand.payout - hand.bet),
                    "92",
                ),
                HandOutcome::Push => colorize(&format!("{prefix}Push, bet returned"), "93"),
                HandOutcome::Lose => colorize(&format!("{prefix}Dealer wins"), "91"),
            };
            println!("{line}");
        }

        if split {
            println!(
                "Total: payout ${}, net ${} ({} of {} hands won)",
                result.total_payout,
                result.net,
                result.hands_won,
                result.hands.len()
            );
        }
    }
}

impl Decider for Terminal {
    fn bet(&mut self, game: &Game) -> Option<Money> {
        self.print_table(game);
        loop {
            let input = self.prompt_line(&colorize(
                "Enter bet amount (or 'q' to quit): ",
                "93",
            ))?;
            if input.eq_ignore_ascii_case("q") {
                return None;
            }
            match input.parse::<Money>() {
                Ok(amount) => return Some(amount),
                Err(err) => println!("{}", colorize(&format!("Invalid bet: {err}"), "91")),
            }
        }
    }

    fn action(&mut self, game: &Game, offered: Actions) -> Option<Action> {
        self.print_table(game);
        println!("{}", format_actions(offered));
        loop {
            let input = self.prompt_line("Action: ")?.to_lowercase();
            if input == "q" || input == "quit" {
                return None;
            }
            match parse_action(&input) {
                Some(action) => return Some(action),
                None => println!("{}", colorize("Unknown action.", "91")),
            }
        }
    }

    fn bet_rejected(&mut self, error: BetError) {
        println!("{}", colorize(&format!("Bet rejected: {error}"), "91"));
    }

    fn action_rejected(&mut self, error: ActionError) {
        println!("{}", colorize(&format!("Not allowed: {error}"), "91"));
    }
}
