//! Game integration tests.

use bjcount::{
    Action, ActionError, Actions, BetError, Card, DECK_SIZE, DealError, Decider, Game, GameState,
    HandOutcome, Money, Player, Rank, RoundFlow, ShowdownError, Suit, TableOptions, settle_hand,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

const fn units(amount: i64) -> Money {
    Money::from_units(amount)
}

/// A game whose shoe deals `draws` first, in order.
fn game_with(balance: i64, draws: &[Card]) -> Game {
    let player = Player::new("Tester", units(balance));
    let mut game = Game::new(TableOptions::default(), player, 7).unwrap();
    game.shoe_mut().stack(draws).unwrap();
    game
}

fn start(game: &mut Game, bet: i64) {
    game.bet(units(bet)).unwrap();
    game.deal().unwrap();
}

#[test]
fn deal_order_and_hidden_hole_card() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Five),   // player
            card(Suit::Clubs, Rank::Nine),    // dealer up
            card(Suit::Spades, Rank::Six),    // player
            card(Suit::Diamonds, Rank::King), // dealer hole
        ],
    );
    start(&mut game, 10);

    let hand = &game.hands()[0];
    assert_eq!(hand.cards()[0].rank, Rank::Five);
    assert_eq!(hand.cards()[1].rank, Rank::Six);

    let dealer = game.dealer_hand();
    assert!(dealer.cards()[0].is_face_up());
    assert!(!dealer.cards()[1].is_face_up());
    assert_eq!(dealer.best_value(), 9);

    assert_eq!(game.state(), GameState::PlayerActing { hand_index: 0 });
    assert_eq!(game.player().balance(), units(990));
}

#[test]
fn push_returns_the_bet() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    start(&mut game, 100);
    game.stand().unwrap();
    assert_eq!(game.state(), GameState::DealerActing);

    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.showdown().unwrap();

    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.total_payout, units(100));
    assert_eq!(result.net, Money::ZERO);
    assert_eq!(game.player().balance(), units(1000));
    assert_eq!(game.player().hands_played(), 1);
    assert_eq!(game.player().hands_won(), 0);
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Spades, Rank::King),
            card(Suit::Diamonds, Rank::Nine),
        ],
    );
    start(&mut game, 100);

    // Natural stands on its own
    assert_eq!(game.state(), GameState::DealerActing);
    assert!(game.hands()[0].is_standing());

    game.dealer_play().unwrap();
    let result = game.showdown().unwrap();

    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.total_payout, units(250));
    assert_eq!(result.net, units(150));
    assert_eq!(game.player().balance(), units(1150));
    assert_eq!(game.player().total_winnings(), units(150));
    assert_eq!(game.player().hands_won(), 1);
}

#[test]
fn dealer_natural_beats_drawn_twenty_one() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Spades, Rank::Six),
            card(Suit::Diamonds, Rank::King),
            card(Suit::Hearts, Rank::Ten), // player hit
        ],
    );
    start(&mut game, 20);

    game.hit().unwrap();
    assert_eq!(game.hands()[0].best_value(), 21);
    // 21 does not end the turn
    assert_eq!(game.state(), GameState::PlayerActing { hand_index: 0 });
    game.stand().unwrap();

    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.showdown().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(game.player().balance(), units(980));
}

#[test]
fn dealer_draws_on_sixteen() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Hearts, Rank::Five), // dealer draw
        ],
    );
    start(&mut game, 10);
    game.stand().unwrap();

    let drawn = game.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);
    assert_eq!(game.dealer_hand().best_value(), 21);

    let result = game.showdown().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn dealer_stands_on_seventeen() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    start(&mut game, 10);
    game.stand().unwrap();

    assert!(game.dealer_play().unwrap().is_empty());
    assert!(game.dealer_hand().is_standing());

    let result = game.showdown().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, units(20));
}

#[test]
fn dealer_bust_pays_even_money() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Two),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Hearts, Rank::King), // dealer draw
        ],
    );
    start(&mut game, 40);
    game.stand().unwrap();
    game.dealer_play().unwrap();

    let result = game.showdown().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.player().balance(), units(1040));
}

#[test]
fn dealer_skips_play_when_player_busts() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Spades, Rank::Six),
            card(Suit::Diamonds, Rank::Three),
            card(Suit::Hearts, Rank::King), // player hit
        ],
    );
    start(&mut game, 10);

    game.hit().unwrap();
    assert!(game.hands()[0].is_busted());
    assert_eq!(game.state(), GameState::DealerActing);

    assert!(game.dealer_play().unwrap().is_empty());
    assert!(!game.dealer_hand().cards()[1].is_face_up());

    let result = game.showdown().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.total_payout, Money::ZERO);
    assert_eq!(game.player().balance(), units(990));
}

#[test]
fn double_down_doubles_bet_and_draws_once() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Six),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Two), // double draw
        ],
    );
    start(&mut game, 50);

    assert!(game.available_actions().double);
    let drawn = game.double_down().unwrap();
    assert_eq!(drawn.rank, Rank::Two);

    let hand = &game.hands()[0];
    assert_eq!(hand.len(), 3);
    assert_eq!(hand.best_value(), 13);
    assert!(hand.is_standing());
    assert_eq!(game.bet_for(hand.id()), Some(units(100)));
    assert_eq!(game.player().balance(), units(900));
    assert_eq!(game.state(), GameState::DealerActing);
}

#[test]
fn double_down_rejected_after_hit() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Two),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Three),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Four), // player hit
        ],
    );
    start(&mut game, 50);
    game.hit().unwrap();

    assert!(!game.available_actions().double);
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
    assert_eq!(game.player().balance(), units(950));
    assert_eq!(game.hands()[0].len(), 3);
}

#[test]
fn double_down_rejected_without_funds() {
    let mut game = game_with(
        100,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Six),
            card(Suit::Spades, Rank::Ten),
        ],
    );
    start(&mut game, 60);

    assert!(!game.available_actions().double);
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(game.player().balance(), units(40));
    assert_eq!(game.bet_for(game.hands()[0].id()), Some(units(60)));
}

#[test]
fn split_creates_two_staked_hands() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Two),   // left hand draw
            card(Suit::Clubs, Rank::Three),  // right hand draw
            card(Suit::Diamonds, Rank::Ten), // dealer draw
        ],
    );
    start(&mut game, 50);

    let original = game.hands()[0].id();
    assert!(game.available_actions().split);
    game.split().unwrap();

    let hands = game.hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].best_value(), 10);
    assert_eq!(hands[1].best_value(), 11);
    assert!(hands.iter().all(bjcount::Hand::is_from_split));
    assert_eq!(game.bet_for(original), None);
    assert_eq!(game.bet_for(hands[0].id()), Some(units(50)));
    assert_eq!(game.bet_for(hands[1].id()), Some(units(50)));
    assert_eq!(game.player().balance(), units(900));
    assert_eq!(game.state(), GameState::PlayerActing { hand_index: 0 });

    game.stand().unwrap();
    assert_eq!(game.state(), GameState::PlayerActing { hand_index: 1 });
    game.stand().unwrap();

    game.dealer_play().unwrap();
    let result = game.showdown().unwrap();
    assert_eq!(result.hands.len(), 2);
    assert_eq!(result.hands_won, 2);
    assert_eq!(result.total_payout, units(200));
    assert_eq!(game.player().balance(), units(1100));
    assert_eq!(game.player().hands_played(), 1);
    assert_eq!(game.player().hands_won(), 1);
}

#[test]
fn split_hands_settle_independently() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::Eight),
            card(Suit::Hearts, Rank::Ten),  // left: 19
            card(Suit::Clubs, Rank::Seven), // right: 16
        ],
    );
    start(&mut game, 25);
    game.split().unwrap();
    game.stand().unwrap();
    game.stand().unwrap();
    game.dealer_play().unwrap();

    let result = game.showdown().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[1].outcome, HandOutcome::Lose);
    assert_eq!(result.net, Money::ZERO);
    assert_eq!(game.player().hands_won(), 1);
    assert_eq!(game.player().total_winnings(), units(25));
}

#[test]
fn both_naturals_push() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Spades, Rank::King),
            card(Suit::Diamonds, Rank::King),
        ],
    );
    start(&mut game, 100);
    assert_eq!(game.state(), GameState::DealerActing);

    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.showdown().unwrap();

    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.hands[0].payout, units(100));
    assert_eq!(game.player().balance(), units(1000));
    assert_eq!(game.player().hands_won(), 0);
}

#[test]
fn resplit_extends_iteration() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Clubs, Rank::Eight),    // first split, left
            card(Suit::Clubs, Rank::Three),    // first split, right
            card(Suit::Hearts, Rank::Two),     // second split, left
            card(Suit::Diamonds, Rank::Four),  // second split, right
            card(Suit::Diamonds, Rank::Ten),   // dealer draw
        ],
    );
    start(&mut game, 10);

    game.split().unwrap();
    assert!(game.hands()[0].is_pair());
    assert!(game.available_actions().split);
    game.split().unwrap();

    let values: Vec<u8> = game.hands().iter().map(bjcount::Hand::best_value).collect();
    assert_eq!(values, vec![10, 12, 11]);
    assert_eq!(game.bets().len(), 3);
    assert_eq!(game.bets().total(), units(30));
    assert_eq!(game.player().balance(), units(970));

    for index in 0..3 {
        assert_eq!(game.state(), GameState::PlayerActing { hand_index: index });
        game.stand().unwrap();
    }
    assert_eq!(game.state(), GameState::DealerActing);

    game.dealer_play().unwrap();
    let result = game.showdown().unwrap();
    assert_eq!(result.hands.len(), 3);
    assert_eq!(result.hands_won, 3);
    assert_eq!(game.player().balance(), units(1030));
    assert_eq!(game.player().hands_played(), 1);
    assert_eq!(game.player().hands_won(), 1);
}

#[test]
fn split_aces_take_one_card_each() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Ace),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Five), // left: A5
            card(Suit::Clubs, Rank::King),  // right: AK
        ],
    );
    start(&mut game, 10);
    game.split().unwrap();

    assert_eq!(game.state(), GameState::DealerActing);
    assert!(game.hands().iter().all(|hand| hand.len() == 2));
    assert!(game.hands().iter().all(bjcount::Hand::is_standing));
    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);

    game.dealer_play().unwrap();
    let result = game.showdown().unwrap();
    // 21 on a split hand is not a blackjack
    assert_eq!(result.hands[1].outcome, HandOutcome::Win);
    assert_eq!(result.hands[1].payout, units(20));
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn split_rejected_for_unpaired_or_unfunded_hands() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    start(&mut game, 10);
    assert!(!game.available_actions().split);
    assert_eq!(game.split().unwrap_err(), ActionError::CannotSplit);

    let mut game = game_with(
        100,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    start(&mut game, 70);
    assert!(!game.available_actions().split);
    assert_eq!(game.split().unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(game.hands().len(), 1);
    assert_eq!(game.player().balance(), units(30));
}

#[test]
fn bet_errors() {
    let player = Player::new("Tester", units(10));
    let mut game = Game::new(TableOptions::default(), player, 1).unwrap();

    assert_eq!(game.bet(Money::ZERO).unwrap_err(), BetError::ZeroBet);
    assert_eq!(game.bet(units(20)).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(game.player().balance(), units(10));

    game.bet(Money::from_cents(250)).unwrap();
    assert_eq!(game.bet(units(1)).unwrap_err(), BetError::InvalidState);
    assert_eq!(game.player().balance(), Money::from_cents(750));
}

#[test]
fn steps_out_of_order_are_rejected() {
    let player = Player::new("Tester", units(10));
    let mut game = Game::new(TableOptions::default(), player, 1).unwrap();

    assert_eq!(game.deal().unwrap_err(), DealError::InvalidState);
    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.dealer_play().unwrap_err(), ShowdownError::InvalidState);
    assert_eq!(game.showdown().unwrap_err(), ShowdownError::InvalidState);
    assert_eq!(game.available_actions(), Actions::default());
}

#[test]
fn zero_decks_is_a_configuration_error() {
    let player = Player::new("Tester", units(10));
    let options = TableOptions::default().with_decks(0);
    assert_eq!(
        Game::new(options, player, 1).unwrap_err(),
        bjcount::ConfigError::NoDecks
    );
}

#[test]
fn zero_reshuffle_threshold_is_rejected() {
    let options = TableOptions::default().with_reshuffle_threshold(0.0);
    assert_eq!(
        options.validate(),
        Err(bjcount::ConfigError::InvalidReshuffleThreshold)
    );

    let player = Player::new("Tester", units(10));
    assert!(Game::new(options, player, 1).is_err());
}

#[test]
fn single_deck_table_never_runs_dry() {
    let options = TableOptions::default()
        .with_decks(1)
        .with_reshuffle_threshold(0.01);
    let player = Player::new("Tester", units(1000));
    let mut game = Game::new(options, player, 3).unwrap();

    for _ in 0..60 {
        let mut script = Script {
            bets: vec![Some(units(1))],
            actions: vec![Some(Action::Stand); 4],
            ..Script::default()
        };
        let flow = game.play_round(&mut script).unwrap();
        assert!(matches!(flow, RoundFlow::Settled(_)));
    }
    assert_eq!(game.player().hands_played(), 60);
    assert_eq!(game.shoe().total(), DECK_SIZE);
}

#[test]
fn settle_hand_checks_player_bust_first() {
    let mut player = bjcount::Hand::new(bjcount::HandId(1));
    player.add_card(card(Suit::Hearts, Rank::Ten));
    player.add_card(card(Suit::Clubs, Rank::Nine));
    player.add_card(card(Suit::Spades, Rank::Five));

    let mut dealer = bjcount::Hand::new(bjcount::HandId(2));
    dealer.add_card(card(Suit::Hearts, Rank::King));
    dealer.add_card(card(Suit::Clubs, Rank::Six));
    dealer.add_card(card(Suit::Diamonds, Rank::Queen));

    let (outcome, payout) = settle_hand(&player, &dealer, units(10), &TableOptions::default());
    assert_eq!(outcome, HandOutcome::Lose);
    assert_eq!(payout, Money::ZERO);
}

/// Replays a fixed list of bets and actions, recording rejections.
#[derive(Default)]
struct Script {
    bets: Vec<Option<Money>>,
    actions: Vec<Option<Action>>,
    bet_errors: Vec<BetError>,
    action_errors: Vec<ActionError>,
}

impl Decider for Script {
    fn bet(&mut self, _game: &Game) -> Option<Money> {
        self.bets.remove(0)
    }

    fn action(&mut self, _game: &Game, _offered: Actions) -> Option<Action> {
        self.actions.remove(0)
    }

    fn bet_rejected(&mut self, error: BetError) {
        self.bet_errors.push(error);
    }

    fn action_rejected(&mut self, error: ActionError) {
        self.action_errors.push(error);
    }
}

#[test]
fn play_round_reprompts_after_rejections() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Four),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Five), // player hit
        ],
    );
    let mut script = Script {
        bets: vec![Some(units(5000)), Some(units(100))],
        actions: vec![Some(Action::Split), Some(Action::Hit), Some(Action::Stand)],
        ..Script::default()
    };

    let flow = game.play_round(&mut script).unwrap();
    let RoundFlow::Settled(result) = flow else {
        panic!("round should settle");
    };

    assert_eq!(script.bet_errors, vec![BetError::InsufficientFunds]);
    assert_eq!(script.action_errors, vec![ActionError::CannotSplit]);
    assert!(script.actions.is_empty());
    assert_eq!(result.hands[0].player_value, 19);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.player().balance(), units(1100));
    assert_eq!(game.state(), GameState::Done);
}

#[test]
fn play_round_quit_at_bet_changes_nothing() {
    let mut game = game_with(1000, &[]);
    let mut script = Script {
        bets: vec![None],
        ..Script::default()
    };

    assert_eq!(game.play_round(&mut script).unwrap(), RoundFlow::Quit);
    assert_eq!(game.player().balance(), units(1000));
    assert_eq!(game.player().hands_played(), 0);
}

#[test]
fn play_round_quit_mid_round_forfeits_stake() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Four),
            card(Suit::Spades, Rank::Ten),
        ],
    );
    let mut script = Script {
        bets: vec![Some(units(100))],
        actions: vec![None],
        ..Script::default()
    };

    assert_eq!(game.play_round(&mut script).unwrap(), RoundFlow::Quit);
    assert_eq!(game.state(), GameState::Betting);
    assert!(game.hands().is_empty());
    assert!(game.bets().is_empty());
    assert_eq!(game.player().balance(), units(900));
}

#[test]
fn consecutive_rounds_start_clean() {
    let mut game = game_with(
        1000,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    let mut script = Script {
        bets: vec![Some(units(10)), Some(units(10))],
        actions: vec![Some(Action::Stand)],
        ..Script::default()
    };
    game.play_round(&mut script).unwrap();
    assert_eq!(game.state(), GameState::Done);

    game.clear_round();
    game.bet(units(10)).unwrap();
    assert_eq!(game.hands().len(), 1);
    assert!(game.hands()[0].is_empty());
    assert_eq!(game.bets().len(), 1);
}
