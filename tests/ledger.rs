//! Money, bankroll and stake tests.

use bjcount::{BetError, Bets, HandId, Money, MoneyParseError, Player, RoundingMode};

#[test]
fn money_parses_dollar_amounts() {
    assert_eq!("25".parse::<Money>(), Ok(Money::from_units(25)));
    assert_eq!("$7.5".parse::<Money>(), Ok(Money::from_cents(750)));
    assert_eq!(" 0.05 ".parse::<Money>(), Ok(Money::from_cents(5)));
    assert_eq!(".5".parse::<Money>(), Ok(Money::from_cents(50)));

    assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
    assert_eq!("abc".parse::<Money>(), Err(MoneyParseError::InvalidDigit));
    assert_eq!("-5".parse::<Money>(), Err(MoneyParseError::InvalidDigit));
    assert_eq!("1.234".parse::<Money>(), Err(MoneyParseError::TooPrecise));
    assert_eq!(
        "99999999999999999999".parse::<Money>(),
        Err(MoneyParseError::Overflow)
    );
}

#[test]
fn money_displays_two_decimals() {
    assert_eq!(Money::from_units(1000).to_string(), "1000.00");
    assert_eq!(Money::from_cents(1205).to_string(), "12.05");
    assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
}

#[test]
fn blackjack_bonus_rounding() {
    let bet = Money::from_cents(1005);
    assert_eq!(bet.scale(1.5, RoundingMode::Down), Money::from_cents(1507));
    assert_eq!(bet.scale(1.5, RoundingMode::Up), Money::from_cents(1508));
    assert_eq!(bet.scale(1.5, RoundingMode::Nearest), Money::from_cents(1508));
    assert_eq!(
        Money::from_units(100).scale(1.5, RoundingMode::Down),
        Money::from_units(150)
    );
}

#[test]
fn place_bet_checks_amount_and_funds() {
    let mut player = Player::new("Ada", Money::from_units(100));

    assert_eq!(player.place_bet(Money::ZERO), Err(BetError::ZeroBet));
    assert_eq!(
        player.place_bet(Money::from_cents(-100)),
        Err(BetError::ZeroBet)
    );
    assert_eq!(
        player.place_bet(Money::from_cents(10_001)),
        Err(BetError::InsufficientFunds)
    );
    assert_eq!(player.balance(), Money::from_units(100));

    player.place_bet(Money::from_units(100)).unwrap();
    assert_eq!(player.balance(), Money::ZERO);
}

#[test]
fn record_round_tracks_stats() {
    let mut player = Player::new("Ada", Money::from_units(100));
    assert!(player.win_rate().abs() < f64::EPSILON);

    player.record_round(true, Money::from_units(15));
    player.record_round(false, Money::ZERO);
    player.record_round(false, Money::ZERO);
    player.record_round(true, Money::from_units(10));

    assert_eq!(player.hands_played(), 4);
    assert_eq!(player.hands_won(), 2);
    assert_eq!(player.total_winnings(), Money::from_units(25));
    assert!((player.win_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn bets_are_keyed_by_hand() {
    let mut bets = Bets::new();
    bets.stake(HandId(1), Money::from_units(10));
    bets.stake(HandId(2), Money::from_units(20));

    assert_eq!(bets.double(HandId(1)), Some(Money::from_units(20)));
    assert_eq!(bets.double(HandId(9)), None);
    assert_eq!(bets.total(), Money::from_units(40));
    assert_eq!(bets.len(), 2);

    assert_eq!(bets.remove(HandId(2)), Some(Money::from_units(20)));
    assert_eq!(bets.get(HandId(2)), None);

    bets.clear();
    assert!(bets.is_empty());
}
