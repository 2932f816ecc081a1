use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("6440"), Some("5905")],
    real: [Some("252052080"), Some("252898370")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"], expected = EXPECTED)]
pub struct Solver;

const ORDER: &[u8; 13] = b"23456789TJQKA";
const JOKER: u8 = 1;

/// Hand strength classes, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl Kind {
    /// Classify card values; jokers join whichever group is already largest
    fn of(cards: &[u8; 5]) -> Kind {
        let mut counts = [0u8; 15];
        for &card in cards {
            counts[usize::from(card)] += 1;
        }
        let jokers = std::mem::take(&mut counts[usize::from(JOKER)]);
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts[0] += jokers;

        match (counts[0], counts[1]) {
            (5, _) => Kind::FiveOfAKind,
            (4, _) => Kind::FourOfAKind,
            (3, 2) => Kind::FullHouse,
            (3, _) => Kind::ThreeOfAKind,
            (2, 2) => Kind::TwoPair,
            (2, _) => Kind::OnePair,
            _ => Kind::HighCard,
        }
    }
}

/// Card values 2..=14 in the order dealt
#[derive(Debug, Clone)]
pub struct Hand {
    cards: [u8; 5],
    bid: u64,
}

impl Hand {
    fn with_jokers(&self) -> Hand {
        Hand {
            cards: self.cards.map(|c| if c == 11 { JOKER } else { c }),
            bid: self.bid,
        }
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<cards> <bid>`"))?;
    let cards: [u8; 5] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("hand {cards:?} does not have 5 cards"))?;
    let mut values = [0; 5];
    for (value, card) in values.iter_mut().zip(cards) {
        *value = match ORDER.iter().position(|&c| c == card) {
            Some(rank) => rank as u8 + 2,
            None => bail!("unknown card {:?}", card as char),
        };
    }
    let bid = bid.trim().parse().with_context(|| format!("bad bid {bid:?}"))?;
    Ok(Hand { cards: values, bid })
}

fn total_winnings(mut hands: Vec<Hand>) -> u64 {
    hands.sort_by_cached_key(|hand| (Kind::of(&hand.cards), hand.cards));
    hands
        .iter()
        .zip(1..)
        .map(|(hand, rank)| hand.bid * rank)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_hand(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared.clone()).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let hands = shared.iter().map(Hand::with_jokers).collect();
        Ok(total_winnings(hands).to_string())
    }
}
