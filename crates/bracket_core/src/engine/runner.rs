//! Tournament runner: drives one resolver across the whole bracket.
//!
//! Order of play (and therefore of RNG draws) is fixed: play-in games in
//! (region, seed) order, then each region's four rounds in bracket order,
//! then the left and right semifinals, then the championship.

use rand::RngCore;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

use crate::engine::resolver::{GameContext, GameResolver, Side, Stage};
use crate::engine::topology::{RegionalRound, RoundId, SEEDING_ORDER};
use crate::models::{Half, Region, Team, TeamEntry, TournamentResult};
use crate::registry::{TeamRegistry, NEUTRAL_SEED_PROB};

/// One resolved game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub stage: Stage,
    pub a: Team,
    pub b: Team,
    pub winner: Side,
}

impl Matchup {
    pub fn winner(&self) -> &Team {
        self.winner.pick(&self.a, &self.b).0
    }

    pub fn loser(&self) -> &Team {
        self.winner.pick(&self.a, &self.b).1
    }
}

/// Bracket result plus every game that produced it, play-ins included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentRun {
    pub result: TournamentResult,
    pub matchups: Vec<Matchup>,
}

pub struct TournamentRunner<'r> {
    registry: &'r TeamRegistry,
}

impl<'r> TournamentRunner<'r> {
    pub fn new(registry: &'r TeamRegistry) -> Self {
        Self { registry }
    }

    pub fn run(&self, resolver: &dyn GameResolver, rng: &mut dyn RngCore) -> TournamentResult {
        self.run_detailed(resolver, rng).result
    }

    pub fn run_detailed(&self, resolver: &dyn GameResolver, rng: &mut dyn RngCore) -> TournamentRun {
        let mut games = Games { registry: self.registry, resolver, rng, log: Vec::new() };
        let mut result = TournamentResult::default();

        let field = games.play_ins();

        let mut semifinalists: BTreeMap<Half, Vec<&Team>> = BTreeMap::new();
        for region in Region::ALL {
            let mut current = seeded_order(&field, region);
            for round in RegionalRound::ALL {
                let (entries, winners) = games.play_round(&current, Stage::Regional(round));
                result.rounds.insert(RoundId::Regional(region, round), entries);
                current = winners;
            }

            match current.as_slice() {
                [] => warn!(%region, "region produced no Final Four entrant"),
                [survivor] => semifinalists.entry(region.half()).or_default().push(*survivor),
                [survivor, ..] => {
                    warn!(%region, survivors = current.len(), "more than one regional survivor, taking the first");
                    semifinalists.entry(region.half()).or_default().push(*survivor);
                }
            }
        }

        let mut finalists = Vec::with_capacity(2);
        for half in Half::ALL {
            let entrants = semifinalists.remove(&half).unwrap_or_default();
            result.rounds.insert(RoundId::FinalFour(half), entries(&entrants));
            match entrants.as_slice() {
                [a, b] => finalists.push(games.play(*a, *b, Stage::FinalFour)),
                _ => warn!(?half, entrants = entrants.len(), "semifinal slot lacks two entrants"),
            }
        }

        match finalists.as_slice() {
            [a, b] => {
                result.rounds.insert(RoundId::Championship, entries(&finalists));
                result.champion = Some(games.play(*a, *b, Stage::Championship).name.clone());
            }
            _ => {
                warn!(finalists = finalists.len(), "championship not played");
                result.rounds.insert(RoundId::Championship, Vec::new());
            }
        }

        info!(
            games = games.log.len(),
            champion = result.champion.as_deref().unwrap_or("-"),
            "tournament run complete"
        );
        TournamentRun { result, matchups: games.log }
    }
}

/// Run a full tournament with any resolver.
pub fn run(registry: &TeamRegistry, resolver: &dyn GameResolver, rng: &mut dyn RngCore) -> TournamentResult {
    TournamentRunner::new(registry).run(resolver, rng)
}

struct Games<'r, 'a> {
    registry: &'r TeamRegistry,
    resolver: &'a dyn GameResolver,
    rng: &'a mut dyn RngCore,
    log: Vec<Matchup>,
}

impl<'r, 'a> Games<'r, 'a> {
    fn context(&self, stage: Stage, a: &Team, b: &Team) -> GameContext {
        let seed_odds = match stage {
            Stage::PlayIn => (0.0, 0.0),
            Stage::Regional(round) => self.registry.history().pair_odds(a.seed, b.seed, round),
            Stage::FinalFour | Stage::Championship => (NEUTRAL_SEED_PROB, NEUTRAL_SEED_PROB),
        };
        GameContext { stage, seed_odds }
    }

    fn play(&mut self, a: &'r Team, b: &'r Team, stage: Stage) -> &'r Team {
        let ctx = self.context(stage, a, b);
        let side = self.resolver.decide(a, b, &ctx, &mut *self.rng);
        let (winner, loser) = side.pick(a, b);
        debug!(?stage, a = %a.name, b = %b.name, winner = %winner.name, loser = %loser.name, "game resolved");
        self.log.push(Matchup { stage, a: a.clone(), b: b.clone(), winner: side });
        winner
    }

    /// Reduce every shared (region, seed) slot to one team.
    ///
    /// Returns the surviving field in registry order.
    fn play_ins(&mut self) -> Vec<&'r Team> {
        let registry = self.registry;
        let mut slots: BTreeMap<(Region, u8), Vec<&'r Team>> = BTreeMap::new();
        for team in registry.teams() {
            slots.entry((team.region, team.seed)).or_default().push(team);
        }

        let mut eliminated: HashSet<&str> = HashSet::new();
        for group in slots.values().filter(|g| g.len() > 1) {
            let mut holder = group[0];
            for &challenger in &group[1..] {
                let winner = self.play(holder, challenger, Stage::PlayIn);
                let loser = if std::ptr::eq(winner, holder) { challenger } else { holder };
                eliminated.insert(loser.name.as_str());
                holder = winner;
            }
        }

        registry.teams().iter().filter(|t| !eliminated.contains(t.name.as_str())).collect()
    }

    /// Play adjacent pairs; returns (competitor entries, winners).
    fn play_round(&mut self, teams: &[&'r Team], stage: Stage) -> (Vec<TeamEntry>, Vec<&'r Team>) {
        if teams.len() % 2 == 1 {
            warn!(?stage, team = %teams[teams.len() - 1].name, "odd team count, dropping unpaired team");
        }
        let mut entries = Vec::with_capacity(teams.len());
        let mut winners = Vec::with_capacity(teams.len() / 2);
        for pair in teams.chunks_exact(2) {
            entries.push(pair[0].entry());
            entries.push(pair[1].entry());
            winners.push(self.play(pair[0], pair[1], stage));
        }
        (entries, winners)
    }
}

fn entries(teams: &[&Team]) -> Vec<TeamEntry> {
    teams.iter().map(|t| t.entry()).collect()
}

/// A region's teams in round-of-64 order; seeds without a team are skipped.
fn seeded_order<'r>(field: &[&'r Team], region: Region) -> Vec<&'r Team> {
    SEEDING_ORDER
        .iter()
        .filter_map(|&seed| field.iter().copied().find(|t| t.region == region && t.seed == seed))
        .collect()
}
