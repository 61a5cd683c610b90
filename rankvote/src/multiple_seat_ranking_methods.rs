// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! Counting methods that fill several seats.
//!
//! * Preferential block voting (PBV). Each voter has as many votes as there are seats, and a
//!   candidate needs a majority of the ballots. The majority can take every seat.
//! * Single transferable vote (STV). Each voter has one vote, and a candidate needs a Droop quota
//!   `ballots/(seats+1)`. Surplus votes of elected candidates move on, giving proportional results.
//!
//! Both work in rounds. In each round, every candidate over the threshold is elected, and every
//! candidate who could not catch up with the candidate above them even if they got all the votes of
//! the candidates below them is rejected. Then votes are transferred and the next round starts.

use log::{debug, info};
use crate::ballot_metadata::Candidate;
use crate::ballot_paper::Ballot;
use crate::election_manager::{CountOptions, ElectionError, ElectionManager};
use crate::election_results::ElectionResults;
use crate::random_util::Randomness;
use crate::util::{CONSIDERED_EQUAL_MARGIN, ROUNDING_ERROR};

/// Preferential block voting. Voters rank candidates and have number_of_seats votes, which go to
/// their top number_of_seats preferences still in the race. Candidates with a majority of the
/// (non exhausted) ballots are elected; hopeless candidates are rejected and all their votes
/// passed on. With one seat this is instant runoff voting.
pub fn preferential_block_voting(candidates:&[Candidate],ballots:&[Ballot],number_of_seats:usize,options:CountOptions,randomness:&mut Randomness) -> Result<ElectionResults,ElectionError> {
    let manager = ElectionManager::new(candidates,ballots,number_of_seats,options,randomness)?;
    RoundByRoundCount{ manager, number_of_seats, method: Method::PreferentialBlockVoting, results: ElectionResults::default() }.go()
}

/// Single transferable vote with a fractional Droop quota computed once from the ballots that were
/// not blank after the first distribution. Elected candidates pass on their votes in excess of
/// the quota; rejected candidates pass on all of them.
pub fn single_transferable_vote(candidates:&[Candidate],ballots:&[Ballot],number_of_seats:usize,options:CountOptions,randomness:&mut Randomness) -> Result<ElectionResults,ElectionError> {
    let manager = ElectionManager::new(candidates,ballots,1,options,randomness)?;
    let quota = manager.get_number_of_non_exhausted_ballots() as f64/(number_of_seats+1) as f64;
    info!("Quota is {:.4} for {} seats",quota,number_of_seats);
    RoundByRoundCount{ manager, number_of_seats, method: Method::SingleTransferableVote{quota}, results: ElectionResults::default() }.go()
}

#[derive(Clone,Copy,Debug)]
enum Method {
    PreferentialBlockVoting,
    SingleTransferableVote{quota:f64},
}

#[derive(Default,Debug)]
struct RoundDecisions {
    to_elect : Vec<Candidate>,
    /// best first.
    to_reject : Vec<Candidate>,
}

struct RoundByRoundCount<'r> {
    manager : ElectionManager<'r>,
    number_of_seats : usize,
    method : Method,
    results : ElectionResults,
}

impl <'r> RoundByRoundCount<'r> {
    fn seats_left(&self) -> usize { self.number_of_seats.saturating_sub(self.manager.get_number_of_elected_candidates()) }

    fn threshold(&self) -> f64 {
        match self.method {
            Method::PreferentialBlockVoting => self.manager.get_number_of_non_exhausted_ballots().div_ceil(2) as f64,
            Method::SingleTransferableVote{quota} => quota,
        }
    }

    /// Work out who should be elected or rejected this round, without changing anything.
    fn find_decisions(&self,round:usize) -> Result<RoundDecisions,ElectionError> {
        let threshold = self.threshold();
        let seats_left = self.seats_left();
        if seats_left==0 { return Ok(RoundDecisions::default()); } // everyone left will be rejected.
        let in_race = self.manager.get_candidates_in_race();
        let tallies : Vec<f64> = in_race.iter().map(|c|self.manager.get_number_of_votes(c)).collect::<Result<_,_>>()?;
        let mut votes_remaining : f64 = tallies.iter().sum();
        let mut last_votes = 0.0;
        let mut decisions = RoundDecisions::default();
        for (i,(candidate,&votes)) in in_race.iter().zip(tallies.iter()).enumerate() {
            if votes-ROUNDING_ERROR>=threshold && decisions.to_elect.len()<seats_left {
                decisions.to_elect.push(candidate.clone());
            } else if i>=seats_left && votes_remaining-CONSIDERED_EQUAL_MARGIN<=last_votes {
                // this candidate and everyone below can't catch up with the candidate above.
                if let Method::SingleTransferableVote{..} = self.method {
                    // surpluses of the elected have to be distributed first.
                    if !decisions.to_elect.is_empty() { break; }
                }
                decisions.to_reject.push(candidate.clone());
            } else if i+1==in_race.len() && in_race.len()>seats_left {
                return Err(ElectionError::IllegalAlgorithmState(round));
            }
            last_votes=votes;
            votes_remaining-=votes;
        }
        Ok(decisions)
    }

    /// Apply the decisions, and fill or close the count if it is determined. Returns everyone decided this round.
    fn apply_decisions(&mut self,mut decisions:RoundDecisions) -> Result<RoundDecisions,ElectionError> {
        for candidate in &decisions.to_elect { self.manager.elect_candidate(candidate)?; }
        for candidate in decisions.to_reject.iter().rev() { self.manager.reject_candidate(candidate)?; }
        if self.manager.get_number_of_candidates_in_race()<=self.seats_left() {
            for candidate in self.manager.get_candidates_in_race() {
                self.manager.elect_candidate(&candidate)?;
                decisions.to_elect.push(candidate);
            }
        }
        if self.seats_left()==0 {
            for candidate in self.manager.get_candidates_in_race().into_iter().rev() {
                self.manager.reject_candidate(&candidate)?;
                decisions.to_reject.push(candidate);
            }
        }
        Ok(decisions)
    }

    fn transfer(&mut self,decisions:&RoundDecisions) -> Result<(),ElectionError> {
        if let Method::SingleTransferableVote{quota} = self.method {
            for candidate in &decisions.to_elect {
                let excess = self.manager.get_number_of_votes(candidate)?-quota;
                self.manager.transfer_votes(candidate,excess)?;
            }
        }
        for candidate in &decisions.to_reject {
            let votes = self.manager.get_number_of_votes(candidate)?;
            self.manager.transfer_votes(candidate,votes)?;
        }
        Ok(())
    }

    fn go(mut self) -> Result<ElectionResults,ElectionError> {
        loop {
            let round = self.results.rounds.len()+1;
            let decisions = self.find_decisions(round)?;
            let decisions = self.apply_decisions(decisions)?;
            let round_result = self.manager.get_results();
            debug!("Round {} with {:.4} blank votes: {:?}",round,round_result.number_of_blank_votes,round_result.candidate_results.iter().map(|c|(c.candidate.name.as_str(),c.number_of_votes,c.status)).collect::<Vec<_>>());
            self.results.register_round_results(round_result);
            if self.manager.get_number_of_candidates_in_race()==0 { break; }
            self.transfer(&decisions)?;
        }
        Ok(self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote_count::CandidateStatus;

    fn ballot(candidates:&[&Candidate]) -> Ballot { Ballot::new(candidates.iter().map(|&c|c.clone()).collect()).unwrap() }

    #[test]
    fn pbv_elects_several_in_one_round() {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let askeladden = Candidate::new("Askeladden");
        let candidates = vec![per.clone(),paal.clone(),askeladden.clone()];
        let ballots = vec![ballot(&[&askeladden,&per]),ballot(&[&per,&paal]),ballot(&[&per,&paal]),ballot(&[&paal,&per]),ballot(&[&paal,&per,&askeladden])];
        let mut randomness = Randomness::seeded(0);
        let results = preferential_block_voting(&candidates,&ballots,2,CountOptions::default(),&mut randomness).unwrap();
        assert_eq!(1,results.rounds.len());
        assert_eq!(vec![per,paal],results.get_winners());
        assert_eq!(Some(CandidateStatus::Rejected),results.rounds[0].status_of(&askeladden));
    }

    #[test]
    fn stv_distributes_surplus_before_rejecting() {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let maria = Candidate::new("Maria");
        let ingrid = Candidate::new("Ingrid");
        let candidates = vec![per.clone(),paal.clone(),maria.clone(),ingrid.clone()];
        let mut ballots = vec![ballot(&[&per,&paal]);7];
        ballots.push(ballot(&[&maria,&ingrid]));
        ballots.push(ballot(&[&ingrid,&maria]));
        ballots.push(ballot(&[&ingrid,&maria]));
        let mut randomness = Randomness::seeded(0);
        let results = single_transferable_vote(&candidates,&ballots,2,CountOptions::default(),&mut randomness).unwrap();
        assert_eq!(2,results.rounds.len());
        // maria could not catch up, but was not rejected in the first round as per had a surplus.
        assert_eq!(Some(CandidateStatus::Active),results.rounds[0].status_of(&maria));
        assert_eq!(Some(CandidateStatus::Elected),results.rounds[0].status_of(&per));
        assert_eq!(vec![per,paal],results.get_winners());
    }

    #[test]
    fn more_seats_than_candidates() {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let candidates = vec![per.clone(),paal.clone()];
        let ballots = vec![ballot(&[&per]),ballot(&[&per]),ballot(&[])];
        let mut randomness = Randomness::seeded(0);
        let results = single_transferable_vote(&candidates,&ballots,3,CountOptions::default(),&mut randomness).unwrap();
        assert_eq!(vec![per.clone(),paal.clone()],results.get_winners());
        let results = preferential_block_voting(&candidates,&ballots,3,CountOptions::default(),&mut randomness).unwrap();
        assert_eq!(1,results.rounds.len());
        assert_eq!(2,results.get_winners().len());
    }

    #[test]
    fn no_candidates() {
        let mut randomness = Randomness::seeded(0);
        let results = preferential_block_voting(&[],&[],1,CountOptions::default(),&mut randomness).unwrap();
        assert_eq!(1,results.rounds.len());
        assert!(results.get_winners().is_empty());
    }

    #[test]
    fn never_more_winners_than_seats() {
        // everyone reaches the majority.
        let a = Candidate::new("A");
        let b = Candidate::new("B");
        let c = Candidate::new("C");
        let candidates = vec![a.clone(),b.clone(),c.clone()];
        let ballots = vec![ballot(&[&a,&b,&c]),ballot(&[&b,&c,&a]),ballot(&[&c,&a,&b])];
        for seed in 0..10 {
            let mut randomness = Randomness::seeded(seed);
            let results = preferential_block_voting(&candidates,&ballots,2,CountOptions::default(),&mut randomness).unwrap();
            assert_eq!(2,results.get_winners().len());
            let results = single_transferable_vote(&candidates,&ballots,1,CountOptions::default(),&mut randomness).unwrap();
            assert_eq!(1,results.get_winners().len());
        }
    }
}
