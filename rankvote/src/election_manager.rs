// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.

//! The bookkeeping common to all the counting methods: who has which ballots, how many votes
//! each candidate has, who is still in the race, and moving votes on when a candidate is
//! elected or rejected.
//!
//! Candidates in the race are always kept sorted, most votes first, with ties resolved by the
//! configured [TieBreakRule]. Every operation that changes tallies re-sorts.


use std::collections::HashMap;
use log::{debug, info};
use serde::{Serialize,Deserialize};
use thiserror::Error;
use crate::ballot_metadata::{Candidate, CandidateIndex};
use crate::ballot_paper::Ballot;
use crate::election_results::RoundResult;
use crate::random_util::Randomness;
use crate::tie_resolution::TieBreakRule;
use crate::util::{almost_equal, round4, rounds_to_zero};
use crate::vote_count::{BallotIndex, CandidateStatus, CandidateVoteCount};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElectionError {
    #[error("Candidate {0} not found in election manager")]
    UnknownCandidate(String),
    #[error("More than one candidate is called {0}")]
    DuplicateCandidate(String),
    #[error("Can not transfer votes from candidate {0} who is still in the race")]
    InvalidTransferSource(String),
    #[error("Candidate {0} is already {1}")]
    CandidateAlreadyDecided(String,CandidateStatus),
    #[error("No candidates left in race")]
    NoCandidatesRemain,
    #[error("Round {0} could not decide what to do with every candidate in the race")]
    IllegalAlgorithmState(usize),
}

/// Options that apply to all counting methods.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub struct CountOptions {
    pub tie_break_rule : TieBreakRule,
    /// If a ballot has fewer preferences than it needs (initially, or after all its preferences are
    /// elected or rejected), give the missing votes to random candidates rather than counting them as blank.
    pub fill_blank_randomly : bool,
}

pub struct ElectionManager<'r> {
    /// The tally, by candidate.
    candidates : Vec<CandidateVoteCount>,
    lookup : HashMap<String,CandidateIndex>,
    /// preferences on each ballot, most preferred first.
    ballots : Vec<Vec<CandidateIndex>>,
    /// the candidates currently counting each ballot. At most votes_per_voter of them.
    holders : Vec<Vec<CandidateIndex>>,
    candidates_in_race : Vec<CandidateIndex>,
    /// in the order elected.
    elected_candidates : Vec<CandidateIndex>,
    /// in the order rejected.
    rejected_candidates : Vec<CandidateIndex>,
    exhausted : Vec<bool>,
    number_of_exhausted_ballots : usize,
    number_of_blank_votes : f64,
    number_of_votes_per_voter : usize,
    options : CountOptions,
    randomness : &'r mut Randomness,
}

impl <'r> ElectionManager<'r> {
    /// Set up a count, giving each ballot's first `number_of_votes_per_voter` preferences a vote each.
    pub fn new(candidates:&[Candidate],ballots:&[Ballot],number_of_votes_per_voter:usize,options:CountOptions,randomness:&'r mut Randomness) -> Result<Self,ElectionError> {
        let mut lookup : HashMap<String,CandidateIndex> = HashMap::with_capacity(candidates.len());
        for (i,candidate) in candidates.iter().enumerate() {
            if lookup.insert(candidate.name.clone(),CandidateIndex(i)).is_some() { return Err(ElectionError::DuplicateCandidate(candidate.name.clone())); }
        }
        let resolve = |candidate:&Candidate| lookup.get(&candidate.name).copied().ok_or_else(||ElectionError::UnknownCandidate(candidate.name.clone()));
        let resolved_ballots : Vec<Vec<CandidateIndex>> = ballots.iter().map(|b|b.ranked_candidates().iter().map(resolve).collect::<Result<Vec<_>,_>>()).collect::<Result<_,_>>()?;
        let mut manager = ElectionManager{
            candidates: candidates.iter().cloned().map(CandidateVoteCount::new).collect(),
            lookup,
            holders: vec![vec![];resolved_ballots.len()],
            exhausted: vec![false;resolved_ballots.len()],
            ballots: resolved_ballots,
            candidates_in_race: (0..candidates.len()).map(CandidateIndex).collect(),
            elected_candidates: vec![],
            rejected_candidates: vec![],
            number_of_exhausted_ballots: 0,
            number_of_blank_votes: 0.0,
            number_of_votes_per_voter,
            options,
            randomness,
        };
        manager.distribute_first_preferences();
        manager.sort_candidates_in_race();
        Ok(manager)
    }

    fn distribute_first_preferences(&mut self) {
        for ballot in 0..self.ballots.len() {
            let mut chosen : Vec<CandidateIndex> = self.ballots[ballot].iter().take(self.number_of_votes_per_voter).cloned().collect();
            let shortfall = self.number_of_votes_per_voter-chosen.len();
            if shortfall>0 {
                if self.options.fill_blank_randomly {
                    for _ in 0..shortfall {
                        let available : Vec<CandidateIndex> = (0..self.candidates.len()).map(CandidateIndex).filter(|c|!chosen.contains(c)).collect();
                        match self.randomness.choose(&available) {
                            Some(candidate) => chosen.push(candidate),
                            None => self.make_blank(BallotIndex(ballot),1.0),
                        }
                    }
                } else {
                    self.make_blank(BallotIndex(ballot),shortfall as f64);
                }
            }
            for candidate in chosen { self.credit(candidate,BallotIndex(ballot),1.0); }
        }
        debug!("Distributed {} ballots, {} blank votes",self.ballots.len(),self.number_of_blank_votes);
    }

    fn credit(&mut self,candidate:CandidateIndex,ballot:BallotIndex,votes:f64) {
        let vote_count = &mut self.candidates[candidate.0];
        vote_count.number_of_votes+=votes;
        vote_count.votes.push(ballot);
        self.holders[ballot.0].push(candidate);
    }

    fn make_blank(&mut self,ballot:BallotIndex,votes:f64) {
        if !self.exhausted[ballot.0] {
            self.exhausted[ballot.0]=true;
            self.number_of_exhausted_ballots+=1;
        }
        self.number_of_blank_votes+=votes;
    }

    fn index_of(&self,candidate:&Candidate) -> Result<CandidateIndex,ElectionError> {
        self.lookup.get(&candidate.name).copied().ok_or_else(||ElectionError::UnknownCandidate(candidate.name.clone()))
    }

    fn candidate(&self,index:CandidateIndex) -> &Candidate { &self.candidates[index.0].candidate }

    // METHODS WITH SIDE EFFECTS

    /// change status from Active to status, and take out of the race.
    fn decide(&mut self,candidate:&Candidate,status:CandidateStatus) -> Result<CandidateIndex,ElectionError> {
        let index = self.index_of(candidate)?;
        let vote_count = &mut self.candidates[index.0];
        if !vote_count.is_in_race() { return Err(ElectionError::CandidateAlreadyDecided(candidate.name.clone(),vote_count.status)); }
        vote_count.status=status;
        self.candidates_in_race.retain(|&c|c!=index);
        Ok(index)
    }

    pub fn elect_candidate(&mut self,candidate:&Candidate) -> Result<(),ElectionError> {
        let index = self.decide(candidate,CandidateStatus::Elected)?;
        info!("Elected {} with {:.4} votes",candidate,self.candidates[index.0].number_of_votes);
        self.elected_candidates.push(index);
        Ok(())
    }

    pub fn reject_candidate(&mut self,candidate:&Candidate) -> Result<(),ElectionError> {
        let index = self.decide(candidate,CandidateStatus::Rejected)?;
        info!("Rejected {} with {:.4} votes",candidate,self.candidates[index.0].number_of_votes);
        self.rejected_candidates.push(index);
        Ok(())
    }

    /// Take number_of_trans_votes votes from a candidate who has been elected or rejected, and share
    /// them equally between the ballots the candidate currently has. Each ballot's share goes to the
    /// next candidate on it who is still in the race, or is blank if there is no such candidate.
    pub fn transfer_votes(&mut self,candidate:&Candidate,number_of_trans_votes:f64) -> Result<(),ElectionError> {
        let index = self.index_of(candidate)?;
        if self.candidates[index.0].is_in_race() { return Err(ElectionError::InvalidTransferSource(candidate.name.clone())); }
        if rounds_to_zero(number_of_trans_votes) { return Ok(()); }
        let ballots = std::mem::take(&mut self.candidates[index.0].votes);
        if ballots.is_empty() {
            // nowhere to send them, but they still have to be accounted for.
            self.number_of_blank_votes+=number_of_trans_votes;
        } else {
            let votes_per_ballot = number_of_trans_votes/ballots.len() as f64;
            for ballot in ballots {
                self.holders[ballot.0].retain(|&c|c!=index);
                let mut new_candidate_choice = self.next_candidate_in_race(ballot);
                if new_candidate_choice.is_none() && self.options.fill_blank_randomly {
                    let holders = &self.holders[ballot.0];
                    let available : Vec<CandidateIndex> = self.candidates_in_race.iter().cloned().filter(|c|!holders.contains(c)).collect();
                    new_candidate_choice = self.randomness.choose(&available);
                }
                match new_candidate_choice {
                    Some(new_candidate) => self.credit(new_candidate,ballot,votes_per_ballot),
                    None => self.make_blank(ballot,votes_per_ballot),
                }
            }
        }
        self.candidates[index.0].number_of_votes-=number_of_trans_votes;
        debug!("Transferred {:.4} votes from {}",number_of_trans_votes,candidate);
        self.sort_candidates_in_race();
        Ok(())
    }

    /// The most preferred candidate on the ballot who is still in the race and is not already counting it.
    fn next_candidate_in_race(&self,ballot:BallotIndex) -> Option<CandidateIndex> {
        let holders = &self.holders[ballot.0];
        self.ballots[ballot.0].iter().cloned().find(|&c|self.candidates[c.0].is_in_race() && !holders.contains(&c))
    }

    fn sort_candidates_in_race(&mut self) {
        let mut order = std::mem::take(&mut self.candidates_in_race);
        let tally = |c:CandidateIndex| self.candidates[c.0].number_of_votes;
        order.sort_by(|a,b|tally(*b).total_cmp(&tally(*a)));
        // groups of candidates all within CONSIDERED_EQUAL_MARGIN of the group's leader are tied.
        let mut tied_groups = vec![];
        let mut start = 0;
        while start<order.len() {
            let end = start+order[start..].iter().take_while(|&&c|almost_equal(tally(order[start]),tally(c))).count();
            if end-start>1 { tied_groups.push(start..end); }
            start=end;
        }
        for group in tied_groups {
            let candidates = &self.candidates;
            self.options.tie_break_rule.resolve(&mut order[group],&self.ballots,|c|candidates[c.0].is_in_race(),candidates.len(),self.randomness);
        }
        self.candidates_in_race=order;
    }

    // METHODS WITHOUT SIDE EFFECTS

    /// Number of votes excluding blank and exhausted votes.
    pub fn get_number_of_non_exhausted_votes(&self) -> f64 {
        (self.ballots.len()*self.number_of_votes_per_voter) as f64-self.number_of_blank_votes
    }

    /// Number of ballots excluding those that have ever had a blank or exhausted vote.
    pub fn get_number_of_non_exhausted_ballots(&self) -> usize { self.ballots.len()-self.number_of_exhausted_ballots }

    pub fn get_number_of_blank_votes(&self) -> f64 { self.number_of_blank_votes }

    pub fn get_number_of_candidates_in_race(&self) -> usize { self.candidates_in_race.len() }

    pub fn get_number_of_elected_candidates(&self) -> usize { self.elected_candidates.len() }

    pub fn get_number_of_votes(&self,candidate:&Candidate) -> Result<f64,ElectionError> {
        Ok(self.candidates[self.index_of(candidate)?.0].number_of_votes)
    }

    pub fn get_status(&self,candidate:&Candidate) -> Result<CandidateStatus,ElectionError> {
        Ok(self.candidates[self.index_of(candidate)?.0].status)
    }

    /// Candidates in the race, most votes first.
    pub fn get_candidates_in_race(&self) -> Vec<Candidate> {
        self.candidates_in_race.iter().map(|&c|self.candidate(c).clone()).collect()
    }

    pub fn get_candidate_with_least_votes_in_race(&self) -> Result<Candidate,ElectionError> {
        self.candidates_in_race.last().map(|&c|self.candidate(c).clone()).ok_or(ElectionError::NoCandidatesRemain)
    }

    /// Candidates in the race with more than x votes (compared to 4 decimal places), most votes first.
    pub fn get_candidates_with_more_than_x_votes(&self,x:f64) -> Vec<Candidate> {
        self.candidates_in_race.iter().filter(|&&c|round4(self.candidates[c.0].number_of_votes)>round4(x)).map(|&c|self.candidate(c).clone()).collect()
    }

    pub fn get_results(&self) -> RoundResult {
        let candidate_results = self.elected_candidates.iter()
            .chain(self.candidates_in_race.iter())
            .chain(self.rejected_candidates.iter().rev())
            .map(|c|self.candidates[c.0].as_candidate_result())
            .collect();
        RoundResult{ candidate_results, number_of_blank_votes: self.number_of_blank_votes }
    }
}
