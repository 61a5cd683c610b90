// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use log::trace;
use serde::{Serialize,Deserialize};
use crate::ballot_metadata::CandidateIndex;
use crate::random_util::Randomness;

/// How to order candidates with the same tally.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum TieBreakRule {
    /// The candidate ranked second (among candidates still in the race) on more ballots goes first.
    /// If that is the same, look at third preferences, and so on. If it is still not resolved after
    /// all preferences, draw lots.
    #[default]
    MostSecondChoiceVotes,
    /// Draw lots.
    Random,
}

impl FromStr for TieBreakRule {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MostSecondChoiceVotes" => Ok(TieBreakRule::MostSecondChoiceVotes),
            "Random" => Ok(TieBreakRule::Random),
            _ => Err("No such tie break rule supported")
        }
    }
}

impl Display for TieBreakRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TieBreakRule::MostSecondChoiceVotes => "MostSecondChoiceVotes",
            TieBreakRule::Random => "Random",
        })
    }
}

impl TieBreakRule {
    /// Sort tied_candidates high to low (most favoured first).
    ///
    /// `ballots` are the preferences of every voter, and `in_race` says which candidates are still
    /// active; only active candidates count when determining what position a candidate is on a ballot.
    pub fn resolve(self,tied_candidates:&mut [CandidateIndex],ballots:&[Vec<CandidateIndex>],in_race:impl Fn(CandidateIndex)->bool,num_candidates:usize,randomness:&mut Randomness) {
        let lots : HashMap<CandidateIndex,u64> = tied_candidates.iter().map(|&c|(c,randomness.draw_lot())).collect();
        match self {
            TieBreakRule::Random => {
                tied_candidates.sort_by_key(|c|lots[c]);
            }
            TieBreakRule::MostSecondChoiceVotes => {
                let counts = count_later_preferences(tied_candidates,ballots,in_race,num_candidates);
                tied_candidates.sort_by(|a,b|compare_later_preferences(&counts[a],&counts[b]).then_with(||lots[a].cmp(&lots[b])));
            }
        }
        trace!("Resolved tie {:?} using {}",tied_candidates,self);
    }
}

/// For each of the candidates, count how many ballots have them in position 0,1,2... among candidates in the race.
fn count_later_preferences(candidates:&[CandidateIndex],ballots:&[Vec<CandidateIndex>],in_race:impl Fn(CandidateIndex)->bool,num_candidates:usize) -> HashMap<CandidateIndex,Vec<usize>> {
    let mut counts : HashMap<CandidateIndex,Vec<usize>> = candidates.iter().map(|&c|(c,vec![0;num_candidates])).collect();
    for ballot in ballots {
        for (position,candidate) in ballot.iter().cloned().filter(|&c|in_race(c)).enumerate() {
            if let Some(for_candidate) = counts.get_mut(&candidate) {
                if position<num_candidates { for_candidate[position]+=1; }
            }
        }
    }
    counts
}

/// Order so that the candidate with more votes at the first differing position (from second preference on) comes first.
fn compare_later_preferences(counts1:&[usize],counts2:&[usize]) -> Ordering {
    for position in 1..counts1.len().min(counts2.len()) {
        match counts2[position].cmp(&counts1[position]) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
    Ordering::Equal
}
