// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


use std::fmt::{Display, Formatter};
use std::str::FromStr;
use anyhow::anyhow;
use serde::{Serialize,Deserialize};
use rankvote::ballot_metadata::Candidate;
use rankvote::ballot_paper::Ballot;
use rankvote::election_manager::CountOptions;
use rankvote::election_results::ElectionResults;
use rankvote::random_util::Randomness;
use rankvote::{instant_runoff_voting, preferential_block_voting, single_transferable_vote};

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum Method {
    /// Instant runoff voting, one seat.
    IRV,
    /// Single transferable vote.
    STV,
    /// Preferential block voting.
    PBV,
}

impl FromStr for Method {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IRV" => Ok(Method::IRV),
            "STV" => Ok(Method::STV),
            "PBV" => Ok(Method::PBV),
            _ => Err("No such method supported")
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Method::IRV => "IRV",
            Method::STV => "STV",
            Method::PBV => "PBV",
        };
        f.write_str(s)
    }
}

impl Method {
    /// Count the ballots. seats is ignored for IRV, and required otherwise.
    pub fn count(&self,candidates:&[Candidate],ballots:&[Ballot],seats:Option<usize>,options:CountOptions,randomness:&mut Randomness) -> anyhow::Result<ElectionResults> {
        let get_seats = || match seats {
            Some(0) => Err(anyhow!("Need at least one seat")),
            Some(n) => Ok(n),
            None => Err(anyhow!("Need to specify number of seats for {}",self)),
        };
        Ok(match self {
            Method::IRV => instant_runoff_voting(candidates,ballots,options,randomness)?,
            Method::STV => single_transferable_vote(candidates,ballots,get_seats()?,options,randomness)?,
            Method::PBV => preferential_block_voting(candidates,ballots,get_seats()?,options,randomness)?,
        })
    }
}
