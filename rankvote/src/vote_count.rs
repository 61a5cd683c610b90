// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.

//! The running tally for a single candidate.

use std::fmt::{Display, Formatter};
use serde::{Serialize,Deserialize};
use crate::ballot_metadata::Candidate;
use crate::election_results::CandidateResult;

/// A ballot, referred to by position in the list of ballots given to the count, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BallotIndex(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CandidateStatus {
    /// Still in the race.
    Active,
    Elected,
    Rejected,
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CandidateStatus::Active => "Active",
            CandidateStatus::Elected => "Elected",
            CandidateStatus::Rejected => "Rejected",
        })
    }
}

#[derive(Clone, Debug)]
pub struct CandidateVoteCount {
    pub candidate : Candidate,
    pub status : CandidateStatus,
    pub number_of_votes : f64,
    /// the ballots currently counted (possibly fractionally) for this candidate.
    pub votes : Vec<BallotIndex>,
}

impl CandidateVoteCount {
    pub fn new(candidate:Candidate) -> Self {
        CandidateVoteCount{ candidate, status: CandidateStatus::Active, number_of_votes: 0.0, votes: vec![] }
    }

    pub fn is_in_race(&self) -> bool { self.status==CandidateStatus::Active }

    pub fn as_candidate_result(&self) -> CandidateResult {
        CandidateResult{ candidate: self.candidate.clone(), number_of_votes: self.number_of_votes, status: self.status }
    }
}
