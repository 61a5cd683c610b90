// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! A ballot, being the ordered list of candidates a voter ranked.

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use crate::ballot_metadata::Candidate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Candidate {0} is listed more than once on the same ballot")]
pub struct DuplicateCandidatesError(pub Candidate);

/// A ballot where the voter has ranked all, or just some, of the candidates, most preferred first.
/// A candidate can only appear once.
#[derive(Clone,PartialEq,Eq,Hash)]
pub struct Ballot {
    ranked_candidates : Vec<Candidate>,
}

impl Ballot {
    /// Make a ballot, checking that no candidate is repeated.
    /// ```
    /// use rankvote::ballot_metadata::Candidate;
    /// use rankvote::ballot_paper::Ballot;
    /// let per = Candidate::new("Per");
    /// let paal = Candidate::new("Pål");
    /// assert!(Ballot::new(vec![per.clone(),paal.clone()]).is_ok());
    /// assert!(Ballot::new(vec![per.clone(),paal,per]).is_err());
    /// ```
    pub fn new(ranked_candidates:Vec<Candidate>) -> Result<Self,DuplicateCandidatesError> {
        let mut seen : HashSet<&Candidate> = HashSet::with_capacity(ranked_candidates.len());
        for candidate in &ranked_candidates {
            if !seen.insert(candidate) { return Err(DuplicateCandidatesError(candidate.clone())) }
        }
        Ok(Ballot{ranked_candidates})
    }

    /// The candidates, most preferred first.
    pub fn ranked_candidates(&self) -> &[Candidate] { &self.ranked_candidates }
    pub fn len(&self) -> usize { self.ranked_candidates.len() }
    pub fn is_empty(&self) -> bool { self.ranked_candidates.is_empty() }
}

impl Debug for Ballot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"<Ballot({})>",self.ranked_candidates.iter().map(|c|c.name.as_str()).collect::<Vec<_>>().join(", "))
    }
}

impl TryFrom<Vec<Candidate>> for Ballot {
    type Error = DuplicateCandidatesError;
    fn try_from(ranked_candidates: Vec<Candidate>) -> Result<Self, Self::Error> { Ballot::new(ranked_candidates) }
}
