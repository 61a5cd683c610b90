// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! Counting methods that fill a single seat.

use crate::ballot_metadata::Candidate;
use crate::ballot_paper::Ballot;
use crate::election_manager::{CountOptions, ElectionError};
use crate::election_results::ElectionResults;
use crate::multiple_seat_ranking_methods::preferential_block_voting;
use crate::random_util::Randomness;

/// Instant runoff voting, also known as the alternative vote. Voters rank candidates and have one
/// vote. A candidate with a majority of the ballots still in play wins; otherwise the candidates
/// who can not win are rejected and their votes go to the next preference on each ballot.
///
/// This is the same as preferential block voting for one seat.
/// ```
/// use rankvote::ballot_metadata::Candidate;
/// use rankvote::ballot_paper::Ballot;
/// use rankvote::election_manager::CountOptions;
/// use rankvote::random_util::Randomness;
/// use rankvote::instant_runoff_voting;
/// let stay = Candidate::new("Stay");
/// let soft = Candidate::new("Soft Brexit");
/// let hard = Candidate::new("Hard Brexit");
/// let ballots = vec![
///     Ballot::new(vec![soft.clone(),stay.clone()]).unwrap(),
///     Ballot::new(vec![stay.clone(),soft.clone()]).unwrap(),
///     Ballot::new(vec![stay.clone(),soft.clone()]).unwrap(),
///     Ballot::new(vec![hard.clone(),soft.clone()]).unwrap(),
///     Ballot::new(vec![hard.clone(),stay.clone(),soft.clone()]).unwrap(),
/// ];
/// let results = instant_runoff_voting(&[stay.clone(),soft,hard],&ballots,CountOptions::default(),&mut Randomness::seeded(0)).unwrap();
/// assert_eq!(vec![stay],results.get_winners());
/// ```
pub fn instant_runoff_voting(candidates:&[Candidate],ballots:&[Ballot],options:CountOptions,randomness:&mut Randomness) -> Result<ElectionResults,ElectionError> {
    preferential_block_voting(candidates,ballots,1,options,randomness)
}
