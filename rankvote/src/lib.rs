// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! Count ranked ballots by instant runoff voting, single transferable vote, or preferential block voting.

pub mod ballot_paper;
pub mod ballot_metadata;
pub mod vote_count;
pub mod election_results;
pub mod election_manager;
pub mod tie_resolution;
pub mod random_util;
pub mod util;
pub mod multiple_seat_ranking_methods;
pub mod single_seat_ranking_methods;

pub use single_seat_ranking_methods::instant_runoff_voting;
pub use multiple_seat_ranking_methods::{preferential_block_voting, single_transferable_vote};
