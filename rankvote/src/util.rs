// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.

//! Floating point comparisons used when counting fractional votes.

/// Tallies closer than this are considered tied when ranking candidates.
pub const CONSIDERED_EQUAL_MARGIN : f64 = 0.001;

/// Slack allowed when testing whether a tally has reached a threshold such as a quota.
pub const ROUNDING_ERROR : f64 = 1e-6;

pub fn almost_equal(value1:f64,value2:f64) -> bool { (value1-value2).abs() < CONSIDERED_EQUAL_MARGIN }

/// round to 4 decimal places.
pub fn round4(value:f64) -> f64 { (value*10000.0).round()/10000.0 }

/// true if the value would be shown as zero to 4 decimal places.
pub fn rounds_to_zero(value:f64) -> bool { round4(value)==0.0 }
