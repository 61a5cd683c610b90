// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! Store the history of the count, one snapshot per round.


use std::fmt::{Display, Formatter};
use serde::Serialize;
use crate::ballot_metadata::Candidate;
use crate::util::almost_equal;
use crate::vote_count::CandidateStatus;

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct CandidateResult {
    pub candidate : Candidate,
    pub number_of_votes : f64,
    pub status : CandidateStatus,
}

/// The state of the count at the end of a round.
#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct RoundResult {
    /// Elected candidates in order of election, then candidates still in the race by rank, then
    /// rejected candidates, most recently rejected first.
    pub candidate_results : Vec<CandidateResult>,
    /// votes not going to any candidate, either because a ballot had too few preferences or because they were all used up.
    pub number_of_blank_votes : f64,
}

impl RoundResult {
    pub fn total_votes(&self) -> f64 {
        self.candidate_results.iter().map(|c|c.number_of_votes).sum::<f64>()+self.number_of_blank_votes
    }
    pub fn status_of(&self,candidate:&Candidate) -> Option<CandidateStatus> {
        self.candidate_results.iter().find(|c|&c.candidate==candidate).map(|c|c.status)
    }
}

/// The whole history of a count. The last round is the final result.
#[derive(Clone,Debug,Default,PartialEq,Serialize)]
pub struct ElectionResults {
    pub rounds : Vec<RoundResult>,
}

impl ElectionResults {
    pub fn register_round_results(&mut self,round:RoundResult) { self.rounds.push(round); }

    /// The elected candidates in the final round, in the order they were elected.
    pub fn get_winners(&self) -> Vec<Candidate> {
        match self.rounds.last() {
            None => vec![],
            Some(last_round) => last_round.candidate_results.iter().filter(|c|c.status==CandidateStatus::Elected).map(|c|c.candidate.clone()).collect(),
        }
    }
}

/// Headers get 2 characters of padding, like the "simple" table format of python's tabulate.
fn column_width<'a>(header:&str,cells:impl Iterator<Item=&'a str>) -> usize {
    cells.map(|s|s.chars().count()).max().unwrap_or(0).max(header.len()+2)
}

impl Display for RoundResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut rows : Vec<(String,f64,String)> = self.candidate_results.iter().map(|c|(c.candidate.name.clone(),c.number_of_votes,c.status.to_string())).collect();
        if !almost_equal(self.number_of_blank_votes,0.0) {
            rows.push(("Blank votes".to_string(),self.number_of_blank_votes,CandidateStatus::Rejected.to_string()));
        }
        let all_integers = rows.iter().all(|(_,votes,_)|votes.fract()==0.0);
        let decimals = if all_integers { 0 } else { 2 };
        let votes : Vec<String> = rows.iter().map(|(_,v,_)|format!("{:.*}",decimals,v)).collect();
        let name_width = column_width("Candidate",rows.iter().map(|r|r.0.as_str()));
        let votes_width = column_width("Votes",votes.iter().map(|s|s.as_str()));
        let status_width = column_width("Status",rows.iter().map(|r|r.2.as_str()));
        writeln!(f,"{:<name_width$}  {:>votes_width$}  {}","Candidate","Votes","Status")?;
        write!(f,"{}  {}  {}","-".repeat(name_width),"-".repeat(votes_width),"-".repeat(status_width))?;
        for ((name,_,status),votes) in rows.iter().zip(votes.iter()) {
            write!(f,"\n{:<name_width$}  {:>votes_width$}  {}",name,votes,status)?;
        }
        Ok(())
    }
}

impl Display for ElectionResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i,round) in self.rounds.iter().enumerate() {
            if i+1==self.rounds.len() { writeln!(f,"FINAL RESULT")?; }
            else { writeln!(f,"ROUND {}",i+1)?; }
            writeln!(f,"{}",round)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
