// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.

//! Files of ballots. Two formats are supported:
//! * `.json` files with the candidate names, the ballots as lists of names, and optionally the number of seats.
//! * normalized ranked ballot `.csv` files, as published by ranked.vote, with a header line and
//!   one line `ballot_id,rank,candidate` per preference. Such a file has no separate list of candidates.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::anyhow;
use log::warn;
use serde::{Serialize,Deserialize};
use rankvote::ballot_metadata::Candidate;
use rankvote::ballot_paper::Ballot;

/// Markers in normalized files for a rank with no valid preference.
const IGNORED_CHOICES : [&str;2] = ["$UNDERVOTE","$OVERVOTE"];

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,Eq,Default)]
pub struct ElectionFile {
    pub candidates : Vec<String>,
    /// Each ballot is a list of candidate names, most preferred first.
    pub ballots : Vec<Vec<String>>,
    #[serde(default,skip_serializing_if = "Option::is_none")]
    pub seats : Option<usize>,
}

impl ElectionFile {
    /// Load a file, choosing the format from the extension (.csv is normalized, anything else json).
    pub fn load(path:&Path) -> anyhow::Result<Self> {
        let file = File::open(path).map_err(|e|anyhow!("Could not open {} : {}",path.display(),e))?;
        if path.extension().is_some_and(|e|e.eq_ignore_ascii_case("csv")) { ElectionFile::from_normalized_csv(file) }
        else { ElectionFile::from_json(file) }
    }

    pub fn from_json<R:Read>(reader:R) -> anyhow::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a normalized file. Consecutive lines with the same ballot id form one ballot. Undervotes and
    /// overvotes are skipped, as are repeated preferences for a candidate already on the ballot.
    pub fn from_normalized_csv<R:Read>(reader:R) -> anyhow::Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut res = ElectionFile::default();
        let mut known_candidates : HashSet<String> = HashSet::new();
        let mut last_ballot_id : Option<String> = None;
        let mut prefs : Vec<String> = vec![];
        for result in rdr.records() {
            let record = result?;
            if record.len()<3 { return Err(anyhow!("Line {} should have ballot_id, rank and choice",record.position().map(|p|p.line()).unwrap_or(0))); }
            let ballot_id = &record[0];
            let choice = record[2].trim();
            if last_ballot_id.as_deref()!=Some(ballot_id) {
                if last_ballot_id.is_some() { res.ballots.push(std::mem::take(&mut prefs)); }
                last_ballot_id=Some(ballot_id.to_string());
            }
            if IGNORED_CHOICES.contains(&choice) { continue; }
            if known_candidates.insert(choice.to_string()) { res.candidates.push(choice.to_string()); }
            if prefs.iter().any(|p|p==choice) { warn!("Ballot {} lists {} more than once",ballot_id,choice); }
            else { prefs.push(choice.to_string()); }
        }
        if last_ballot_id.is_some() { res.ballots.push(prefs); }
        Ok(res)
    }

    pub fn candidates(&self) -> Vec<Candidate> { self.candidates.iter().map(|name|Candidate::new(name.as_str())).collect() }

    pub fn ballots(&self) -> anyhow::Result<Vec<Ballot>> {
        self.ballots.iter().enumerate().map(|(i,names)|{
            Ballot::new(names.iter().map(|name|Candidate::new(name.as_str())).collect()).map_err(|e|anyhow!("Ballot {} : {}",i+1,e))
        }).collect()
    }
}
