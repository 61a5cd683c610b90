// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


use clap::Parser;
use std::path::PathBuf;
use std::fs::File;
use log::{info, warn};
use main_app::election_file::ElectionFile;
use main_app::method::Method;
use rankvote::election_manager::CountOptions;
use rankvote::random_util::Randomness;
use rankvote::tie_resolution::TieBreakRule;

#[derive(Parser)]
#[command(version = "0.2", author = "Andrew Conway", name="RankVote")]
/// Count ranked choice elections using instant runoff voting, single transferable vote
/// or preferential block voting.
struct Opts {
    /// The counting method to use. One of IRV, STV, PBV
    method : Method,

    /// The name of the .json or normalized .csv file to get votes from
    votes : PathBuf,

    /// The number of people to elect. If used, overrides the value in the .json file. Ignored for IRV.
    #[arg(short, long)]
    seats : Option<usize>,

    /// How to order candidates with equal votes. MostSecondChoiceVotes or Random
    #[arg(long, default_value_t = TieBreakRule::MostSecondChoiceVotes)]
    tie_break : TieBreakRule,

    /// Give votes that would otherwise be blank to random candidates.
    #[arg(long)]
    fill_blank_randomly : bool,

    /// Seed for the random numbers, for a repeatable count. If not given, a different count may result each time if there are ties.
    #[arg(long)]
    seed : Option<u64>,

    /// An optional file to store the results in as JSON.
    #[arg(short, long)]
    json : Option<PathBuf>,

    /// Print the status of the count as it goes.
    #[arg(long)]
    verbose : bool,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if opt.verbose { "debug" } else { "warn" })).init();

    let votes = ElectionFile::load(&opt.votes)?;
    let candidates = votes.candidates();
    let ballots = votes.ballots()?;
    info!("Read {} candidates and {} ballots from {}",candidates.len(),ballots.len(),opt.votes.display());

    let seats = opt.seats.or(votes.seats);
    if opt.method==Method::IRV && seats.is_some_and(|s|s!=1) { warn!("IRV elects one candidate; ignoring {} seats",seats.unwrap_or(1)); }
    let options = CountOptions{ tie_break_rule: opt.tie_break, fill_blank_randomly: opt.fill_blank_randomly };
    let mut randomness = match opt.seed {
        Some(seed) => Randomness::seeded(seed),
        None => Randomness::from_entropy(),
    };

    let results = opt.method.count(&candidates,&ballots,seats,options,&mut randomness)?;
    print!("{}",results);
    let winners : Vec<String> = results.get_winners().iter().map(|c|c.to_string()).collect();
    println!("Elected: {}",winners.join(", "));

    if let Some(json) = &opt.json {
        if let Some(parent) = json.parent() { std::fs::create_dir_all(parent)? }
        serde_json::to_writer_pretty(File::create(json)?,&results)?;
    }
    Ok(())
}
