// Copyright 2021-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.

#[cfg(test)]
mod tests {
    use rankvote::ballot_metadata::Candidate;
    use rankvote::ballot_paper::Ballot;
    use rankvote::election_manager::CountOptions;
    use rankvote::election_results::{ElectionResults, RoundResult};
    use rankvote::random_util::Randomness;
    use rankvote::vote_count::CandidateStatus;
    use rankvote::{preferential_block_voting, single_transferable_vote};

    fn ballot(candidates:&[&Candidate]) -> Ballot { Ballot::new(candidates.iter().map(|&c|c.clone()).collect()).unwrap() }

    fn assert_votes(expected:&[f64],round:&RoundResult,tolerance:f64) {
        let actual : Vec<f64> = round.candidate_results.iter().map(|c|c.number_of_votes).collect();
        assert_eq!(expected.len(),actual.len(),"Expected {:?} got {:?}",expected,actual);
        for (e,a) in expected.iter().zip(actual.iter()) {
            assert!((e-a).abs()<=tolerance,"Expected {:?} got {:?}",expected,actual);
        }
    }

    fn order(round:&RoundResult) -> Vec<Candidate> { round.candidate_results.iter().map(|c|c.candidate.clone()).collect() }

    struct MajorityExample {
        william : Candidate,
        john : Candidate,
        charles : Candidate,
        thomas : Candidate,
        candidates : Vec<Candidate>,
        ballots : Vec<Ballot>,
    }

    fn majority_example() -> MajorityExample {
        let william = Candidate::new("William, popular moderate");
        let john = Candidate::new("John, moderate");
        let charles = Candidate::new("Charles, moderate");
        let thomas = Candidate::new("Thomas, far-left");
        let candidates = vec![william.clone(),john.clone(),charles.clone(),thomas.clone()];
        let mut ballots = vec![];
        for preferences in [
            [&william,&john,&charles,&thomas],
            [&william,&charles,&john,&thomas],
            [&john,&william,&charles,&thomas],
            [&thomas,&william,&john,&charles],
            [&thomas,&john,&william,&charles]] {
            ballots.push(ballot(&preferences));
            ballots.push(ballot(&preferences));
        }
        MajorityExample{ william, john, charles, thomas, candidates, ballots }
    }

    fn count_stv(candidates:&[Candidate],ballots:&[Ballot],seats:usize) -> ElectionResults {
        single_transferable_vote(candidates,ballots,seats,CountOptions::default(),&mut Randomness::seeded(3)).unwrap()
    }

    #[test]
    fn test_simple_pbv() {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let askeladden = Candidate::new("Askeladden");
        let candidates = vec![per.clone(),paal.clone(),askeladden.clone()];
        let ballots = vec![
            ballot(&[&askeladden,&per]),
            ballot(&[&per,&paal]),
            ballot(&[&per,&paal]),
            ballot(&[&paal,&per]),
            ballot(&[&paal,&per,&askeladden]),
        ];
        let results = preferential_block_voting(&candidates,&ballots,2,CountOptions::default(),&mut Randomness::seeded(3)).unwrap();
        let winners = results.get_winners();
        assert_eq!(2,winners.len());
        assert!(winners.contains(&per));
        assert!(winners.contains(&paal));
        assert_votes(&[5.0,4.0,1.0],&results.rounds[0],1e-9);
    }

    #[test]
    fn test_pbv_majority_example() {
        let example = majority_example();
        let results = preferential_block_voting(&example.candidates,&example.ballots,2,CountOptions::default(),&mut Randomness::seeded(3)).unwrap();
        let round = &results.rounds[0];
        assert_eq!(vec![example.william.clone(),example.john.clone(),example.thomas.clone(),example.charles.clone()],order(round));
        assert_votes(&[8.0,6.0,4.0,2.0],round,1e-9);
        let statuses : Vec<CandidateStatus> = round.candidate_results.iter().map(|c|c.status).collect();
        assert_eq!(vec![CandidateStatus::Elected,CandidateStatus::Elected,CandidateStatus::Rejected,CandidateStatus::Rejected],statuses);
        assert_eq!(vec![example.william,example.john],results.get_winners());
    }

    #[test]
    fn test_stv_majority_example() {
        let example = majority_example();
        let results = count_stv(&example.candidates,&example.ballots,2);
        assert_eq!(1,results.rounds.len());
        let round = &results.rounds[0];
        assert_eq!(vec![example.william.clone(),example.thomas.clone(),example.john.clone(),example.charles.clone()],order(round));
        assert_votes(&[4.0,4.0,2.0,0.0],round,1e-9);
        assert_eq!(vec![example.william,example.thomas],results.get_winners());
    }

    #[test]
    fn test_simple_stv() {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let askeladden = Candidate::new("Askeladden");
        let candidates = vec![per.clone(),paal.clone(),askeladden.clone()];
        let ballots = vec![
            ballot(&[&askeladden,&per]),
            ballot(&[&per,&paal]),
            ballot(&[&per,&paal]),
            ballot(&[&paal,&per]),
            ballot(&[&paal,&per,&askeladden]),
        ];
        let results = count_stv(&candidates,&ballots,2);
        assert_eq!(vec![per,paal],results.get_winners());
        assert_eq!(1,results.rounds.len());
    }

    fn per_paal_maria_ingrid(number_voting_per:usize) -> (Vec<Candidate>,Vec<Ballot>) {
        let per = Candidate::new("Per");
        let paal = Candidate::new("Pål");
        let maria = Candidate::new("Maria");
        let ingrid = Candidate::new("Ingrid");
        let mut ballots = vec![ballot(&[&per,&paal]);number_voting_per];
        ballots.push(ballot(&[&maria,&ingrid]));
        ballots.push(ballot(&[&ingrid,&maria]));
        ballots.push(ballot(&[&ingrid,&maria]));
        (vec![per,paal,maria,ingrid],ballots)
    }

    #[test]
    fn test_stv_surplus_transfer() {
        // quota 10/3. Per's surplus of 3.67 makes Pål pass the quota.
        let (candidates,ballots) = per_paal_maria_ingrid(7);
        let results = count_stv(&candidates,&ballots,2);
        assert_eq!(vec![candidates[0].clone(),candidates[1].clone()],results.get_winners());
        assert_eq!(2,results.rounds.len());
        assert_votes(&[7.0,2.0,1.0,0.0],&results.rounds[0],0.02);
        assert_votes(&[3.33,3.67,2.0,1.0],&results.rounds[1],0.02);
        assert_eq!(vec![candidates[0].clone(),candidates[1].clone(),candidates[3].clone(),candidates[2].clone()],order(&results.rounds[1]));
    }

    #[test]
    fn test_stv_surplus_transfer_larger_quota() {
        // quota 11/3.
        let (candidates,ballots) = per_paal_maria_ingrid(8);
        let results = count_stv(&candidates,&ballots,2);
        assert_eq!(vec![candidates[0].clone(),candidates[1].clone()],results.get_winners());
        assert_votes(&[8.0,2.0,1.0,0.0],&results.rounds[0],0.02);
        assert_votes(&[3.67,4.33,2.0,1.0],&results.rounds[1],0.02);
    }

    #[test]
    fn test_stv_quota_reached_exactly() {
        let a = Candidate::new("A");
        let b = Candidate::new("B");
        let c = Candidate::new("C");
        let d = Candidate::new("D");
        let candidates = vec![a.clone(),b.clone(),c.clone(),d.clone()];
        // quota 9/3=3, which A has exactly, leaving no surplus.
        let mut ballots = vec![];
        ballots.extend(vec![ballot(&[&a,&b]);2]);
        ballots.extend(vec![ballot(&[&b,&a]);2]);
        ballots.extend(vec![ballot(&[&c,&d]);2]);
        ballots.extend(vec![ballot(&[&d,&c]);2]);
        ballots.push(ballot(&[&a,&c]));
        let results = count_stv(&candidates,&ballots,2);
        let winners = results.get_winners();
        assert_eq!(2,winners.len());
        assert!(winners.contains(&a));
        assert!(winners.iter().all(|w|w!=&b));
        for round in &results.rounds { assert!((round.total_votes()-9.0).abs()<1e-4); }
    }
}
