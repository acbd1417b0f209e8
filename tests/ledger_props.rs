// Property-based tests for the finisher rule and derived totals
use im::Vector;
use proptest::prelude::*;
use skyjo_ledger::core::{PlayerId, Round, ScoreMap};
use skyjo_ledger::ledger::RoundLedger;
use skyjo_ledger::session::{GameSession, SessionStatus};

fn raw_round() -> impl Strategy<Value = (Vec<i32>, usize)> {
    prop::collection::vec(-20i32..=40, 2..=6).prop_flat_map(|scores| {
        let len = scores.len();
        (Just(scores), 0..len)
    })
}

fn to_map(scores: &[i32]) -> ScoreMap {
    scores
        .iter()
        .enumerate()
        .map(|(i, s)| (PlayerId::new(i as u32), *s))
        .collect()
}

proptest! {
    #[test]
    fn proptest_finisher_rule_only_touches_finisher((scores, finisher) in raw_round()) {
        let raw = to_map(&scores);
        let finisher = PlayerId::new(finisher as u32);
        let finals = RoundLedger::apply_finisher_rule(&raw, finisher);
        let round_min = *scores.iter().min().unwrap();

        for (id, raw_score) in raw.iter() {
            let final_score = finals[id];
            if *id == finisher && *raw_score != round_min {
                prop_assert_eq!(final_score, raw_score * 2);
            } else {
                prop_assert_eq!(final_score, *raw_score);
            }
        }
    }

    #[test]
    fn proptest_totals_are_sum_of_finals(games in prop::collection::vec(raw_round(), 0..12)) {
        let player_count = 6;
        let mut rounds = Vector::new();
        for (index, (scores, finisher)) in games.iter().enumerate() {
            let mut padded = scores.clone();
            padded.resize(player_count, 0);
            let raw = to_map(&padded);
            let finisher = PlayerId::new(*finisher as u32);
            rounds.push_back(Round {
                index,
                scores: RoundLedger::apply_finisher_rule(&raw, finisher),
                raw_scores: raw,
                finisher_id: finisher,
            });
        }

        let ids: Vec<_> = (0..player_count as u32).map(PlayerId::new).collect();
        let totals = RoundLedger::compute_totals(&rounds, ids.iter().copied());
        for id in ids {
            let expected: i64 = rounds.iter().map(|r| i64::from(r.scores[&id])).sum();
            prop_assert_eq!(totals[&id], expected);
        }
    }

    #[test]
    fn proptest_status_tracks_threshold(
        rounds in prop::collection::vec((0i32..30, 0i32..30), 1..10),
        threshold in 1u32..120,
    ) {
        let mut session = GameSession::new();
        let a = session.add_player("A", "").unwrap();
        let b = session.add_player("B", "").unwrap();
        session.set_threshold(threshold).unwrap();
        session.start().unwrap();

        for (sa, sb) in rounds {
            if session.status() == SessionStatus::Finished {
                break;
            }
            session.add_round([(a, sa), (b, sb)].into_iter().collect(), a).unwrap();
            let max = session.total(a).max(session.total(b));
            prop_assert_eq!(session.status().is_finished(), max >= i64::from(threshold));
        }
    }
}
