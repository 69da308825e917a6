use std::collections::HashSet;

use ring_core::{AgentId, SimRng};

use crate::agent::Agent;
use crate::effect::Effect;
use crate::message::{Message, Payload};
use crate::phase::Phase;

fn aid(n: u32) -> AgentId {
    AgentId(n)
}

mod start_protocol {
    use super::*;

    #[test]
    fn idle_agent_starts_and_sends_collect() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        let effects = a.start_protocol();
        assert_eq!(a.phase, Phase::Collect);
        assert_eq!(a.highest, 0);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Send { dest, payload, .. } => {
                assert_eq!(*dest, aid(1));
                match payload {
                    Payload::Collect { id_set } => assert_eq!(*id_set, HashSet::from([aid(0)])),
                    other => panic!("expected Collect, got {other:?}"),
                }
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[test]
    fn already_started_agent_is_a_no_op() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        a.start_protocol();
        let effects = a.start_protocol();
        assert!(effects.is_empty());
    }
}

mod collect {
    use super::*;

    #[test]
    fn higher_originator_is_forwarded_with_own_id_appended() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(3),
            Payload::Collect {
                id_set: HashSet::from([aid(3)]),
            },
        );
        let effects = a.handle_message(msg, 4, &mut rng);
        assert_eq!(a.highest, 3);
        match &effects[0] {
            Effect::Send { dest, payload, .. } => {
                assert_eq!(*dest, aid(2));
                match payload {
                    Payload::Collect { id_set } => {
                        assert_eq!(*id_set, HashSet::from([aid(3), aid(1)]))
                    }
                    other => panic!("expected Collect, got {other:?}"),
                }
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[test]
    fn lower_originator_is_ignored() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        a.highest = 5;
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(3),
            Payload::Collect {
                id_set: HashSet::from([aid(3)]),
            },
        );
        let effects = a.handle_message(msg, 4, &mut rng);
        assert!(effects.is_empty());
        assert_eq!(a.highest, 5);
    }

    #[test]
    fn full_lap_back_to_originator_enters_setup() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        a.start_protocol();
        let full_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(0),
            Payload::Collect {
                id_set: full_set.clone(),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(a.phase, Phase::Setup);
        assert_eq!(a.id_set, full_set);
        match &effects[0] {
            Effect::Send {
                payload: Payload::Setup { id_set },
                ..
            } => assert_eq!(*id_set, full_set),
            other => panic!("expected Setup send, got {other:?}"),
        }
    }
}

mod setup_and_commit {
    use super::*;

    #[test]
    fn relay_agent_commits_and_forwards() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        a.highest = 0;
        let mut rng = SimRng::new(42);
        let msg = Message::new(
            aid(0),
            Payload::Setup {
                id_set: HashSet::from([aid(0), aid(1), aid(2)]),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(a.phase, Phase::Setup);
        assert!(a.n_rand_commit.is_some());
        assert_eq!(a.n_rand_commit, a.n_rand_reveal);
        assert_eq!(effects.len(), 2);
        assert!(matches!(
            effects[0],
            Effect::Send {
                payload: Payload::Commit { .. },
                ..
            }
        ));
        assert!(matches!(
            effects[1],
            Effect::Send {
                payload: Payload::Setup { .. },
                ..
            }
        ));
    }

    #[test]
    fn malicious_relay_commits_and_reveals_a_different_value() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), true);
        a.highest = 0;
        let mut rng = SimRng::new(7);
        let msg = Message::new(
            aid(0),
            Payload::Setup {
                id_set: HashSet::from([aid(0), aid(1), aid(2)]),
            },
        );
        a.handle_message(msg, 3, &mut rng);
        assert_ne!(a.n_rand_commit, a.n_rand_reveal);
    }

    #[test]
    fn originator_setup_return_enters_reveal_without_committing_if_honest() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        a.start_protocol();
        a.phase = Phase::Setup; // as on_collect would have set on full lap
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(0),
            Payload::Setup {
                id_set: a.id_set.clone(),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(a.phase, Phase::Reveal);
        // Honest originator's own phase was already >= Setup, so it never
        // drew a commitment here — the REVEAL-append fallback covers it.
        assert!(a.n_rand_commit.is_none());
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::Send {
                payload: Payload::Reveal { .. },
                ..
            }
        ));
    }

    #[test]
    fn commit_only_accepted_from_predecessor() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        let mut rng = SimRng::new(1);
        let wrong_sender = Message::new(aid(5), Payload::Commit { n_rand: 3 });
        let effects = a.handle_message(wrong_sender, 3, &mut rng);
        assert!(effects.is_empty());
        assert!(a.commit_from_predecessor.is_none());

        let right_sender = Message::new(aid(0), Payload::Commit { n_rand: 3 });
        let effects = a.handle_message(right_sender, 3, &mut rng);
        assert_eq!(a.commit_from_predecessor, Some(3));
        assert_eq!(a.commit_records.get(&aid(0)), Some(&3));
        assert_eq!(effects.len(), 1);
    }
}

mod reveal_and_finalize {
    use super::*;

    #[test]
    fn mismatched_commitment_triggers_abort() {
        let mut a = Agent::new(aid(2), aid(0), aid(1), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        a.commit_records.insert(aid(1), 9);
        let mut rng = SimRng::new(3);
        let msg = Message::new(
            aid(0),
            Payload::Reveal {
                id_set: a.id_set.clone(),
                pairs: vec![(aid(1), 4)],
                last_author: None,
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::Abort {
                expected: 9,
                revealed: 4
            }
        ));
    }

    #[test]
    fn predecessor_reveal_must_match_its_direct_commitment() {
        let mut a = Agent::new(aid(2), aid(0), aid(1), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        a.commit_from_predecessor = Some(5);
        let mut rng = SimRng::new(3);
        let msg = Message::new(
            aid(0),
            Payload::Reveal {
                id_set: a.id_set.clone(),
                pairs: vec![(aid(1), 6)],
                last_author: Some(aid(1)),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert!(matches!(effects[0], Effect::Abort { .. }));
    }

    #[test]
    fn agent_appends_its_own_pair_exactly_once() {
        let mut a = Agent::new(aid(2), aid(0), aid(1), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        a.n_rand_reveal = Some(7);
        let mut rng = SimRng::new(3);
        let msg = Message::new(
            aid(0),
            Payload::Reveal {
                id_set: a.id_set.clone(),
                pairs: vec![(aid(1), 4)],
                last_author: Some(aid(1)),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        match &effects[0] {
            Effect::Send {
                payload: Payload::Reveal { pairs, .. },
                ..
            } => {
                assert_eq!(pairs.len(), 2);
                assert!(pairs.contains(&(aid(2), 7)));
            }
            other => panic!("expected Reveal forward, got {other:?}"),
        }
    }

    #[test]
    fn lazily_generates_commitment_if_none_was_ever_chosen() {
        let mut a = Agent::new(aid(2), aid(0), aid(1), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(3);
        let msg = Message::new(
            aid(0),
            Payload::Reveal {
                id_set: a.id_set.clone(),
                pairs: vec![(aid(1), 4)],
                last_author: Some(aid(1)),
            },
        );
        a.handle_message(msg, 3, &mut rng);
        assert!(a.n_rand_commit.is_some());
        assert_eq!(a.n_rand_commit, a.n_rand_reveal);
    }

    #[test]
    fn originator_finalizes_and_broadcasts_choose_when_pairs_complete() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        a.n_rand_reveal = Some(1);
        let mut rng = SimRng::new(3);
        let msg = Message::new(
            aid(0),
            Payload::Reveal {
                id_set: a.id_set.clone(),
                pairs: vec![(aid(1), 2), (aid(2), 3)],
                last_author: Some(aid(2)),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(effects.len(), 2);
        let total = 1 + 2 + 3u64;
        let idx = (total % 3) as usize;
        let mut sorted: Vec<AgentId> = a.id_set.iter().copied().collect();
        sorted.sort_unstable_by(|x, y| y.cmp(x));
        let expected_leader = sorted[idx];
        assert_eq!(a.leader, Some(expected_leader));
        match &effects[1] {
            Effect::Send {
                payload: Payload::Choose { leader, .. },
                ..
            } => assert_eq!(*leader, expected_leader),
            other => panic!("expected Choose send, got {other:?}"),
        }
    }
}

mod choose {
    use super::*;

    #[test]
    fn relay_agent_reports_and_forwards() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(0),
            Payload::Choose {
                id_set: a.id_set.clone(),
                pairs: vec![],
                leader: aid(2),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(a.leader, Some(aid(2)));
        assert_eq!(a.phase, Phase::Finalized);
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::ReportLeader(id) if id == aid(1)));
        assert!(matches!(
            effects[1],
            Effect::Send {
                payload: Payload::Choose { .. },
                ..
            }
        ));
    }

    #[test]
    fn originator_completing_its_own_lap_reports_without_forwarding() {
        let mut a = Agent::new(aid(0), aid(1), aid(2), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(0),
            Payload::Choose {
                id_set: a.id_set.clone(),
                pairs: vec![],
                leader: aid(2),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::ReportLeader(id) if id == aid(0)));
    }

    #[test]
    fn mismatched_id_set_is_dropped() {
        let mut a = Agent::new(aid(1), aid(2), aid(0), false);
        a.id_set = HashSet::from([aid(0), aid(1), aid(2)]);
        let mut rng = SimRng::new(1);
        let msg = Message::new(
            aid(0),
            Payload::Choose {
                id_set: HashSet::from([aid(0), aid(1)]),
                pairs: vec![],
                leader: aid(1),
            },
        );
        let effects = a.handle_message(msg, 3, &mut rng);
        assert!(effects.is_empty());
        assert_eq!(a.phase, Phase::Idle);
    }
}
