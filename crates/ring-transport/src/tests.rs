use ring_core::{AgentId, SimRng, Tick};
use ring_protocol::{Message, Payload};

use crate::async_transport::AsyncTransport;
use crate::sync_transport::SyncTransport;

fn aid(n: u32) -> AgentId {
    AgentId(n)
}

fn collect(from: u32) -> Message {
    Message::new(
        aid(from),
        Payload::Collect {
            id_set: Default::default(),
        },
    )
}

mod sync {
    use super::*;

    #[test]
    fn message_is_not_visible_until_next_round() {
        let mut t = SyncTransport::new(2);
        t.send(aid(1), collect(0));
        assert!(t.drain(aid(1)).is_empty());
        t.advance_round();
        assert_eq!(t.drain(aid(1)).len(), 1);
    }

    #[test]
    fn drain_empties_the_whole_inbox_at_once() {
        let mut t = SyncTransport::new(2);
        t.send(aid(1), collect(0));
        t.send(aid(1), collect(0));
        t.advance_round();
        assert_eq!(t.drain(aid(1)).len(), 2);
        assert!(t.drain(aid(1)).is_empty());
    }

    #[test]
    fn is_idle_reflects_both_generations() {
        let mut t = SyncTransport::new(1);
        assert!(t.is_idle());
        t.send(aid(0), collect(0));
        assert!(!t.is_idle());
        t.advance_round();
        assert!(!t.is_idle());
        t.drain(aid(0));
        t.advance_round();
        assert!(t.is_idle());
    }
}

mod r#async {
    use super::*;

    #[test]
    fn message_is_due_only_at_or_after_its_scheduled_tick() {
        let mut t = AsyncTransport::new(3).unwrap();
        let mut rng = SimRng::new(11);
        t.send(Tick(0), aid(0), aid(1), collect(0), &mut rng);
        let due_at = t.next_due().unwrap();
        assert!(due_at.0 >= 1 && due_at.0 <= 3);
        for tick in 0..due_at.0 {
            assert!(t.drain_due(Tick(tick)).is_empty());
        }
        assert_eq!(t.drain_due(due_at).len(), 1);
        assert!(t.is_idle());
    }

    #[test]
    fn rejects_zero_max_delay() {
        assert!(AsyncTransport::new(0).is_err());
    }

    #[test]
    fn drain_due_returns_every_message_scheduled_for_this_tick_at_once() {
        let mut t = AsyncTransport::new(1).unwrap();
        let mut rng = SimRng::new(3);
        for i in 0..4u32 {
            t.send(Tick(0), aid(0), aid(1), collect(i), &mut rng);
        }
        assert_eq!(t.drain_due(Tick(1)).len(), 4);
        assert!(t.is_idle());
    }

    #[test]
    fn delivery_order_is_deterministic_for_a_fixed_seed() {
        let run = || {
            let mut t = AsyncTransport::new(5).unwrap();
            let mut rng = SimRng::new(99);
            for i in 0..10u32 {
                t.send(Tick(0), aid(0), aid(1), collect(i), &mut rng);
            }
            t.drain_due(Tick(10))
                .into_iter()
                .map(|(_, msg)| msg.sender_id.0)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
