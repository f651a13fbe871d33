use eventhub::{DispatchContext, EventHub, HubArg, HubError, Listener};
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Presenter {
        f1_calls: AtomicUsize,
        f2_calls: AtomicUsize,
    }

    impl Presenter {
        fn f1(&self) {
            self.f1_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn f2(&self) {
            self.f2_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_attaching_to_an_object() {
        let hub = EventHub::attach(vec![HubArg::event("start"), HubArg::target(Presenter::default())])
            .unwrap();
        hub.on(
            "start",
            [Listener::new(|this: &EventHub<Presenter>, _| {
                this.target().ok_or("no target")?.f1();
                Ok(())
            })],
        )
        .unwrap();
        hub.on(
            "start",
            [Listener::new(|this: &EventHub<Presenter>, _| {
                this.target().ok_or("no target")?.f2();
                Ok(())
            })],
        )
        .unwrap();

        hub.trigger("start", &[]).unwrap();

        let presenter = hub.target().unwrap();
        assert_eq!(presenter.f1_calls.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.f2_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_target_passed_to_fresh_hub() {
        let hub = EventHub::with_target(["start"], Presenter::default()).unwrap();
        hub.on(
            "start",
            [Listener::new(|this: &EventHub<Presenter>, _| {
                match this.context() {
                    DispatchContext::Target(presenter) => presenter.f1(),
                    DispatchContext::Hub => return Err("expected a target".into()),
                }
                Ok(())
            })],
        )
        .unwrap();

        hub.trigger("start", &[]).unwrap();
        assert_eq!(hub.target().unwrap().f1_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fresh_hub_is_its_own_context() {
        let hub = EventHub::with_events(["start"]).unwrap();
        let expected = hub.clone();
        let check = Listener::new(move |this: &EventHub<()>, _| {
            if !this.ptr_eq(&expected) || !this.context().is_hub() {
                return Err("listener did not receive the hub".into());
            }
            Ok(())
        });
        hub.on("start", [check]).unwrap();

        assert!(hub.trigger("start", &[]).is_ok());
    }

    #[test]
    fn test_attach_without_target_fails() {
        match EventHub::<Presenter>::attach(vec![HubArg::event("start")]) {
            Err(HubError::Identity(msg)) => assert!(msg.contains("no target object")),
            other => panic!("Expected HubError::Identity, got {:?}", other),
        }
    }
}
