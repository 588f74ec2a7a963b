use crate::orders::models::OrderStatus;

/// Order status transition rules.
///
/// Transitions not listed in the table are rejected, including repeating the
/// current status. Completed and cancelled are terminal.
pub struct StatusMachine;

impl StatusMachine {
    /// Targets reachable from a given status
    pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
        match from {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::Completed => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Check whether a transition between two statuses is allowed
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        Self::allowed_targets(from).contains(&to)
    }

    /// Validate a transition, returning the new status or a message naming
    /// both endpoints
    pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!(
                "Cannot transition order from '{}' to '{}'",
                from, to
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Confirmed
        ));
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Cancelled
        ));
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Ready
        ));
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Completed
        ));
    }

    #[test]
    fn test_confirmed_transitions() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Confirmed,
            OrderStatus::Ready
        ));
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Confirmed,
            OrderStatus::Cancelled
        ));
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Confirmed,
            OrderStatus::Completed
        ));
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Confirmed,
            OrderStatus::Pending
        ));
    }

    #[test]
    fn test_ready_transitions() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Ready,
            OrderStatus::Completed
        ));
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Ready,
            OrderStatus::Cancelled
        ));
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Ready,
            OrderStatus::Confirmed
        ));
    }

    #[test]
    fn test_terminal_statuses_admit_nothing() {
        for to in OrderStatus::ALL {
            assert!(!StatusMachine::is_valid_transition(OrderStatus::Completed, to));
            assert!(!StatusMachine::is_valid_transition(OrderStatus::Cancelled, to));
        }
    }

    #[test]
    fn test_same_status_is_rejected() {
        for status in OrderStatus::ALL {
            assert!(!StatusMachine::is_valid_transition(status, status));
        }
    }

    #[test]
    fn test_transition_error_names_both_endpoints() {
        let err = StatusMachine::transition(OrderStatus::Completed, OrderStatus::Pending)
            .unwrap_err();
        assert!(err.contains("completed"));
        assert!(err.contains("pending"));
    }

    #[test]
    fn test_transition_success_returns_target() {
        let next = StatusMachine::transition(OrderStatus::Pending, OrderStatus::Confirmed)
            .unwrap();
        assert_eq!(next, OrderStatus::Confirmed);
    }

    /// The full 5x5 grid: the convenience predicates and the transition table
    /// must never disagree.
    #[test]
    fn test_predicates_agree_with_table() {
        for from in OrderStatus::ALL {
            assert_eq!(
                from.is_markable_ready(),
                StatusMachine::is_valid_transition(from, OrderStatus::Ready)
            );
            assert_eq!(
                from.is_completable(),
                StatusMachine::is_valid_transition(from, OrderStatus::Completed)
            );
            // Customer cancellation is the pending/confirmed subset of valid
            // cancel transitions; the store can also cancel from ready.
            if from.is_cancellable() {
                assert!(StatusMachine::is_valid_transition(from, OrderStatus::Cancelled));
            }
            if from.is_terminal() {
                assert!(StatusMachine::allowed_targets(from).is_empty());
            }
        }
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            prop::sample::select(OrderStatus::ALL.to_vec())
        }

        /// Valid transitions never leave a terminal status and never repeat
        /// the current status.
        #[test]
        fn prop_transitions_leave_no_terminal_and_never_loop() {
            proptest!(|(from in any_status(), to in any_status())| {
                if StatusMachine::is_valid_transition(from, to) {
                    prop_assert!(!from.is_terminal());
                    prop_assert_ne!(from, to);
                }
            });
        }

        /// transition() succeeds exactly when the table allows it.
        #[test]
        fn prop_transition_matches_table() {
            proptest!(|(from in any_status(), to in any_status())| {
                let allowed = StatusMachine::is_valid_transition(from, to);
                prop_assert_eq!(StatusMachine::transition(from, to).is_ok(), allowed);
            });
        }
    }
}
