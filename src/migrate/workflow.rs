/// Clubhouse "Unstarted"; also where unrecognised Jira statuses land.
pub const DEFAULT_WORKFLOW_STATE: i64 = 500000003;

const WORKFLOW_STATES: &[(&str, i64)] = &[
    ("Open", 500000003),
    ("Done", 500000002),
    ("In Development", 500000004),
    ("Waiting for Code Review", 500000005),
    ("In Code Review", 500000018),
    ("Waiting for UX-Interaction Design Review", 500000005),
    ("In UX-Interaction Design Review", 500000018),
    ("Waiting for UX-Design Review", 500000005),
    ("In UX-Design Review", 500000018),
    ("Waiting for QA", 500000017),
    ("In QA", 500000019),
    ("In QA Review", 500000019),
];

/// Clubhouse workflow state for a Jira status name.
pub fn workflow_state_id(status: &str) -> i64 {
    WORKFLOW_STATES
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, id)| *id)
        .unwrap_or(DEFAULT_WORKFLOW_STATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_status_maps_to_its_state() {
        let expected = [
            ("Open", 500000003),
            ("Done", 500000002),
            ("In Development", 500000004),
            ("Waiting for Code Review", 500000005),
            ("In Code Review", 500000018),
            ("Waiting for UX-Interaction Design Review", 500000005),
            ("In UX-Interaction Design Review", 500000018),
            ("Waiting for UX-Design Review", 500000005),
            ("In UX-Design Review", 500000018),
            ("Waiting for QA", 500000017),
            ("In QA", 500000019),
            ("In QA Review", 500000019),
        ];
        for (status, state) in expected {
            assert_eq!(workflow_state_id(status), state, "status {status:?}");
        }
    }

    #[test]
    fn unknown_status_is_unstarted() {
        assert_eq!(workflow_state_id("Blocked"), DEFAULT_WORKFLOW_STATE);
        assert_eq!(workflow_state_id(""), DEFAULT_WORKFLOW_STATE);
        assert_eq!(workflow_state_id("done"), DEFAULT_WORKFLOW_STATE);
    }
}
