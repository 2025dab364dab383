//! In-flight tracking for the panel's async actions
//!
//! Nothing here blocks a second invocation; front ends read
//! [`Activity::is_busy`] to disable the matching control.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadConfig,
    SaveConfig,
    TestConnection,
    DetectProxy,
    SpeedTest,
    ListProjects,
    IndexProject,
    DebugSearch,
    ViewLogs,
    ClearCache,
    SyncRefresh,
    ToggleAutoIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct Activity {
    states: HashMap<Action, ActionState>,
}

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, action: Action) -> ActionState {
        self.states.get(&action).copied().unwrap_or_default()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.state(action) == ActionState::InFlight
    }

    pub fn start(&mut self, action: Action) {
        tracing::debug!(?action, "action started");
        self.states.insert(action, ActionState::InFlight);
    }

    pub fn finish(&mut self, action: Action, ok: bool) {
        let state = if ok { ActionState::Succeeded } else { ActionState::Failed };
        self.states.insert(action, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut activity = Activity::new();
        assert_eq!(activity.state(Action::SaveConfig), ActionState::Idle);

        activity.start(Action::SaveConfig);
        assert!(activity.is_busy(Action::SaveConfig));
        assert!(!activity.is_busy(Action::LoadConfig));

        activity.finish(Action::SaveConfig, false);
        assert_eq!(activity.state(Action::SaveConfig), ActionState::Failed);
        assert!(!activity.is_busy(Action::SaveConfig));
    }

    #[test]
    fn test_second_start_is_not_refused() {
        let mut activity = Activity::new();
        activity.start(Action::SpeedTest);
        activity.start(Action::SpeedTest);
        activity.finish(Action::SpeedTest, true);
        assert_eq!(activity.state(Action::SpeedTest), ActionState::Succeeded);
    }
}
