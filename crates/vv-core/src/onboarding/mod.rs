//! Onboarding domain models
//!
//! The onboarding checklist is four independent flags. They are set one at a
//! time as the user moves through the first-run screens and only cleared
//! together by a full reset.

use serde::{Deserialize, Serialize};

/// Onboarding checklist state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub has_seen_welcome: bool,
    pub has_completed_permissions: bool,
    pub has_logged_in: bool,
    pub has_completed_onboarding_survey: bool,
}

/// The screen the checklist points at next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Permissions,
    Login,
    Survey,
    Home,
}

impl OnboardingState {
    /// First pending item in checklist order, or `Home` when all are done.
    pub fn next_step(&self) -> OnboardingStep {
        if !self.has_seen_welcome {
            OnboardingStep::Welcome
        } else if !self.has_completed_permissions {
            OnboardingStep::Permissions
        } else if !self.has_logged_in {
            OnboardingStep::Login
        } else if !self.has_completed_onboarding_survey {
            OnboardingStep::Survey
        } else {
            OnboardingStep::Home
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_step() == OnboardingStep::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_starts_at_welcome() {
        assert_eq!(OnboardingState::default().next_step(), OnboardingStep::Welcome);
    }

    #[test]
    fn earlier_gaps_win_over_later_flags() {
        let state = OnboardingState {
            has_seen_welcome: true,
            has_completed_permissions: false,
            has_logged_in: true,
            has_completed_onboarding_survey: true,
        };
        assert_eq!(state.next_step(), OnboardingStep::Permissions);
    }

    #[test]
    fn all_flags_reach_home() {
        let state = OnboardingState {
            has_seen_welcome: true,
            has_completed_permissions: true,
            has_logged_in: true,
            has_completed_onboarding_survey: true,
        };
        assert!(state.is_complete());
    }
}
