//! Wizard progress model
//!
//! The wizard walks through three gated steps: initialize the pool, approve
//! the pool to spend both tokens, and mint liquidity. `WizardState` is a
//! local cache of that progress; the contract remains authoritative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the three wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    /// Set token0/token1/feeTo on the pool
    #[default]
    Initialize = 1,
    /// Approve the pool as spender on both tokens
    Approve = 2,
    /// Mint LP tokens
    Mint = 3,
}

impl WizardStep {
    /// All steps in order
    pub const ALL: [WizardStep; 3] = [Self::Initialize, Self::Approve, Self::Mint];

    /// Step number (1-3)
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Convert from a step number
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Initialize),
            2 => Some(Self::Approve),
            3 => Some(Self::Mint),
            _ => None,
        }
    }

    /// Parse a persisted step; anything unrecognized falls back to step 1
    pub fn parse_lenient(s: &str) -> Self {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .unwrap_or_default()
    }

    /// The step after this one, if any
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Title shown in the stepper
    pub fn title(self) -> &'static str {
        match self {
            Self::Initialize => "Initialize Uniswap V2 Pool",
            Self::Approve => "Approve Tokens for Uniswap V2",
            Self::Mint => "Add Liquidity (Mint)",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Completion flag per step
///
/// Serialized as a JSON object keyed by step number, e.g.
/// `{"1":true,"2":false,"3":false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepsCompleted {
    flags: [bool; 3],
}

impl StepsCompleted {
    /// Whether a step is complete
    pub fn is_complete(&self, step: WizardStep) -> bool {
        self.flags[step.number() as usize - 1]
    }

    /// Mark a step complete; returns true if it changed
    pub fn mark(&mut self, step: WizardStep) -> bool {
        let slot = &mut self.flags[step.number() as usize - 1];
        let changed = !*slot;
        *slot = true;
        changed
    }

    /// Highest completed step, if any
    pub fn highest(&self) -> Option<WizardStep> {
        WizardStep::ALL
            .iter()
            .rev()
            .copied()
            .find(|s| self.is_complete(*s))
    }
}

impl Serialize for StepsCompleted {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<String, bool> = WizardStep::ALL
            .iter()
            .map(|s| (s.number().to_string(), self.is_complete(*s)))
            .collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StepsCompleted {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut steps = StepsCompleted::default();
        for (key, done) in map {
            let step = key.trim().parse::<u8>().ok().and_then(WizardStep::from_number);
            if let (Some(step), true) = (step, done) {
                steps.mark(step);
            }
        }
        Ok(steps)
    }
}

/// Token pair the pool was (or is about to be) initialized with
///
/// Addresses are kept as typed by the user or as read from the contract;
/// an empty string means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeployedTokens {
    #[serde(default)]
    pub token0: String,
    #[serde(default)]
    pub token1: String,
}

impl DeployedTokens {
    /// Create a token pair
    pub fn new(token0: impl Into<String>, token1: impl Into<String>) -> Self {
        Self {
            token0: token0.into(),
            token1: token1.into(),
        }
    }

    /// Both addresses are non-empty
    pub fn both_known(&self) -> bool {
        !self.token0.trim().is_empty() && !self.token1.trim().is_empty()
    }
}

/// Persisted wizard progress
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    /// Step currently shown
    pub current_step: WizardStep,
    /// Completion flags
    pub steps_completed: StepsCompleted,
    /// Whether the pool reported a non-zero token pair
    pub pool_initialized: bool,
    /// Token pair
    pub deployed_tokens: DeployedTokens,
}

impl WizardState {
    /// Whether the terminal "done" banner should show
    pub fn is_done(&self) -> bool {
        self.steps_completed.is_complete(WizardStep::Mint)
    }

    /// Record an explicitly completed step and move forward one step
    ///
    /// Returns true if anything changed.
    pub fn complete_step(&mut self, step: WizardStep) -> bool {
        let mut changed = self.steps_completed.mark(step);
        if self.current_step == step {
            if let Some(next) = step.next() {
                self.current_step = next;
                changed = true;
            }
        }
        changed
    }

    /// Record a step observed complete on chain
    ///
    /// Raises the current step to at least `step`, never beyond it.
    pub fn observe_step(&mut self, step: WizardStep) -> bool {
        let mut changed = self.steps_completed.mark(step);
        if self.current_step < step {
            self.current_step = step;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::Initialize.number(), 1);
        assert_eq!(WizardStep::Mint.number(), 3);
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(4), None);
        assert_eq!(WizardStep::Mint.next(), None);
    }

    #[test]
    fn test_parse_lenient_falls_back_to_first_step() {
        assert_eq!(WizardStep::parse_lenient("2"), WizardStep::Approve);
        assert_eq!(WizardStep::parse_lenient("0"), WizardStep::Initialize);
        assert_eq!(WizardStep::parse_lenient("7"), WizardStep::Initialize);
        assert_eq!(WizardStep::parse_lenient("abc"), WizardStep::Initialize);
    }

    #[test]
    fn test_steps_completed_json_shape() {
        let mut steps = StepsCompleted::default();
        steps.mark(WizardStep::Initialize);
        let json = serde_json::to_string(&steps).unwrap();
        assert_eq!(json, r#"{"1":true,"2":false,"3":false}"#);
    }

    #[test]
    fn test_steps_completed_tolerates_extra_keys() {
        let steps: StepsCompleted =
            serde_json::from_str(r#"{"1":true,"2":true,"3":false,"4":true}"#).unwrap();
        assert!(steps.is_complete(WizardStep::Approve));
        assert!(!steps.is_complete(WizardStep::Mint));
        assert_eq!(steps.highest(), Some(WizardStep::Approve));
    }

    #[test]
    fn test_complete_step_advances_one() {
        let mut state = WizardState::default();
        assert!(state.complete_step(WizardStep::Initialize));
        assert_eq!(state.current_step, WizardStep::Approve);

        state.complete_step(WizardStep::Approve);
        state.complete_step(WizardStep::Mint);
        assert_eq!(state.current_step, WizardStep::Mint);
        assert!(state.is_done());
    }

    #[test]
    fn test_complete_step_from_earlier_view_does_not_jump() {
        let mut state = WizardState {
            current_step: WizardStep::Initialize,
            ..Default::default()
        };
        state.complete_step(WizardStep::Approve);
        assert_eq!(state.current_step, WizardStep::Initialize);
    }

    #[test]
    fn test_observe_step_raises_but_never_lowers() {
        let mut state = WizardState::default();
        state.observe_step(WizardStep::Approve);
        assert_eq!(state.current_step, WizardStep::Approve);

        state.current_step = WizardStep::Mint;
        assert!(!state.observe_step(WizardStep::Approve));
        assert_eq!(state.current_step, WizardStep::Mint);
    }

    #[test]
    fn test_deployed_tokens_both_known() {
        assert!(!DeployedTokens::default().both_known());
        assert!(!DeployedTokens::new("0xA", "").both_known());
        assert!(DeployedTokens::new("0xA", "0xB").both_known());
    }
}
