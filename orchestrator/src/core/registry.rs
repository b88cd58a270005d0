//! Fixed step registries for the two pipeline variants.

use std::fmt;

use clap::ValueEnum;

/// One named stage of the content-generation pipeline.
///
/// Declaration order is the global pipeline order; any subset selected for
/// execution preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Step {
    Constitution,
    Specify,
    Plan,
    Tasks,
    Implement,
}

impl Step {
    /// Wrapper/file-name form of the step.
    pub fn name(self) -> &'static str {
        match self {
            Step::Constitution => "constitution",
            Step::Specify => "specify",
            Step::Plan => "plan",
            Step::Tasks => "tasks",
            Step::Implement => "implement",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which step registry is active. Chosen once per invocation, never per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Pipeline {
    /// All five stages.
    Full,
    /// Plan onward; assumes constitution and specify already ran.
    Blitz,
}

const FULL_STEPS: &[Step] = &[
    Step::Constitution,
    Step::Specify,
    Step::Plan,
    Step::Tasks,
    Step::Implement,
];

const BLITZ_STEPS: &[Step] = &[Step::Plan, Step::Tasks, Step::Implement];

impl Pipeline {
    /// The fixed ordered step list for this pipeline.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Pipeline::Full => FULL_STEPS,
            Pipeline::Blitz => BLITZ_STEPS,
        }
    }

    /// Membership predicate over the active registry.
    pub fn contains(self, step: Step) -> bool {
        self.steps().contains(&step)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Full => f.write_str("full"),
            Pipeline::Blitz => f.write_str("blitz"),
        }
    }
}
