//! Sequential execution of named procedure steps
//!
//! Steps run strictly in order and the first failure stops the pipeline.
//! Steps that already ran stay applied: there is no compensation, so a
//! failure in step N leaves steps 1..N-1 committed in the store.

use serde_json::Value;

use crate::error::CronError;
use crate::storage::ProcedureStore;

/// One remote procedure call and the response field its result fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub field: &'static str,
    pub procedure: &'static str,
}

impl Step {
    pub const fn new(field: &'static str, procedure: &'static str) -> Self {
        Self { field, procedure }
    }
}

/// Result of a step that completed
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: Step,
    pub value: Value,
}

/// The step that failed, with everything applied before it
#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: CronError,
    pub applied: Vec<StepOutcome>,
}

impl StepFailure {
    pub fn is_partial(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Ordered list of steps executed against a single store connection
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    steps: &'static [Step],
}

impl Pipeline {
    pub const fn new(steps: &'static [Step]) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    /// Run every step in order, stopping at the first failure
    pub async fn run(
        &self,
        store: &dyn ProcedureStore,
    ) -> std::result::Result<Vec<StepOutcome>, StepFailure> {
        let mut applied = Vec::with_capacity(self.steps.len());

        for step in self.steps {
            match store.call_procedure(step.procedure).await {
                Ok(value) => applied.push(StepOutcome { step: *step, value }),
                Err(error) => {
                    return Err(StepFailure {
                        step: *step,
                        error,
                        applied,
                    })
                }
            }
        }

        Ok(applied)
    }
}
