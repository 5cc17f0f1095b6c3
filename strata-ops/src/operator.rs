use std::sync::Arc;
use strata_base::{fatal, require};
use strata_store::Table;

/// State every operator carries: up to two input operators and the single
/// result table.
pub struct OperatorBase {
    left_input: Option<Box<dyn Operator>>,
    right_input: Option<Box<dyn Operator>>,
    output: Option<Arc<Table>>,
    executed: bool,
}

impl OperatorBase {
    pub fn new(
        left_input: Option<Box<dyn Operator>>,
        right_input: Option<Box<dyn Operator>>,
    ) -> OperatorBase {
        OperatorBase {
            left_input,
            right_input,
            output: None,
            executed: false,
        }
    }

    /// The left input's output table; fatal when there is no left input or
    /// it has not been executed yet.
    pub fn left_input_table(&self) -> Arc<Table> {
        Self::input_table(&self.left_input, "left")
    }

    pub fn right_input_table(&self) -> Arc<Table> {
        Self::input_table(&self.right_input, "right")
    }

    fn input_table(input: &Option<Box<dyn Operator>>, side: &str) -> Arc<Table> {
        let input = input
            .as_deref()
            .unwrap_or_else(|| fatal!("operator has no {side} input"));
        input
            .get_output()
            .unwrap_or_else(|| fatal!("{side} input has not been executed"))
    }
}

/// Single-shot execution contract: `execute` runs the `on_execute` hook
/// exactly once and publishes its table; a second call is fatal.
pub trait Operator {
    fn base(&self) -> &OperatorBase;
    fn base_mut(&mut self) -> &mut OperatorBase;

    /// Hook producing the result table.
    fn on_execute(&mut self) -> Arc<Table>;

    fn execute(&mut self) {
        require!(
            !self.base().executed,
            "operators shall not be executed twice"
        );
        let output = self.on_execute();
        let base = self.base_mut();
        base.output = Some(output);
        base.executed = true;
    }

    /// `None` until `execute` has run.
    fn get_output(&self) -> Option<Arc<Table>> {
        self.base().output.clone()
    }
}
