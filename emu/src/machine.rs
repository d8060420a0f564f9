use arch::Asm;
use std::collections::HashMap;

use crate::{
    error::Error,
    hooks::Hook,
    model::{State, RETURN_SENTINEL},
};

/// Label-resolved program ready to run from its first line.
pub struct Machine<'a> {
    code: &'a [Asm],
    labels: HashMap<String, usize>,
}

impl<'a> Machine<'a> {
    pub fn new(code: &'a [Asm]) -> Result<Self, Error> {
        let mut labels = HashMap::new();
        for (idx, line) in code.iter().enumerate() {
            if let Asm::Label(name) = line {
                if labels.insert(name.clone(), idx).is_some() {
                    return Err(Error::RedefinedLabel(name.clone()));
                }
            }
        }

        // Every jump must land somewhere
        for line in code {
            if let Asm::Inst(inst) = line {
                if let Some(target) = inst.target() {
                    if !labels.contains_key(target) {
                        return Err(Error::UndefinedLabel(target.to_string()));
                    }
                }
            }
        }

        Ok(Self { code, labels })
    }

    /// Call into the code as if from `call` and run until it returns.
    pub fn run(&self, hooks: &mut [Box<dyn Hook>], tmax: Option<u64>) -> Result<State, Error> {
        let mut state = State::new();
        state.push(RETURN_SENTINEL)?;
        state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

        let limit = tmax.unwrap_or(u64::MAX);
        for time in 0..limit {
            let pc = state.pc;
            let line = self.code.get(pc).ok_or(Error::PcOutOfRange(pc))?;
            state.exec(line, &self.labels)?;
            state = hooks
                .iter_mut()
                .fold(state, |state, hook| hook.exec(time, pc, line, state));
            if state.is_terminated() {
                return Ok(state);
            }
        }
        Err(Error::StepLimit(limit))
    }
}
