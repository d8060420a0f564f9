use arch::{Asm, Reg};
use color_print::cprintln;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, model::State};

use super::Hook;

#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    config: Config,
}

/// Dump configuration file:
///
/// ```yaml
/// labels: [L_ELSE_0, L_END_0]
/// stack: true
/// regs: [ebx, ecx]
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub labels: Vec<String>,
    pub stack: bool,
    pub regs: Vec<Reg>,
}

const ALL_REGS: [Reg; 6] = [Reg::EAX, Reg::EBX, Reg::ECX, Reg::EDX, Reg::ESP, Reg::EBP];

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        match file {
            Some(fname) => {
                let file = File::open(&fname).map_err(|e| Error::FileOpen(fname.clone(), e))?;
                let config: Config = serde_yaml::from_reader(BufReader::new(file))
                    .map_err(|e| Error::Config(fname.clone(), e))?;
                Ok(Self::with_config(Some(fname), all, config))
            }
            None => Ok(Self::with_config(None, all, Config::default())),
        }
    }

    pub fn with_config(file: Option<String>, all: bool, config: Config) -> Self {
        Self { file, all, config }
    }

    fn regs(&self) -> &[Reg] {
        if self.config.regs.is_empty() {
            &ALL_REGS
        } else {
            &self.config.regs
        }
    }

    fn watched(&self, line: &Asm) -> bool {
        match line {
            Asm::Label(name) => self.config.labels.iter().any(|l| l == name),
            Asm::Inst(_) => false,
        }
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.config.labels.len(), fname);
        }
        state
    }

    fn exec(&mut self, time: u64, pc: usize, line: &Asm, state: State) -> State {
        if self.all || self.watched(line) {
            cprintln!("<s>{:>6}</> <b>{:>4}</> {}", time, pc, line.cformat());
            self.print_reg(&state);
            if self.config.stack {
                self.print_stack(&state);
            }
        }
        state
    }
}

impl Dump {
    fn print_reg(&self, state: &State) {
        println!(" +---------------------------------------------+");
        for reg in self.regs() {
            let value = state.get(*reg);
            println!(" | {:>3}: {:0>8X} {:>12}                     |", reg, value, value);
        }
        println!(" +---------------------------------------------+");
    }

    fn print_stack(&self, state: &State) {
        for (addr, value) in state.stack() {
            println!(" | {:0>8X} : {:0>8X} {:>12}              |", addr, value, value);
        }
        println!(" +---------------------------------------------+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_yaml() {
        let config: Config =
            serde_yaml::from_str("labels: [L_END_0]\nstack: true\nregs: [ebx, esp]\n").unwrap();
        assert_eq!(config.labels, vec!["L_END_0".to_string()]);
        assert!(config.stack);
        assert_eq!(config.regs, vec![Reg::EBX, Reg::ESP]);
    }

    #[test]
    fn missing_fields_default() {
        let config: Config = serde_yaml::from_str("labels: []").unwrap();
        assert!(!config.stack);
        assert!(config.regs.is_empty());
    }

    #[test]
    fn watches_only_listed_labels() {
        let config = Config {
            labels: vec!["L_END_0".into()],
            ..Config::default()
        };
        let dump = Dump::with_config(None, false, config);
        assert!(dump.watched(&Asm::Label("L_END_0".into())));
        assert!(!dump.watched(&Asm::Label("L_ELSE_0".into())));
        assert!(!dump.watched(&Asm::Inst(arch::Inst::RET())));
    }
}
