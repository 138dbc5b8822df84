//! Semantic name recovery: rebuild readable identifiers from the lexical
//! structure of each function.
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::ast::{visit, Function, Program, RESERVED_NAMES};
use crate::error::PassError;
use crate::pipeline::Pass;

const FRIENDLY_LOCALS: [&str; 5] = ["x", "y", "m", "n", "z"];

/// Renames parameters to `a, b, c, p3, …`, user functions to
/// `func1, func2, …`, and locals (declared ones first, then orphans) through
/// a `t*` stage into friendly names. Call sites are rewritten globally as a
/// final step.
#[derive(Debug, Default)]
pub struct SemanticNameRecoverer {
    fn_counter: usize,
}

impl SemanticNameRecoverer {
    pub fn new() -> SemanticNameRecoverer {
        SemanticNameRecoverer::default()
    }

    fn recover_function(function: &mut Function) {
        // parameters first; the mapping is applied to the body last so the
        // local stage cannot capture them
        let param_old: Vec<String> = function.params.iter().map(|param| param.name.clone()).collect();
        let mut param_map: HashMap<String, String> = HashMap::new();
        let mut param_new: Vec<String> = vec![];

        for (index, param) in function.params.iter_mut().enumerate() {
            let fresh = match index {
                0 => "a".to_owned(),
                1 => "b".to_owned(),
                2 => "c".to_owned(),
                _ => format!("p{index}"),
            };
            param_map.insert(param.name.clone(), fresh.clone());
            param_new.push(fresh.clone());
            param.name = fresh;
        }

        let declared = visit::declared_names(&function.body);
        let declared_set: HashSet<&str> = declared
            .iter()
            .map(String::as_str)
            .chain(param_new.iter().map(String::as_str))
            .collect();

        // orphans: used but never declared, a leftover of aggressive
        // earlier passes
        let used = visit::used_names(&function.body);
        let orphans: Vec<&String> = used
            .iter()
            .filter(|name| {
                let name = name.as_str();
                !declared_set.contains(name) && !param_old.iter().any(|old| old == name)
            })
            .collect();

        let mut temp_map: HashMap<String, String> = HashMap::new();
        let mut t_order: Vec<String> = vec![];
        let mut counter = 0;

        for name in declared.iter().chain(orphans.into_iter()) {
            if RESERVED_NAMES.contains(name.as_str()) || temp_map.contains_key(name) {
                continue;
            }
            let fresh = if name.starts_with("unused") {
                format!("_unused_{counter}")
            } else {
                let fresh = format!("t{counter}");
                t_order.push(fresh.clone());
                fresh
            };
            temp_map.insert(name.clone(), fresh);
            counter += 1;
        }

        visit::rename_in_stmts(&mut function.body, &temp_map);

        // second stage: t* becomes x, y, m, n, z, then v0, v1, …
        let mut local_map: HashMap<String, String> = HashMap::new();
        let mut used_final: HashSet<String> = param_new.iter().cloned().collect();

        for (index, t_name) in t_order.iter().enumerate() {
            let mut chosen = None;
            if index < FRIENDLY_LOCALS.len() {
                let candidate = FRIENDLY_LOCALS[index];
                if !used_final.contains(candidate) {
                    chosen = Some(candidate.to_owned());
                }
            }
            let chosen = chosen.unwrap_or_else(|| {
                let mut k = 0;
                loop {
                    let candidate = format!("v{k}");
                    if !used_final.contains(&candidate) {
                        break candidate;
                    }
                    k += 1;
                }
            });
            used_final.insert(chosen.clone());
            local_map.insert(t_name.clone(), chosen);
        }

        visit::rename_in_stmts(&mut function.body, &local_map);
        visit::rename_in_stmts(&mut function.body, &param_map);
    }
}

impl Pass for SemanticNameRecoverer {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        let mut fn_map: HashMap<String, String> = HashMap::new();

        for function in &mut program.functions {
            if RESERVED_NAMES.contains(function.name.as_str()) {
                continue;
            }
            self.fn_counter += 1;
            let fresh = format!("func{}", self.fn_counter);
            debug!("renaming function '{}' to '{fresh}'", function.name);
            fn_map.insert(function.name.clone(), fresh.clone());
            function.name = fresh;
        }

        for function in &mut program.functions {
            Self::recover_function(function);
        }

        // all call sites across the program see the new callee names
        for function in &mut program.functions {
            visit::rename_calls_in_stmts(&mut function.body, &fn_map);
        }

        Ok(())
    }
}
