//! Identifier obfuscation: every user-chosen name becomes an opaque
//! generated one.
use std::collections::HashMap;

use log::debug;

use crate::ast::{visit, Function, Program, RESERVED_NAMES};
use crate::error::PassError;
use crate::pipeline::Pass;

/// Replaces locals and parameters with `_v0, _v1, …` and user-defined
/// function names with `_f0, _f1, …`. Reserved names stay untouched and a
/// single mapping per function keeps every occurrence consistent.
#[derive(Debug, Default)]
pub struct NameObfuscator {
    var_counter: usize,
    fn_counter: usize,
}

impl NameObfuscator {
    pub fn new() -> NameObfuscator {
        NameObfuscator::default()
    }

    fn fresh_var(&mut self) -> String {
        let name = format!("_v{}", self.var_counter);
        self.var_counter += 1;
        name
    }

    fn fresh_fn(&mut self) -> String {
        let name = format!("_f{}", self.fn_counter);
        self.fn_counter += 1;
        name
    }

    fn obfuscate_function(&mut self, function: &mut Function) {
        let mut map: HashMap<String, String> = HashMap::new();

        for param in &function.params {
            if !RESERVED_NAMES.contains(param.name.as_str()) {
                let fresh = self.fresh_var();
                map.insert(param.name.clone(), fresh);
            }
        }

        // declared locals first, then any name only ever used (orphans)
        let declared = visit::declared_names(&function.body);
        let used = visit::used_names(&function.body);
        for name in declared.iter().chain(used.iter()) {
            if RESERVED_NAMES.contains(name.as_str()) || map.contains_key(name) {
                continue;
            }
            let fresh = self.fresh_var();
            map.insert(name.clone(), fresh);
        }

        debug!(
            "renaming {} identifiers in function '{}'",
            map.len(),
            function.name
        );

        for param in &mut function.params {
            if let Some(fresh) = map.get(&param.name) {
                param.name = fresh.clone();
            }
        }
        visit::rename_in_stmts(&mut function.body, &map);
    }
}

impl Pass for NameObfuscator {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        let mut fn_map: HashMap<String, String> = HashMap::new();

        for function in &mut program.functions {
            if RESERVED_NAMES.contains(function.name.as_str()) {
                continue;
            }
            let fresh = self.fresh_fn();
            fn_map.insert(function.name.clone(), fresh.clone());
            function.name = fresh;
        }

        for function in &mut program.functions {
            self.obfuscate_function(function);
            visit::rename_calls_in_stmts(&mut function.body, &fn_map);
        }

        Ok(())
    }
}
