//! Temporary binding names.

use oxc_ast::ast::{BindingIdentifier, IdentifierName, IdentifierReference, Program};
use oxc_ast_visit::Visit;
use rustc_hash::FxHashSet;

/// Every identifier spelled anywhere in a program.
#[derive(Default)]
struct NameCollector {
    names: FxHashSet<String>,
}

impl<'a> Visit<'a> for NameCollector {
    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        self.names.insert(it.name.to_string());
    }

    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.names.insert(it.name.to_string());
    }

    fn visit_identifier_name(&mut self, it: &IdentifierName<'a>) {
        self.names.insert(it.name.to_string());
    }
}

/// Hands out `_a`, `_b`, ... `_z`, `_a2`, ... skipping names the unit
/// already uses and names handed out before.
#[derive(Debug, Default)]
pub(crate) struct TempNames {
    used: FxHashSet<String>,
    next: usize,
}

impl TempNames {
    pub(crate) fn collect(program: &Program<'_>) -> Self {
        let mut collector = NameCollector::default();
        collector.visit_program(program);
        Self::with_used(collector.names)
    }

    pub(crate) fn with_used(used: FxHashSet<String>) -> Self {
        Self { used, next: 0 }
    }

    pub(crate) fn fresh(&mut self) -> String {
        loop {
            let name = temp_name(self.next);
            self.next += 1;
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }
}

fn temp_name(index: usize) -> String {
    let letter = char::from(b'a' + (index % 26) as u8);
    match index / 26 {
        0 => format!("_{letter}"),
        round => format!("_{letter}{}", round + 1),
    }
}
