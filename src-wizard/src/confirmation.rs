//! Read-only review of the draft shown before submission

use std::fmt::Write as _;

use serde::Serialize;

use crate::draft::{NumericField, SimulationDraft};
use crate::options::SetField;

pub const CONFIRMATION_TITLE: &str = "Confirm Simulation Parameters";

/// One collapsible list of the review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub field: SetField,
    pub members: Vec<String>,
    pub expanded: bool,
}

impl Section {
    pub fn title(&self) -> String {
        format!("{} ({} selected)", self.field.label(), self.members.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    /// Numeric fields as (label, entered text)
    pub parameters: Vec<(&'static str, String)>,
    pub sections: Vec<Section>,
}

impl ConfirmationView {
    /// Snapshot of `draft`; every section starts collapsed
    pub fn new(draft: &SimulationDraft) -> Self {
        Self {
            parameters: NumericField::ALL
                .into_iter()
                .map(|f| (f.label(), draft.text(f).trim().to_string()))
                .collect(),
            sections: SetField::ALL
                .into_iter()
                .map(|field| Section {
                    field,
                    members: draft.members(field).to_vec(),
                    expanded: false,
                })
                .collect(),
        }
    }

    pub fn section(&self, field: SetField) -> Option<&Section> {
        self.sections.iter().find(|s| s.field == field)
    }

    pub fn is_expanded(&self, field: SetField) -> bool {
        self.section(field).is_some_and(|s| s.expanded)
    }

    /// Flip one section; the others are untouched. Returns the new state.
    pub fn toggle_section(&mut self, field: SetField) -> bool {
        match self.sections.iter_mut().find(|s| s.field == field) {
            Some(section) => {
                section.expanded = !section.expanded;
                section.expanded
            }
            None => false,
        }
    }

    pub fn expand_all(&mut self) {
        for section in &mut self.sections {
            section.expanded = true;
        }
    }

    /// Plain text rendering for terminals
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{CONFIRMATION_TITLE}");
        for (label, value) in &self.parameters {
            let _ = writeln!(out, "  {label}: {value}");
        }
        for section in &self.sections {
            let marker = if section.expanded { '-' } else { '+' };
            let _ = writeln!(out, "[{marker}] {}", section.title());
            if !section.expanded {
                continue;
            }
            if section.members.is_empty() {
                let _ = writeln!(out, "      {}", section.field.empty_summary());
            }
            for member in &section.members {
                let _ = writeln!(out, "      {}", section.field.display_member(member));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SimulationDraft {
        let mut draft = SimulationDraft::with_defaults();
        draft.toggle(SetField::Benchmarks, "Sphere Function");
        draft.toggle(SetField::Benchmarks, "Ackley Function");
        draft.toggle(SetField::CrossoverMethods, "onepoint");
        draft
    }

    #[test]
    fn test_sections_default_collapsed_and_independent() {
        let mut view = ConfirmationView::new(&draft());
        assert!(SetField::ALL.iter().all(|&f| !view.is_expanded(f)));

        assert!(view.toggle_section(SetField::Benchmarks));
        assert!(view.is_expanded(SetField::Benchmarks));
        assert!(!view.is_expanded(SetField::MutationSchemes));

        assert!(!view.toggle_section(SetField::Benchmarks));
        assert!(!view.is_expanded(SetField::Benchmarks));
    }

    #[test]
    fn test_render() {
        let mut view = ConfirmationView::new(&draft());
        let collapsed = view.render();
        assert!(collapsed.starts_with("Confirm Simulation Parameters\n"));
        assert!(collapsed.contains("  Number of Population (NP): 15\n"));
        assert!(collapsed.contains("[+] Benchmark Functions (2 selected)\n"));
        assert!(!collapsed.contains("Ackley Function"));

        view.expand_all();
        let expanded = view.render();
        assert!(expanded.contains("[-] Benchmark Functions (2 selected)\n      Sphere Function\n      Ackley Function\n"));
        assert!(expanded.contains("      One Point Crossover\n"));
        assert!(expanded.contains("      No mutation schemes selected\n"));
    }

    #[test]
    fn test_snapshot_not_live() {
        let mut d = draft();
        let view = ConfirmationView::new(&d);
        d.toggle(SetField::Benchmarks, "Quartic Function");
        assert_eq!(view.section(SetField::Benchmarks).unwrap().members.len(), 2);
    }
}
