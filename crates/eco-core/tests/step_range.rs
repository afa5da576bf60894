//! Property tests: no sequence of navigation operations breaks step bounds.

use proptest::prelude::*;

use eco_catalog::FormCatalog;
use eco_core::{EntryContext, Step, WizardSession};
use eco_model::NewInspector;
use eco_persistence::{AppState, MemoryStore};

#[derive(Debug, Clone)]
enum Op {
    Next,
    Back,
    Jump(u8),
    SelectFirstInspector,
    ClearSelection,
    ChooseForm(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        2 => Just(Op::Back),
        2 => (1u8..=5).prop_map(Op::Jump),
        1 => Just(Op::SelectFirstInspector),
        1 => Just(Op::ClearSelection),
        1 => (0usize..7).prop_map(Op::ChooseForm),
    ]
}

fn run(preselected: Option<&str>, ops: &[Op]) -> Vec<Step> {
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let inspector = app
        .add_inspector(NewInspector::new("Budi", "12345"))
        .unwrap();
    let entry = EntryContext {
        preselected_form: preselected.map(str::to_string),
    };
    let mut session = WizardSession::new(&catalog, entry).unwrap();

    let mut visited = vec![session.step()];
    for op in ops {
        // Rejected operations are expected; only the resulting state matters.
        let _ = match op {
            Op::Next => session.next().map(drop),
            Op::Back => session.back().map(drop),
            Op::Jump(n) => session.jump_to(Step::from_number(*n).unwrap()).map(drop),
            Op::SelectFirstInspector => session.select_inspector(app.inspectors(), &inspector.id),
            Op::ClearSelection => session.clear_inspector_selection(),
            Op::ChooseForm(i) => {
                let id = catalog.forms()[*i].id.clone();
                session.choose_form(&catalog, &id)
            }
        };
        visited.push(session.step());
    }
    visited
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn step_stays_in_range(ops in prop::collection::vec(op(), 0..40)) {
        for step in run(None, &ops) {
            prop_assert!((1..=5).contains(&step.number()));
        }
    }

    #[test]
    fn preselected_form_never_visits_form_step(ops in prop::collection::vec(op(), 0..40)) {
        for step in run(Some("6B"), &ops) {
            prop_assert_ne!(step, Step::SelectForm);
        }
    }

    #[test]
    fn leaving_step_one_requires_a_selection(ops in prop::collection::vec(op(), 0..40)) {
        let visited = run(None, &ops);
        let selects = ops.iter().any(|op| matches!(op, Op::SelectFirstInspector));
        if !selects {
            prop_assert!(visited.iter().all(|step| *step == Step::SelectInspector));
        }
    }
}
