//! Tests for the stepper controller

use super::*;

fn completed(controller: &StepperController) -> Vec<usize> {
    controller.state().completed_steps.iter().copied().collect()
}

#[test]
fn test_new_controller_starts_at_first_step() {
    let controller = StepperController::default();
    assert_eq!(controller.current_step(), 0);
    assert_eq!(controller.completed_count(), 0);
    assert_eq!(controller.step_count(), 6);
    assert_eq!(controller.current().title, "Subir Documentos");
}

#[test]
fn test_complete_through_whole_workflow() {
    let mut controller = StepperController::default();
    for _ in 0..5 {
        assert!(controller.complete_current_step());
    }
    assert_eq!(controller.current_step(), 5);
    assert_eq!(completed(&controller), vec![0, 1, 2, 3, 4]);
    assert!(!controller.is_finished());

    assert!(controller.complete_current_step());
    assert_eq!(controller.current_step(), 5);
    assert_eq!(completed(&controller), vec![0, 1, 2, 3, 4, 5]);
    assert!(controller.is_finished());
    assert!(controller.can_reset());

    // Nothing left to change
    assert!(!controller.complete_current_step());
}

#[test]
fn test_select_pending_step_is_ignored() {
    let mut controller = StepperController::default();
    assert_eq!(controller.status_of(3), StepStatus::Pending);
    assert!(!controller.select_step(3));
    assert_eq!(controller.current_step(), 0);
}

#[test]
fn test_step_back_twice_then_noop() {
    let mut controller = StepperController::default();
    controller.complete_current_step();
    controller.complete_current_step();
    assert_eq!(controller.current_step(), 2);

    assert!(controller.step_back());
    assert!(controller.step_back());
    assert_eq!(controller.current_step(), 0);
    assert!(!controller.step_back());
    assert_eq!(controller.current_step(), 0);
    assert_eq!(completed(&controller), vec![0, 1]);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut controller = StepperController::default();
    for _ in 0..6 {
        controller.complete_current_step();
    }
    assert!(controller.reset());
    assert_eq!(controller.state(), &StepperState::new());

    // Resetting the initial state changes nothing
    assert!(!controller.reset());
}

#[test]
fn test_revisit_completed_step_and_recomplete() {
    let mut controller = StepperController::default();
    controller.complete_current_step();
    controller.complete_current_step();
    assert!(controller.select_step(0));
    assert_eq!(controller.status_of(0), StepStatus::Completed);
    assert!(!controller.can_complete());

    // Completing an already completed step still advances
    assert!(controller.complete_current_step());
    assert_eq!(controller.current_step(), 1);
    assert_eq!(completed(&controller), vec![0, 1]);
}

#[test]
fn test_affordances_follow_state() {
    let mut controller = StepperController::default();
    assert!(!controller.can_step_back());
    assert!(controller.can_complete());
    assert!(!controller.can_reset());

    controller.complete_current_step();
    assert!(controller.can_step_back());
    assert!(controller.can_complete());
}

#[test]
fn test_final_step_completed_but_not_current_hides_reset() {
    let mut controller = StepperController::default();
    for _ in 0..6 {
        controller.complete_current_step();
    }
    controller.step_back();
    assert!(controller.is_finished());
    assert!(!controller.can_reset());
}

#[test]
fn test_progress_tracks_completed_count() {
    let mut controller = StepperController::default();
    for expected in 1..=6 {
        controller.complete_current_step();
        let fraction = expected as f64 / 6.0;
        assert!((controller.progress() - fraction).abs() < f64::EPSILON);
        assert_eq!(controller.completed_count(), expected);
    }
}

#[test]
fn test_dispatch_matches_named_operations() {
    let mut a = StepperController::default();
    let mut b = StepperController::default();
    a.complete_current_step();
    b.dispatch(Action::CompleteCurrent);
    a.select_step(0);
    b.dispatch(Action::Select(0));
    assert_eq!(a.state(), b.state());
}
