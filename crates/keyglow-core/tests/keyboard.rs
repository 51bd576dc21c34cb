//! Tests for the keyboard state machine and cycle driver.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{Board, ColumnPort, FakeDelay, LEDS, RecordingDriver, RowPort, COLS, ROWS, heartbeat, press, scanner};
use keyglow_core::color::OFF;
use keyglow_core::{CycleError, EdgeKind, Heartbeat, InitFault, Keyboard, Role, SystemState};

type TestKeyboard =
    Keyboard<ColumnPort, RowPort, FakeDelay, RecordingDriver<LEDS>, Heartbeat, ROWS, COLS, LEDS>;

fn keyboard(board: &Rc<RefCell<Board>>, threshold: u8) -> (TestKeyboard, RecordingDriver<LEDS>) {
    let driver = RecordingDriver::<LEDS>::default();
    let keyboard = Keyboard::new(scanner(board, threshold), heartbeat(driver.clone()));
    (keyboard, driver)
}

#[test]
fn cycle_before_start_is_refused() {
    let board = Board::new();
    let (mut keyboard, driver) = keyboard(&board, 3);

    assert!(matches!(keyboard.cycle(), Err(CycleError::NotStarted)));
    assert_eq!(keyboard.state(), SystemState::Init);
    assert_eq!(board.borrow().operations, 0);
    assert!(driver.frames.borrow().is_empty());
}

#[test]
fn start_blanks_leds_and_runs() {
    let board = Board::new();
    let (mut keyboard, driver) = keyboard(&board, 3);

    keyboard.start().unwrap();

    assert_eq!(keyboard.state(), SystemState::Running);
    let frames = driver.frames.borrow();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0], [OFF; LEDS]);
}

#[test]
fn start_twice_is_harmless() {
    let board = Board::new();
    let (mut keyboard, _driver) = keyboard(&board, 3);

    keyboard.start().unwrap();
    keyboard.start().unwrap();

    assert_eq!(keyboard.state(), SystemState::Running);
}

#[test]
fn init_fault_halts_for_good() {
    let board = Board::new();
    board.borrow_mut().fail_rows = true;
    let (mut keyboard, driver) = keyboard(&board, 3);

    let fault = keyboard.start().unwrap_err();
    assert!(matches!(fault, InitFault::NotResponding { role: Role::Rows, .. }));
    assert_eq!(keyboard.state(), SystemState::Halted);

    // Even once the bus recovers nothing runs any more
    board.borrow_mut().fail_rows = false;
    let operations = board.borrow().operations;

    assert!(matches!(keyboard.start(), Err(InitFault::Halted)));
    for _ in 0..5 {
        assert!(matches!(keyboard.cycle(), Err(CycleError::Halted)));
    }
    assert_eq!(board.borrow().operations, operations);
    assert!(driver.frames.borrow().is_empty());
    assert_eq!(keyboard.state(), SystemState::Halted);
}

#[test]
fn unresponsive_columns_expander_is_reported() {
    let board = Board::new();
    board.borrow_mut().fail_columns = true;
    let (mut keyboard, _driver) = keyboard(&board, 3);

    let fault = keyboard.start().unwrap_err();

    assert!(matches!(fault, InitFault::NotResponding { role: Role::Columns, .. }));
}

#[test]
fn each_cycle_scans_then_renders() {
    let board = Board::new();
    let (mut keyboard, driver) = keyboard(&board, 3);
    keyboard.start().unwrap();

    for cycle in 0..(2 * LEDS) {
        keyboard.cycle().unwrap();
        assert_eq!(keyboard.cycle_id() as usize, cycle + 1);
    }

    assert_eq!(board.borrow().samples.len(), 2 * LEDS * COLS);
    let frames = driver.frames.borrow();
    // Startup blank plus one frame per cycle
    assert_eq!(frames.len(), 1 + 2 * LEDS);
    for (cycle, frame) in frames[1..].iter().enumerate() {
        let lit: Vec<usize> = (0..LEDS).filter(|i| frame[*i] != OFF).collect();
        assert_eq!(lit, vec![cycle % LEDS]);
    }
}

#[test]
fn events_only_live_for_their_cycle() {
    let board = Board::new();
    let (mut keyboard, _driver) = keyboard(&board, 2);
    keyboard.start().unwrap();

    press(&board, 2, 5, true);
    assert!(keyboard.cycle().unwrap().is_empty());

    let events = keyboard.cycle().unwrap().to_vec();
    assert_eq!(events.len(), 1);
    assert_eq!((events[0].row, events[0].col), (2, 5));
    assert_eq!(events[0].kind, EdgeKind::Pressed);
    assert_eq!(events[0].cycle_id, 1);
    assert_eq!(keyboard.events(), &events[..]);

    assert!(keyboard.cycle().unwrap().is_empty());
    assert!(keyboard.events().is_empty());
    assert!(keyboard.keys().is_pressed(2, 5));
}

#[test]
fn bus_fault_cycle_keeps_grid_and_retries() {
    let board = Board::new();
    let (mut keyboard, driver) = keyboard(&board, 1);
    keyboard.start().unwrap();

    press(&board, 2, 5, true);
    keyboard.cycle().unwrap();
    let before = *keyboard.keys();

    // Cycle k: fault half way through while the key is being released
    press(&board, 2, 5, false);
    board.borrow_mut().fail_rows_on_column = Some(10);
    let frames_before = driver.frames.borrow().len();

    match keyboard.cycle() {
        Err(CycleError::Bus(fault)) => assert_eq!(fault.role, Role::Rows),
        other => panic!("expected bus fault, got {:?}", other),
    }
    assert_eq!(*keyboard.keys(), before);
    assert!(keyboard.events().is_empty());
    assert_eq!(keyboard.state(), SystemState::Running);
    // The heartbeat still ticks
    assert_eq!(driver.frames.borrow().len(), frames_before + 1);

    // Cycle k + 1: full fresh scan
    board.borrow_mut().fail_rows_on_column = None;
    let samples_before = board.borrow().samples.len();
    let events = keyboard.cycle().unwrap().to_vec();

    assert_eq!(board.borrow().samples.len() - samples_before, COLS);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EdgeKind::Released);
    assert!(!keyboard.keys().is_pressed(2, 5));
}
