//! End-to-end slider behaviour driven through a manual scheduler

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glissade_animation::ManualScheduler;
use glissade_core::ElementId;
use glissade_platform::{HostEvent, InputEvent, Pointer};
use glissade_slider::prelude::*;

const MAX_FRAMES: usize = 5_000;

fn cells(count: u64, width: f32) -> Vec<Cell> {
    (0..count)
        .map(|i| Cell::new(ElementId(i), CellSize::new(width, 200.0).unwrap()))
        .collect()
}

fn build(options: SliderOptions, count: u64) -> (ManualScheduler, Slider) {
    let scheduler = ManualScheduler::new();
    let mut slider = Slider::new(options, scheduler.handle()).unwrap();
    slider.activate(400.0, cells(count, 150.0));
    (scheduler, slider)
}

fn count_events(slider: &mut Slider, kind: SliderEventKind) -> Rc<RefCell<usize>> {
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    slider.on(kind, move |_| *sink.borrow_mut() += 1);
    count
}

fn input(slider: &mut Slider, event: InputEvent) {
    slider.handle_event(HostEvent::Input(event));
}

#[test]
fn test_selection_stays_in_bounds_without_wrap() {
    let (scheduler, mut slider) = build(SliderOptions::default(), 6);

    // Deterministic mix of navigation, jumps and drags
    let mut seed: u32 = 0x2545_f491;
    for step in 0..200u64 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        match seed % 5 {
            0 => {
                slider.next(false);
            }
            1 => {
                slider.previous(false);
            }
            2 => {
                slider.select((seed % 20) as isize - 10, SelectOptions::default());
            }
            3 => {
                let t = step * 1_000;
                let dx = (seed % 600) as f32 - 300.0;
                let at = |x: f32, ms: u64| Pointer::mouse(x, 0.0).at(Duration::from_millis(t + ms));
                input(&mut slider, InputEvent::PointerDown(at(200.0, 0)));
                input(&mut slider, InputEvent::PointerMove(at(200.0 + dx, 16)));
                input(&mut slider, InputEvent::PointerUp(at(200.0 + dx, 32)));
            }
            _ => {
                scheduler.run_while_animating(&mut slider, MAX_FRAMES);
            }
        }
        let index = slider.selected_index().unwrap();
        assert!(index < 6, "step {} left index {}", step, index);
    }
}

#[test]
fn test_wrap_around_indices_are_equivalent() {
    let options = SliderOptions {
        wrap_around: true,
        ..Default::default()
    };

    let (_a, mut forward) = build(options.clone(), 5);
    forward.select(2, SelectOptions::default());
    forward.select(5, SelectOptions::default());
    let (_b, mut direct) = build(options.clone(), 5);
    direct.select(2, SelectOptions::default());
    direct.select(0, SelectOptions::default());
    assert_eq!(forward.selected_index(), direct.selected_index());
    assert_eq!(forward.selected_index(), Some(0));

    let (_c, mut backward) = build(options.clone(), 5);
    backward.select(-1, SelectOptions::default());
    let (_d, mut last) = build(options, 5);
    last.select(4, SelectOptions::default());
    assert_eq!(backward.selected_index(), last.selected_index());
    assert_eq!(backward.selected_index(), Some(4));
}

#[test]
fn test_wrap_around_settles_on_equivalent_position() {
    let options = SliderOptions {
        wrap_around: true,
        ..Default::default()
    };
    let (scheduler, mut slider) = build(options, 5);
    let width = slider.slideable_width();

    slider.select(-1, SelectOptions::default());
    scheduler.run_while_animating(&mut slider, MAX_FRAMES);

    let target = slider.cells()[4].target();
    assert!((slider.x() + target).abs() < 0.05);
    // Rendered strip keeps the selected cell under the cursor
    let offset = slider.slider_offset();
    let drawn = offset + slider.cells()[4].render_x(width);
    let cursor = slider.cursor_position() - slider.cells()[4].size().width / 2.0;
    assert!((drawn - cursor).abs() < 0.05);
}

#[test]
fn test_settle_converges_with_single_event() {
    let (scheduler, mut slider) = build(SliderOptions::default(), 8);
    let settles = count_events(&mut slider, SliderEventKind::Settle);

    slider.select(7, SelectOptions::default());
    let frames = scheduler.run_while_animating(&mut slider, MAX_FRAMES);

    assert!(frames < MAX_FRAMES);
    assert!(!slider.is_animating());
    assert_eq!(scheduler.active_ticks(), 0);
    assert_eq!(*settles.borrow(), 1);
    assert!((slider.x() + slider.cells()[7].target()).abs() < 0.05);
}

#[test]
fn test_drag_past_first_cell_moves_less_than_pointer() {
    let options = SliderOptions {
        contain: true,
        ..Default::default()
    };
    let (scheduler, mut slider) = build(options, 6);
    let start = slider.x();
    let distance = 120.0;

    input(&mut slider, InputEvent::PointerDown(Pointer::mouse(100.0, 0.0)));
    input(
        &mut slider,
        InputEvent::PointerMove(Pointer::mouse(100.0 + distance, 0.0).at(Duration::from_millis(50))),
    );
    let moved = slider.x() - start;
    assert!(moved > 0.0 && moved < distance);

    input(
        &mut slider,
        InputEvent::PointerUp(Pointer::mouse(100.0 + distance, 0.0).at(Duration::from_millis(100))),
    );
    scheduler.run_while_animating(&mut slider, MAX_FRAMES);
    let index = slider.selected_index().unwrap();
    assert!(index < slider.cell_count());
    assert_eq!(index, 0);
}

#[test]
fn test_insert_and_remove_shift_selection() {
    let options = SliderOptions {
        initial_index: 3,
        ..Default::default()
    };
    let (_scheduler, mut slider) = build(options.clone(), 5);
    let inserted = vec![
        Cell::new(ElementId(100), CellSize::new(150.0, 200.0).unwrap()),
        Cell::new(ElementId(101), CellSize::new(150.0, 200.0).unwrap()),
    ];
    slider.insert(inserted, 1);
    assert_eq!(slider.selected_index(), Some(5));

    let (_scheduler, mut slider) = build(options, 5);
    slider.remove(&[ElementId(0), ElementId(1)]);
    assert_eq!(slider.selected_index(), Some(1));
}

#[test]
fn test_four_cell_select_scenario() {
    let options = SliderOptions {
        selected_attraction: 0.025,
        friction: 0.28,
        ..Default::default()
    };
    let (scheduler, mut slider) = build(options, 4);
    let settles = count_events(&mut slider, SliderEventKind::Settle);
    let selects = count_events(&mut slider, SliderEventKind::Select);

    assert!(slider.select(3, SelectOptions::default()));
    scheduler.run_while_animating(&mut slider, MAX_FRAMES);

    assert_eq!(slider.selected_index(), Some(3));
    assert_eq!(slider.selected_element(), Some(ElementId(3)));
    assert!(slider.render_state().cells[3].is_selected);
    assert_eq!(*settles.borrow(), 1);

    assert!(!slider.select(10, SelectOptions::default()));
    assert_eq!(slider.selected_index(), Some(3));
    assert_eq!(*selects.borrow(), 1);
    assert!(!slider.is_animating());
}

#[test]
fn test_autoplay_cycles_with_wrap() {
    let options = SliderOptions {
        auto_play: AutoPlay::Millis(800),
        ..Default::default()
    };
    let (scheduler, mut slider) = build(options, 3);
    let selects = count_events(&mut slider, SliderEventKind::Select);

    scheduler.advance(&mut slider, Duration::from_secs(10));
    assert!(*selects.borrow() >= 3);

    slider.handle_event(HostEvent::PointerEntered);
    let before = *selects.borrow();
    scheduler.advance(&mut slider, Duration::from_secs(5));
    assert_eq!(*selects.borrow(), before);
}
