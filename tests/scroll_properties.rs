//! Property-based tests for the mounted window under scrolling.
//!
//! Black-box: drives the controller only through host scroll offsets and
//! observes which sections end up mounted.
//!
//! Properties under test:
//! - The mounted set is always one contiguous run of section indices
//! - Every section overlapping the viewport is mounted
//! - At most one section beyond the viewport is mounted on each side
//! - The host's attached surfaces match the controller's mounted set

mod grid_harness;

use flashlight::config::GridOptions;
use grid_harness::{items_with_ratios, square_items, GridHarness};
use proptest::prelude::*;

fn options(section_rows: usize) -> GridOptions {
    GridOptions {
        margin: 3.0,
        row_aspect_ratio_threshold: 5.0,
        section_rows,
    }
}

fn assert_window_invariants(h: &GridHarness) -> Result<(), TestCaseError> {
    let mounted = h.mounted();
    let visible = h.visible();

    prop_assert!(
        mounted.windows(2).all(|w| w[1] == w[0] + 1),
        "mounted sections not contiguous: {:?}",
        mounted
    );
    for index in &visible {
        prop_assert!(mounted.contains(index), "visible section {} not mounted", index);
    }
    if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
        prop_assert!(mounted[0] + 1 >= *first);
        prop_assert!(mounted[mounted.len() - 1] <= last + 1);
    }

    let attached: Vec<usize> = h
        .controller
        .host()
        .attached()
        .iter()
        .map(|i| i.get())
        .collect();
    prop_assert_eq!(attached, mounted);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn window_stays_contiguous_and_covers_viewport(
        ratios in prop::collection::vec(0.3f64..3.0, 20..250),
        page_size in 5usize..60,
        section_rows in 1usize..5,
        offsets in prop::collection::vec(0.0f64..1.0, 1..25),
    ) {
        let mut h = GridHarness::new(items_with_ratios(&ratios), page_size, options(section_rows), 480.0, 320.0)
            .attached();

        for fraction in offsets {
            let target = fraction * h.controller.host().max_scroll_top();
            h.controller.host_mut().scroll_to(target);
            h.settle();
            assert_window_invariants(&h)?;
        }
    }

    #[test]
    fn render_count_matches_mount_transitions(
        offsets in prop::collection::vec(0.0f64..1.0, 1..20),
    ) {
        let mut h = GridHarness::new(square_items(400), 40, options(2), 480.0, 320.0).attached();
        h.load_everything();
        let mut expected = h.renders.borrow().len();

        for fraction in offsets {
            let update = h.scroll_to(fraction * h.controller.host().max_scroll_top());
            let newly: usize = update
                .mounted
                .iter()
                .map(|i| h.controller.sections()[i.get()].item_count())
                .sum();
            expected += newly;
            prop_assert_eq!(h.renders.borrow().len(), expected);
        }
    }
}

#[test]
fn scrolling_to_the_bottom_loads_everything() {
    let mut h = GridHarness::new(square_items(500), 25, options(2), 480.0, 320.0).attached();

    for _ in 0..500 {
        if h.controller.cursor().is_none() {
            break;
        }
        let bottom = h.controller.host().max_scroll_top();
        h.controller.host_mut().scroll_to(bottom);
        h.settle();
    }
    let bottom = h.controller.host().max_scroll_top();
    h.scroll_to(bottom);

    assert!(h.controller.cursor().is_none());
    assert_eq!(h.controller.tiled_items(), 500);
    let last = h.controller.sections().len() - 1;
    assert_eq!(h.mounted().last(), Some(&last));
}

#[test]
fn scrolling_up_after_down_restores_top_sections() {
    let mut h = GridHarness::new(square_items(300), 300, options(1), 480.0, 320.0).attached();
    h.scroll_to(2000.0);
    assert!(!h.mounted().contains(&0));

    h.scroll_to(0.0);
    assert_eq!(h.mounted().first(), Some(&0));
    assert_eq!(h.scroll_top(), 0.0);
}
