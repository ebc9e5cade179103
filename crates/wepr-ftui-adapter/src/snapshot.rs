//! Snapshot helpers for adapter-based render abstractions.

use crate::render::RenderFrame;

/// Assert a stable text snapshot for a render frame.
///
/// Trailing whitespace on every row is ignored on both sides, so expected
/// snapshots can be written without padding to the frame width.
pub fn assert_render_frame_snapshot(label: &str, frame: &RenderFrame, expected: &str) {
    let expected = normalize(expected.trim_end_matches('\n'));
    let got = normalize(&frame.snapshot());
    assert_eq!(
        got, expected,
        "render frame snapshot mismatch ({label})\n--- expected\n{expected}\n--- got\n{got}",
    );
}

/// Assert that some row of the frame contains `needle`.
pub fn assert_frame_contains(label: &str, frame: &RenderFrame, needle: &str) {
    let snapshot = frame.snapshot();
    assert!(
        snapshot.lines().any(|row| row.contains(needle)),
        "frame ({label}) does not contain {needle:?}\n--- got\n{snapshot}",
    );
}

fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end_matches('\n')
        .to_owned()
}
