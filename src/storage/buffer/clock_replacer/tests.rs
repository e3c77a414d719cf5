use super::*;
use crate::storage::buffer::buffer_pool_manager::FrameId;
use crate::storage::buffer::replacer::Replacer;

#[test]
fn test_victim_on_empty_replacer() {
    let mut replacer = ClockReplacer::new(5);
    assert_eq!(replacer.victim(), None);
    assert_eq!(replacer.size(), 0);
}

#[test]
fn test_victim_takes_oldest_unreferenced_frame() {
    let mut replacer = ClockReplacer::new(5);
    unpin_frames(&mut replacer, &[0, 1, 2]);

    // All reference bits are set; the first sweep clears them and the
    // second returns the oldest frame.
    assert_eq!(replacer.victim(), Some(0));
    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), None);
}

#[test]
fn test_second_chance_ordering() {
    let mut replacer = ClockReplacer::new(5);
    unpin_frames(&mut replacer, &[0, 1, 2]);

    // Re-referencing frame 0 moves it behind the hand, so the sweep
    // reaches frame 1 first.
    replacer.pin(0);
    replacer.unpin(0);

    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), Some(0));
}

#[test]
fn test_pin_removes_frame_from_victim_pool() {
    let mut replacer = ClockReplacer::new(5);
    unpin_frames(&mut replacer, &[0, 1, 2]);

    replacer.pin(1);
    assert_eq!(replacer.size(), 2);

    assert_eq!(replacer.victim(), Some(0));
    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), None);
}

#[test]
fn test_pin_untracked_frame_is_noop() {
    let mut replacer = ClockReplacer::new(5);
    unpin_frames(&mut replacer, &[0]);

    replacer.pin(4);
    assert_eq!(replacer.size(), 1);
    assert_eq!(replacer.victim(), Some(0));
}

#[test]
fn test_unpin_existing_frame_rearms_reference_bit() {
    let mut replacer = ClockReplacer::new(5);
    unpin_frames(&mut replacer, &[0, 1]);

    // A sweep that returns frame 0 leaves frame 1 with its bit cleared.
    assert_eq!(replacer.victim(), Some(0));

    // Unpinning frame 1 again does not grow the pool, but re-arms the
    // bit so the next sweep gives it a second chance. With only one
    // frame resident it is still the victim, after two sweeps.
    replacer.unpin(1);
    assert_eq!(replacer.size(), 1);
    assert_eq!(replacer.victim(), Some(1));
}

#[test]
fn test_size_counts_resident_frames() {
    let mut replacer = ClockReplacer::new(10);
    assert_eq!(replacer.size(), 0);

    unpin_frames(&mut replacer, &[3, 7]);
    assert_eq!(replacer.size(), 2);

    replacer.victim();
    assert_eq!(replacer.size(), 1);
}

fn unpin_frames(replacer: &mut ClockReplacer, frame_ids: &[FrameId]) {
    frame_ids.iter().for_each(|&frame_id| replacer.unpin(frame_id));
}
