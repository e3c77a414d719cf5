use crate::common::constants::INVALID_PID;
use crate::storage::page::Page;

#[test]
fn test_invalid_page_is_empty() {
    let page = Page::invalid();
    assert_eq!(page.page_id(), INVALID_PID);
    assert_eq!(page.pin_count(), 0);
    assert!(!page.is_dirty());
    assert!(page.data().iter().all(|&b| b == 0));
}

#[test]
fn test_reset_clears_previous_contents() {
    let mut page = Page::invalid();
    page.reset(3);
    page.data_mut()[0] = 0xab;
    page.inc_pin_count();
    page.set_dirty(true);

    page.reset(7);
    assert_eq!(page.page_id(), 7);
    assert_eq!(page.pin_count(), 0);
    assert!(!page.is_dirty());
    assert!(page.data().iter().all(|&b| b == 0));
}

#[test]
fn test_pin_count_tracks_holders() {
    let mut page = Page::invalid();
    page.reset(0);

    page.inc_pin_count();
    page.inc_pin_count();
    assert_eq!(page.pin_count(), 2);

    page.dec_pin_count();
    page.dec_pin_count();
    assert_eq!(page.pin_count(), 0);
}

#[test]
fn test_writing_data_does_not_set_dirty() {
    let mut page = Page::invalid();
    page.reset(0);

    page.data_mut()[..5].copy_from_slice(b"Hello");
    assert!(!page.is_dirty());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "Pin count already at zero")]
fn test_pin_count_underflow_is_detected() {
    let mut page = Page::invalid();
    page.reset(0);
    page.dec_pin_count();
}
