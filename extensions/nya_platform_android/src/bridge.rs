//! C ABI the engine calls back into
//!
//! The engine runs its own threads and cannot hold Rust state, so the
//! runner registers its keyboard request slot here. Posting is
//! fire-and-forget; the request is applied on the runner thread.

use std::ffi::c_int;
use std::sync::{Mutex, PoisonError};

use nya_platform::KeyboardRequests;

static KEYBOARD_REQUESTS: Mutex<Option<KeyboardRequests>> = Mutex::new(None);

/// Route engine keyboard requests to `requests`, replacing any previous slot
pub fn register_keyboard_requests(requests: KeyboardRequests) {
    *KEYBOARD_REQUESTS
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(requests);
}

/// Stop routing engine keyboard requests
pub fn unregister_keyboard_requests() {
    KEYBOARD_REQUESTS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}

/// Post a keyboard mode code; returns `false` when no runner is registered
pub fn post_keyboard_code(code: u32) -> bool {
    let guard = KEYBOARD_REQUESTS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(requests) => {
            requests.post_code(code);
            true
        }
        None => {
            tracing::warn!("Keyboard code {} posted with no activity running", code);
            false
        }
    }
}

/// Show the soft keyboard in the mode selected by `code`, or hide it for an
/// unrecognized code
#[no_mangle]
pub extern "C" fn nya_set_virtual_keyboard(code: c_int) {
    // Negative codes are never a mode and hide the keyboard
    post_keyboard_code(u32::try_from(code).unwrap_or(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nya_platform::{KeyboardMode, KeyboardRequest};

    // Single test: the slot is process-wide
    #[test]
    fn test_registration_routes_posts() {
        unregister_keyboard_requests();
        assert!(!post_keyboard_code('n' as u32));

        let requests = KeyboardRequests::new();
        register_keyboard_requests(requests.clone());

        nya_set_virtual_keyboard('p' as c_int);
        assert_eq!(
            requests.take(),
            Some(KeyboardRequest::Show(KeyboardMode::NumberPassword))
        );

        nya_set_virtual_keyboard(-1);
        assert_eq!(requests.take(), Some(KeyboardRequest::Hide));

        unregister_keyboard_requests();
        nya_set_virtual_keyboard('n' as c_int);
        assert_eq!(requests.take(), None);
    }
}
