//! Android input conversion
//!
//! Converts android-activity input events to the shim's platform-neutral
//! events and routes them to the matching [`ActivityShim`] handler. The
//! mapping itself works on raw NDK values so it builds on every host.

use nya_platform::{KeyBatch, MotionAction, MotionEvent, TouchPointer};

#[cfg(target_os = "android")]
use android_activity::input::{
    InputEvent, KeyAction, KeyEvent as AndroidKeyEvent, KeyMapChar,
    MotionEvent as AndroidMotionEvent,
};
#[cfg(target_os = "android")]
use android_activity::{AndroidApp, InputStatus};
#[cfg(target_os = "android")]
use nya_platform::{ActivityShim, Engine, KeyEvent, SoftInputView};

// AMOTION_EVENT_ACTION_* after masking
const ACTION_DOWN: u32 = 0;
const ACTION_UP: u32 = 1;
const ACTION_MOVE: u32 = 2;
const ACTION_CANCEL: u32 = 3;
const ACTION_POINTER_DOWN: u32 = 5;
const ACTION_POINTER_UP: u32 = 6;

/// Shim action for a masked NDK motion action
pub fn motion_action(masked_action: u32) -> MotionAction {
    match masked_action {
        ACTION_DOWN => MotionAction::Down,
        ACTION_UP => MotionAction::Up,
        ACTION_MOVE => MotionAction::Move,
        ACTION_CANCEL => MotionAction::Cancel,
        ACTION_POINTER_DOWN => MotionAction::PointerDown,
        ACTION_POINTER_UP => MotionAction::PointerUp,
        _ => MotionAction::Other,
    }
}

/// Shim motion event from the NDK action, the changed pointer's index and
/// every pointer in contact
pub fn motion_event(
    masked_action: u32,
    pointer_index: usize,
    pointers: impl IntoIterator<Item = TouchPointer>,
) -> MotionEvent {
    MotionEvent::new(
        motion_action(masked_action),
        pointer_index,
        pointers.into_iter().collect(),
    )
}

/// Batch for an `ACTION_MULTIPLE` key event, `None` when there is no text
///
/// An empty batch has lost its payload on the way through the NDK; leave it
/// to the platform instead of reporting it consumed.
pub fn key_batch(key_code: i32, characters: &str, repeat_count: i32) -> Option<KeyBatch> {
    if characters.is_empty() {
        return None;
    }
    Some(KeyBatch::new(key_code, characters, repeat_count))
}

/// Converts Android MotionEvent to a shim MotionEvent
#[cfg(target_os = "android")]
pub fn convert_motion_event(event: &AndroidMotionEvent) -> MotionEvent {
    let pointers = (0..event.pointer_count()).map(|i| {
        let p = event.pointer_at_index(i);
        TouchPointer::new(p.pointer_id(), p.x(), p.y())
    });

    motion_event(u32::from(event.action()), event.pointer_index(), pointers)
}

/// Unicode character a key produces under its current meta state, 0 if none
#[cfg(target_os = "android")]
fn unicode_char(app: &AndroidApp, event: &AndroidKeyEvent) -> u32 {
    let map = match app.device_key_character_map(event.device_id()) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("No key character map for device {}: {:?}", event.device_id(), e);
            return 0;
        }
    };

    match map.get(event.key_code(), event.meta_state()) {
        Ok(KeyMapChar::Unicode(ch)) | Ok(KeyMapChar::CombiningAccent(ch)) => u32::from(ch),
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!("Key {:?} has no character: {:?}", event.key_code(), e);
            0
        }
    }
}

/// Converts Android KeyEvent to a shim KeyEvent
#[cfg(target_os = "android")]
pub fn convert_key_event(app: &AndroidApp, event: &AndroidKeyEvent) -> KeyEvent {
    KeyEvent::new(
        u32::from(event.key_code()) as i32,
        unicode_char(app, event),
        event.repeat_count(),
    )
}

#[cfg(target_os = "android")]
fn status(consumed: bool) -> InputStatus {
    if consumed {
        InputStatus::Handled
    } else {
        InputStatus::Unhandled
    }
}

/// Route one input event to the shim
#[cfg(target_os = "android")]
pub fn dispatch_input<E: Engine, V: SoftInputView>(
    app: &AndroidApp,
    shim: &mut ActivityShim<E, V>,
    event: &InputEvent,
) -> InputStatus {
    match event {
        InputEvent::MotionEvent(motion) => {
            let event = convert_motion_event(motion);
            tracing::trace!("Touch {:?} with {} pointers", event.action, event.pointers.len());
            status(shim.on_touch(&event))
        }
        InputEvent::KeyEvent(key) => match key.action() {
            KeyAction::Down => status(shim.on_key_down(&convert_key_event(app, key))),
            KeyAction::Up => status(shim.on_key_up(&convert_key_event(app, key))),
            // AKeyEvent has no getter for the characters
            KeyAction::Multiple => {
                match key_batch(u32::from(key.key_code()) as i32, "", key.repeat_count()) {
                    Some(batch) => status(shim.on_key_multiple(&batch)),
                    None => {
                        tracing::trace!("Key batch without characters, not handled");
                        InputStatus::Unhandled
                    }
                }
            }
            _ => InputStatus::Unhandled,
        },
        _ => InputStatus::Unhandled,
    }
}
