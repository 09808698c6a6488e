//! Touch and key input forwarding
//!
//! Converts platform input events into native engine calls. Nothing is
//! buffered: every event turns into zero or more [`Engine`] calls right away.

use crate::engine::Engine;

/// Android `KeyEvent.KEYCODE_UNKNOWN`
pub const KEYCODE_UNKNOWN: i32 = 0;

/// Motion event action, masked (pointer index stripped)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    /// First pointer went down
    Down,
    /// Last pointer went up
    Up,
    /// One or more pointers moved
    Move,
    /// A non-primary pointer went down
    PointerDown,
    /// A non-primary pointer went up
    PointerUp,
    /// Gesture aborted
    Cancel,
    /// Hover, scroll, button and other actions the engine never sees
    Other,
}

/// Touch pointer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    /// Pointer ID (for multi-touch)
    pub id: i32,
    /// X coordinate in surface pixels
    pub x: f32,
    /// Y coordinate in surface pixels
    pub y: f32,
}

impl TouchPointer {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Platform-neutral motion event
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    /// Index into `pointers` of the pointer that changed, for
    /// `PointerDown`/`PointerUp`
    pub action_index: usize,
    /// All pointers currently in contact
    pub pointers: Vec<TouchPointer>,
}

impl MotionEvent {
    pub fn new(action: MotionAction, action_index: usize, pointers: Vec<TouchPointer>) -> Self {
        Self {
            action,
            action_index,
            pointers,
        }
    }
}

/// Single key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: i32,
    /// Unicode codepoint produced by the key, 0 if none
    pub unicode_char: u32,
    pub repeat_count: i32,
}

impl KeyEvent {
    pub fn new(key_code: i32, unicode_char: u32, repeat_count: i32) -> Self {
        Self {
            key_code,
            unicode_char,
            repeat_count,
        }
    }
}

/// Multi-character input delivered in one event (IME commits,
/// `ACTION_MULTIPLE` key events)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBatch {
    pub key_code: i32,
    pub characters: String,
    pub repeat_count: i32,
}

impl KeyBatch {
    pub fn new(key_code: i32, characters: impl Into<String>, repeat_count: i32) -> Self {
        Self {
            key_code,
            characters: characters.into(),
            repeat_count,
        }
    }
}

fn forward_pointer<E: Engine + ?Sized>(
    engine: &E,
    pointer: &TouchPointer,
    pressed: bool,
    is_primary: bool,
) {
    engine.touch(
        pointer.x as i32,
        pointer.y as i32,
        pointer.id,
        pressed,
        is_primary,
    );
}

/// Forward a motion event to the engine
///
/// Moves report every active pointer as pressed, non-primary. Down/up edges
/// report a single pointer with `is_primary` set: index 0 for `Down`/`Up`,
/// the action index for `PointerDown`/`PointerUp`. Always consumed.
pub fn forward_motion<E: Engine + ?Sized>(engine: &E, event: &MotionEvent) -> bool {
    match event.action {
        MotionAction::Move => {
            for pointer in &event.pointers {
                forward_pointer(engine, pointer, true, false);
            }
        }
        MotionAction::Down | MotionAction::Up => {
            if let Some(pointer) = event.pointers.first() {
                forward_pointer(engine, pointer, event.action == MotionAction::Down, true);
            }
        }
        MotionAction::PointerDown | MotionAction::PointerUp => {
            match event.pointers.get(event.action_index) {
                Some(pointer) => forward_pointer(
                    engine,
                    pointer,
                    event.action == MotionAction::PointerDown,
                    true,
                ),
                None => tracing::warn!(
                    "Pointer index {} out of range ({} pointers)",
                    event.action_index,
                    event.pointers.len()
                ),
            }
        }
        MotionAction::Cancel | MotionAction::Other => {}
    }

    true
}

/// Forward a key press; the engine decides whether it was consumed
pub fn forward_key_down<E: Engine + ?Sized>(engine: &E, event: &KeyEvent) -> bool {
    engine.key(
        event.key_code,
        true,
        event.unicode_char,
        event.repeat_count > 0,
    )
}

/// Forward a key release; releases never autorepeat
pub fn forward_key_up<E: Engine + ?Sized>(engine: &E, event: &KeyEvent) -> bool {
    engine.key(event.key_code, false, event.unicode_char, false)
}

/// Forward multi-character input as a press/release pair per character
///
/// Only batches carrying [`KEYCODE_UNKNOWN`] are text; anything else is
/// declined so the platform falls back to its default handling.
///
/// Characters go out as Unicode scalar values, so a character outside the
/// BMP is one press/release pair carrying the full codepoint rather than
/// two pairs of UTF-16 surrogates. The engine's `unicode_char` is a
/// codepoint everywhere else too.
pub fn forward_key_batch<E: Engine + ?Sized>(engine: &E, batch: &KeyBatch) -> bool {
    if batch.key_code != KEYCODE_UNKNOWN {
        return false;
    }

    let autorepeat = batch.repeat_count > 0;
    for ch in batch.characters.chars() {
        let unicode = u32::from(ch);
        engine.key(KEYCODE_UNKNOWN, true, unicode, autorepeat);
        engine.key(KEYCODE_UNKNOWN, false, unicode, autorepeat);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineCall, RecordingEngine};

    #[test]
    fn test_move_reports_every_pointer() {
        let engine = RecordingEngine::new();
        let event = MotionEvent::new(
            MotionAction::Move,
            0,
            vec![
                TouchPointer::new(0, 10.0, 20.0),
                TouchPointer::new(3, 30.5, 40.9),
                TouchPointer::new(7, 50.0, 60.0),
            ],
        );

        assert!(forward_motion(&engine, &event));

        let touches = engine.touches();
        assert_eq!(touches.len(), 3);
        assert!(touches
            .iter()
            .all(|t| matches!(t, EngineCall::Touch { pressed: true, is_primary: false, .. })));
        assert_eq!(
            touches[1],
            EngineCall::Touch {
                x: 30,
                y: 40,
                pointer_id: 3,
                pressed: true,
                is_primary: false,
            }
        );
    }

    #[test]
    fn test_pointer_up_uses_action_index() {
        let engine = RecordingEngine::new();
        let event = MotionEvent::new(
            MotionAction::PointerUp,
            1,
            vec![
                TouchPointer::new(0, 1.0, 1.0),
                TouchPointer::new(4, 100.0, 200.0),
            ],
        );

        forward_motion(&engine, &event);

        assert_eq!(
            engine.calls(),
            vec![EngineCall::Touch {
                x: 100,
                y: 200,
                pointer_id: 4,
                pressed: false,
                is_primary: true,
            }]
        );
    }

    #[test]
    fn test_cancel_is_consumed_without_calls() {
        let engine = RecordingEngine::new();
        let event = MotionEvent::new(
            MotionAction::Cancel,
            0,
            vec![TouchPointer::new(0, 1.0, 1.0)],
        );

        assert!(forward_motion(&engine, &event));
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_key_up_never_autorepeats() {
        let engine = RecordingEngine::new().with_key_result(true);
        let event = KeyEvent::new(29, 'a' as u32, 3);

        assert!(forward_key_down(&engine, &event));
        assert!(forward_key_up(&engine, &event));

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::Key {
                    code: 29,
                    pressed: true,
                    unicode_char: 'a' as u32,
                    autorepeat: true,
                },
                EngineCall::Key {
                    code: 29,
                    pressed: false,
                    unicode_char: 'a' as u32,
                    autorepeat: false,
                },
            ]
        );
    }

    #[test]
    fn test_batch_forwards_codepoints() {
        let engine = RecordingEngine::new();
        let batch = KeyBatch::new(KEYCODE_UNKNOWN, "ö€", 0);

        assert!(forward_key_batch(&engine, &batch));

        let chars: Vec<u32> = engine
            .calls()
            .iter()
            .filter_map(|call| match call {
                EngineCall::Key { unicode_char, .. } => Some(*unicode_char),
                _ => None,
            })
            .collect();
        assert_eq!(chars, vec![0xf6, 0xf6, 0x20ac, 0x20ac]);
    }

    #[test]
    fn test_batch_sends_one_pair_outside_bmp() {
        let engine = RecordingEngine::new();

        assert!(forward_key_batch(
            &engine,
            &KeyBatch::new(KEYCODE_UNKNOWN, "\u{1F600}", 0)
        ));

        assert_eq!(
            engine.keys(),
            vec![
                EngineCall::Key {
                    code: KEYCODE_UNKNOWN,
                    pressed: true,
                    unicode_char: 0x1F600,
                    autorepeat: false,
                },
                EngineCall::Key {
                    code: KEYCODE_UNKNOWN,
                    pressed: false,
                    unicode_char: 0x1F600,
                    autorepeat: false,
                },
            ]
        );
    }
}
