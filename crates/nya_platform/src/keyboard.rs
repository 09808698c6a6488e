//! Soft keyboard control
//!
//! The engine selects a keyboard with a single character code. Recognized
//! codes pick an Android input type and show the keyboard; anything else
//! hides it. Requests may be posted from any thread but are only ever
//! applied on the thread that owns the view.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Android `android.text.InputType` bits
    ///
    /// The empty set is `TYPE_NULL`: no IME editing, raw key events only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputType: u32 {
        const CLASS_TEXT = 0x0000_0001;
        const CLASS_NUMBER = 0x0000_0002;
        const CLASS_PHONE = 0x0000_0003;
        const CLASS_DATETIME = 0x0000_0004;

        const TEXT_VARIATION_URI = 0x0000_0010;
        const TEXT_VARIATION_EMAIL_ADDRESS = 0x0000_0020;
        const TEXT_VARIATION_PASSWORD = 0x0000_0080;
        const TEXT_FLAG_NO_SUGGESTIONS = 0x0008_0000;

        const NUMBER_VARIATION_PASSWORD = 0x0000_0010;
        const NUMBER_FLAG_SIGNED = 0x0000_1000;
        const NUMBER_FLAG_DECIMAL = 0x0000_2000;
    }
}

/// Android `EditorInfo.IME_ACTION_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImeAction {
    Unspecified,
    #[default]
    None,
    Go,
    Search,
    Send,
    Next,
    Done,
    Previous,
}

impl ImeAction {
    /// Raw `imeOptions` value
    pub fn as_raw(self) -> u32 {
        match self {
            ImeAction::Unspecified => 0,
            ImeAction::None => 1,
            ImeAction::Go => 2,
            ImeAction::Search => 3,
            ImeAction::Send => 4,
            ImeAction::Next => 5,
            ImeAction::Done => 6,
            ImeAction::Previous => 7,
        }
    }
}

/// Keyboard layouts the engine can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardMode {
    /// `'n'`
    Number,
    /// `'d'`
    SignedDecimal,
    /// `'f'`
    Phone,
    /// `'t'`, plain text without suggestions
    Text,
    /// `'p'`
    NumberPassword,
    /// `'e'`
    Email,
    /// `'w'`
    Password,
    /// `'u'`
    Uri,
}

impl KeyboardMode {
    pub const ALL: [KeyboardMode; 8] = [
        KeyboardMode::Number,
        KeyboardMode::SignedDecimal,
        KeyboardMode::Phone,
        KeyboardMode::Text,
        KeyboardMode::NumberPassword,
        KeyboardMode::Email,
        KeyboardMode::Password,
        KeyboardMode::Uri,
    ];

    /// Look up a mode by its character code
    pub fn from_code(code: u32) -> Option<Self> {
        let mode = match char::from_u32(code)? {
            'n' => KeyboardMode::Number,
            'd' => KeyboardMode::SignedDecimal,
            'f' => KeyboardMode::Phone,
            't' => KeyboardMode::Text,
            'p' => KeyboardMode::NumberPassword,
            'e' => KeyboardMode::Email,
            'w' => KeyboardMode::Password,
            'u' => KeyboardMode::Uri,
            _ => return None,
        };
        Some(mode)
    }

    /// Character code selecting this mode
    pub fn code(self) -> char {
        match self {
            KeyboardMode::Number => 'n',
            KeyboardMode::SignedDecimal => 'd',
            KeyboardMode::Phone => 'f',
            KeyboardMode::Text => 't',
            KeyboardMode::NumberPassword => 'p',
            KeyboardMode::Email => 'e',
            KeyboardMode::Password => 'w',
            KeyboardMode::Uri => 'u',
        }
    }

    /// Input type requested from the IME for this mode
    pub fn input_type(self) -> InputType {
        match self {
            KeyboardMode::Number => InputType::CLASS_NUMBER,
            KeyboardMode::SignedDecimal => {
                InputType::CLASS_NUMBER
                    | InputType::NUMBER_FLAG_SIGNED
                    | InputType::NUMBER_FLAG_DECIMAL
            }
            KeyboardMode::Phone => InputType::CLASS_PHONE,
            KeyboardMode::Text => InputType::empty(),
            KeyboardMode::NumberPassword => {
                InputType::CLASS_NUMBER | InputType::NUMBER_VARIATION_PASSWORD
            }
            KeyboardMode::Email => {
                InputType::CLASS_TEXT | InputType::TEXT_VARIATION_EMAIL_ADDRESS
            }
            KeyboardMode::Password => InputType::CLASS_TEXT | InputType::TEXT_VARIATION_PASSWORD,
            KeyboardMode::Uri => InputType::CLASS_TEXT | InputType::TEXT_VARIATION_URI,
        }
    }
}

/// What the keyboard should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardRequest {
    Show(KeyboardMode),
    Hide,
}

impl KeyboardRequest {
    /// Unrecognized codes hide the keyboard
    pub fn from_code(code: u32) -> Self {
        match KeyboardMode::from_code(code) {
            Some(mode) => KeyboardRequest::Show(mode),
            None => KeyboardRequest::Hide,
        }
    }
}

/// Descriptor returned when the IME asks for an input connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorInfo {
    pub input_type: InputType,
    pub ime_action: ImeAction,
}

/// Keyboard state shared between the controller and input-connection queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    pub visible: bool,
    pub requested_input_type: InputType,
    pub requested_ime_action: ImeAction,
}

impl KeyboardState {
    pub fn new(ime_action: ImeAction) -> Self {
        Self {
            visible: false,
            requested_input_type: InputType::CLASS_TEXT,
            requested_ime_action: ime_action,
        }
    }

    pub fn editor_info(&self) -> EditorInfo {
        EditorInfo {
            input_type: self.requested_input_type,
            ime_action: self.requested_ime_action,
        }
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(ImeAction::default())
    }
}

/// The rendering view as far as the soft keyboard is concerned
///
/// Implementations must only be driven from the thread that owns the view.
pub trait SoftInputView {
    /// Toggle focusability, both regular and in touch mode
    fn set_focusable(&mut self, focusable: bool);

    fn request_focus(&mut self);

    fn clear_focus(&mut self);

    /// Show the soft keyboard, forced
    fn show_soft_input(&mut self);

    fn hide_soft_input(&mut self);

    /// Make the IME re-query the input connection descriptor
    fn restart_input(&mut self);
}

/// Apply a keyboard request to the view and record the result in `state`
pub fn apply_keyboard_request<V: SoftInputView + ?Sized>(
    state: &mut KeyboardState,
    view: &mut V,
    request: KeyboardRequest,
) {
    let show = match request {
        KeyboardRequest::Show(mode) => {
            state.requested_input_type = mode.input_type();
            true
        }
        KeyboardRequest::Hide => false,
    };

    state.visible = show;
    view.set_focusable(show);

    if show {
        view.request_focus();
        view.show_soft_input();
        view.restart_input();
    } else {
        view.clear_focus();
        view.hide_soft_input();
    }

    tracing::debug!(
        "Keyboard {:?}, input type {:#x}",
        request,
        state.requested_input_type.bits()
    );
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Single-slot pending keyboard command
///
/// Posting never blocks and never waits for the request to be applied.
/// A post overwrites whatever is still pending, so only the most recent
/// request survives until the owning thread drains the slot.
#[derive(Clone, Default)]
pub struct KeyboardRequests {
    slot: Arc<Mutex<Option<KeyboardRequest>>>,
    waker: Option<Waker>,
}

impl KeyboardRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `waker` after every post so the owning thread wakes up to drain
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn post(&self, request: KeyboardRequest) {
        let replaced = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(request);
        if let Some(previous) = replaced {
            tracing::trace!("Keyboard request {:?} superseded by {:?}", previous, request);
        }

        if let Some(waker) = &self.waker {
            waker();
        }
    }

    /// Post by character code; see [`KeyboardRequest::from_code`]
    pub fn post_code(&self, code: u32) {
        self.post(KeyboardRequest::from_code(code));
    }

    /// Take the pending request, leaving the slot empty
    pub fn take(&self) -> Option<KeyboardRequest> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for KeyboardRequests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardRequests")
            .field("pending", &self.is_pending())
            .field("waker", &self.waker.is_some())
            .finish()
    }
}
