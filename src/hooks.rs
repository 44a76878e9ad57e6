use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Keys the overlay can represent. Covers the visible keyboard footprint plus
/// a few real keys that deliberately stay outside the modeled layout; virtual
/// key codes with no variant here are dropped at the capture boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen,
    Grave,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    Minus,
    Equal,
    Backspace,
    Insert,
    Home,
    PageUp,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBracket,
    RightBracket,
    Backslash,
    Delete,
    End,
    PageDown,
    CapsLock,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Quote,
    Enter,
    ShiftLeft,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    ShiftRight,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ControlLeft,
    ControlRight,
    SuperLeft,
    SuperRight,
    AltLeft,
    AltRight,
    Space,
    Menu,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
    NumLock,
    ScrollLock,
    PauseBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Normalized vocabulary delivered by a capture channel. Wheel magnitude is
/// discarded at the source; only the direction survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Wheel(WheelDirection),
    PointerMoved,
}

/// Subscriber callback. Invoked synchronously on whatever thread the OS
/// delivers input notifications; implementations must be fast, non-blocking
/// and allocation-free or the OS may silently drop the hook.
pub type EventSink = Arc<dyn Fn(InputEvent) + Send + Sync>;

#[derive(Debug, Error)]
pub enum HookInstallError {
    #[error("global input hooks are not supported on this platform")]
    Unsupported,
    #[error("hook thread did not signal readiness")]
    NotReady,
    #[error("hook registration was refused: {0}")]
    Refused(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookChannel {
    Keyboard,
    Mouse,
}

/// Seam between the capture lifecycle and the OS. The default backend
/// registers a session-wide low-level hook; tests inject [`MockHookBackend`].
pub trait HookBackend: Send {
    fn install(&mut self, channel: HookChannel, sink: EventSink) -> Result<(), HookInstallError>;
    fn uninstall(&mut self);
    fn is_installed(&self) -> bool;
}

/// One system-wide capture channel with an explicit install/uninstall
/// lifecycle. Observation is non-consuming: every event is forwarded to the
/// rest of the OS hook chain untouched.
pub struct InputHook {
    channel: HookChannel,
    backend: Box<dyn HookBackend>,
}

impl InputHook {
    pub fn keyboard() -> Self {
        Self::with_backend(HookChannel::Keyboard, Box::<DefaultHookBackend>::default())
    }

    pub fn mouse() -> Self {
        Self::with_backend(HookChannel::Mouse, Box::<DefaultHookBackend>::default())
    }

    pub fn with_backend(channel: HookChannel, backend: Box<dyn HookBackend>) -> Self {
        Self { channel, backend }
    }

    pub fn channel(&self) -> HookChannel {
        self.channel
    }

    /// Registers the hook and routes events into `sink`. Failure is fatal to
    /// this capture channel only; other channels are unaffected.
    pub fn install(&mut self, sink: EventSink) -> Result<(), HookInstallError> {
        self.backend.install(self.channel, sink)
    }

    /// Idempotent. Safe to call while an event delivery is in flight.
    pub fn uninstall(&mut self) {
        self.backend.uninstall();
    }

    pub fn is_installed(&self) -> bool {
        self.backend.is_installed()
    }
}

impl Drop for InputHook {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// In-process backend for tests: counts lifecycle calls and lets the paired
/// [`MockHookHandle`] emit events as if the OS delivered them.
#[derive(Clone)]
pub struct MockHookBackend {
    state: Arc<MockHookState>,
}

#[derive(Default)]
struct MockHookState {
    install_count: AtomicUsize,
    uninstall_count: AtomicUsize,
    sink: Mutex<Option<EventSink>>,
}

impl MockHookBackend {
    pub fn new() -> (Self, MockHookHandle) {
        let state = Arc::new(MockHookState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockHookHandle { state },
        )
    }
}

impl HookBackend for MockHookBackend {
    fn install(&mut self, _channel: HookChannel, sink: EventSink) -> Result<(), HookInstallError> {
        let mut guard = self
            .state
            .sink
            .lock()
            .map_err(|_| HookInstallError::Refused("sink slot poisoned".into()))?;
        if guard.is_none() {
            self.state.install_count.fetch_add(1, Ordering::SeqCst);
            *guard = Some(sink);
        }
        Ok(())
    }

    fn uninstall(&mut self) {
        if let Ok(mut guard) = self.state.sink.lock() {
            if guard.take().is_some() {
                self.state.uninstall_count.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn is_installed(&self) -> bool {
        self.state
            .sink
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

pub struct MockHookHandle {
    state: Arc<MockHookState>,
}

impl MockHookHandle {
    pub fn install_count(&self) -> usize {
        self.state.install_count.load(Ordering::SeqCst)
    }

    pub fn uninstall_count(&self) -> usize {
        self.state.uninstall_count.load(Ordering::SeqCst)
    }

    /// Delivers an event through the installed sink. Returns `false` when no
    /// sink is installed.
    pub fn emit(&self, event: InputEvent) -> bool {
        match self.state.sink.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(sink) => {
                    sink(event);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }
}

/// Backend that always refuses, for platforms without a global hook facility.
#[derive(Debug, Default)]
pub struct UnsupportedHookBackend;

impl HookBackend for UnsupportedHookBackend {
    fn install(&mut self, _channel: HookChannel, _sink: EventSink) -> Result<(), HookInstallError> {
        Err(HookInstallError::Unsupported)
    }

    fn uninstall(&mut self) {}

    fn is_installed(&self) -> bool {
        false
    }
}

#[cfg(windows)]
type DefaultHookBackend = platform::WindowsHookBackend;

#[cfg(not(windows))]
type DefaultHookBackend = UnsupportedHookBackend;

#[cfg(windows)]
mod platform {
    use super::{
        EventSink, HookBackend, HookChannel, HookInstallError, InputEvent, Key, MouseButton,
        WheelDirection,
    };
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use std::thread::JoinHandle;
    use std::time::Duration;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        VIRTUAL_KEY, VK_0, VK_1, VK_2, VK_3, VK_4, VK_5, VK_6, VK_7, VK_8, VK_9, VK_A, VK_ADD,
        VK_APPS, VK_B, VK_BACK, VK_C, VK_CAPITAL, VK_D, VK_DECIMAL, VK_DELETE, VK_DIVIDE, VK_DOWN,
        VK_E, VK_END, VK_ESCAPE, VK_F, VK_F1, VK_F10, VK_F11, VK_F12, VK_F2, VK_F3, VK_F4, VK_F5,
        VK_F6, VK_F7, VK_F8, VK_F9, VK_G, VK_H, VK_HOME, VK_I, VK_INSERT, VK_J, VK_K, VK_L,
        VK_LCONTROL, VK_LEFT, VK_LMENU, VK_LSHIFT, VK_LWIN, VK_M, VK_MULTIPLY, VK_N, VK_NEXT,
        VK_NUMLOCK, VK_NUMPAD0, VK_NUMPAD1, VK_NUMPAD2, VK_NUMPAD3, VK_NUMPAD4, VK_NUMPAD5,
        VK_NUMPAD6, VK_NUMPAD7, VK_NUMPAD8, VK_NUMPAD9, VK_O, VK_OEM_1, VK_OEM_2, VK_OEM_3,
        VK_OEM_4, VK_OEM_5, VK_OEM_6, VK_OEM_7, VK_OEM_COMMA, VK_OEM_MINUS, VK_OEM_PERIOD,
        VK_OEM_PLUS, VK_P, VK_PAUSE, VK_PRIOR, VK_Q, VK_R, VK_RCONTROL, VK_RETURN, VK_RIGHT,
        VK_RMENU, VK_RSHIFT, VK_RWIN, VK_S, VK_SCROLL, VK_SNAPSHOT, VK_SPACE, VK_SUBTRACT, VK_T,
        VK_TAB, VK_U, VK_UP, VK_V, VK_W, VK_X, VK_Y, VK_Z,
    };

    static KEYBOARD_SINK: Lazy<Mutex<Option<EventSink>>> = Lazy::new(|| Mutex::new(None));
    static MOUSE_SINK: Lazy<Mutex<Option<EventSink>>> = Lazy::new(|| Mutex::new(None));

    fn sink_slot(channel: HookChannel) -> &'static Mutex<Option<EventSink>> {
        match channel {
            HookChannel::Keyboard => &KEYBOARD_SINK,
            HookChannel::Mouse => &MOUSE_SINK,
        }
    }

    #[derive(Debug)]
    struct HookThread {
        thread_id: u32,
        join: JoinHandle<()>,
    }

    #[derive(Debug, Default)]
    pub struct WindowsHookBackend {
        hook_thread: Option<HookThread>,
        channel: Option<HookChannel>,
    }

    impl HookBackend for WindowsHookBackend {
        fn install(
            &mut self,
            channel: HookChannel,
            sink: EventSink,
        ) -> Result<(), HookInstallError> {
            if self.hook_thread.is_some() {
                return Ok(());
            }

            // Put the sink where the hook proc can see it before the hook
            // goes live.
            if let Ok(mut guard) = sink_slot(channel).lock() {
                *guard = Some(sink);
            }

            use windows::Win32::System::LibraryLoader::GetModuleHandleW;
            use windows::Win32::System::Threading::GetCurrentThreadId;
            use windows::Win32::UI::WindowsAndMessaging::{
                DispatchMessageW, GetMessageW, PeekMessageW, SetWindowsHookExW, TranslateMessage,
                UnhookWindowsHookEx, MSG, PM_NOREMOVE, WH_KEYBOARD_LL, WH_MOUSE_LL,
            };

            // Handshake so install() only returns once the hook is actually
            // registered on its thread.
            let (ready_tx, ready_rx) =
                std::sync::mpsc::sync_channel::<Result<u32, HookInstallError>>(1);

            let join = std::thread::spawn(move || {
                // Ensure the thread has a message queue.
                let mut msg = MSG::default();
                unsafe {
                    let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
                }

                let thread_id = unsafe { GetCurrentThreadId() };
                let hmodule = match unsafe { GetModuleHandleW(None) } {
                    Ok(h) => h,
                    Err(err) => {
                        let _ = ready_tx.send(Err(HookInstallError::Refused(err.to_string())));
                        return;
                    }
                };

                type HookProc = unsafe extern "system" fn(
                    i32,
                    windows::Win32::Foundation::WPARAM,
                    windows::Win32::Foundation::LPARAM,
                )
                    -> windows::Win32::Foundation::LRESULT;
                let (hook_id, proc) = match channel {
                    HookChannel::Keyboard => (WH_KEYBOARD_LL, keyboard_hook_proc as HookProc),
                    HookChannel::Mouse => (WH_MOUSE_LL, mouse_hook_proc as HookProc),
                };

                let hook = match unsafe { SetWindowsHookExW(hook_id, Some(proc), hmodule, 0) } {
                    Ok(h) if !h.0.is_null() => h,
                    Ok(_) => {
                        let _ = ready_tx.send(Err(HookInstallError::Refused(
                            windows::core::Error::from_win32().to_string(),
                        )));
                        return;
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(HookInstallError::Refused(err.to_string())));
                        return;
                    }
                };

                let _ = ready_tx.send(Ok(thread_id));

                // Message loop keeps the low-level callbacks flowing.
                loop {
                    let r = unsafe { GetMessageW(&mut msg, None, 0, 0) };
                    if r.0 <= 0 {
                        break;
                    }
                    unsafe {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }

                unsafe {
                    let _ = UnhookWindowsHookEx(hook);
                }
            });

            let ready = ready_rx
                .recv_timeout(Duration::from_secs(2))
                .map_err(|_| HookInstallError::NotReady)
                .and_then(|result| result);
            let thread_id = match ready {
                Ok(thread_id) => thread_id,
                Err(err) => {
                    if let Ok(mut guard) = sink_slot(channel).lock() {
                        *guard = None;
                    }
                    return Err(err);
                }
            };

            self.hook_thread = Some(HookThread { thread_id, join });
            self.channel = Some(channel);
            Ok(())
        }

        fn uninstall(&mut self) {
            // Clear the sink first so an in-flight delivery finds nothing to
            // call, then quit and join the hook thread. The join runs off the
            // hook thread, so it cannot wait on a callback it itself invoked.
            if let Some(channel) = self.channel.take() {
                if let Ok(mut guard) = sink_slot(channel).lock() {
                    *guard = None;
                }
            }

            if let Some(th) = self.hook_thread.take() {
                use windows::Win32::Foundation::{LPARAM, WPARAM};
                use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};
                unsafe {
                    let _ = PostThreadMessageW(th.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
                }
                let _ = th.join.join();
            }
        }

        fn is_installed(&self) -> bool {
            self.hook_thread.is_some()
        }
    }

    fn deliver(channel: HookChannel, event: InputEvent) {
        // try_lock keeps the hook proc from ever blocking on the installer.
        if let Ok(guard) = sink_slot(channel).try_lock() {
            if let Some(sink) = guard.as_ref() {
                sink(event);
            }
        }
    }

    unsafe extern "system" fn keyboard_hook_proc(
        n_code: i32,
        w_param: windows::Win32::Foundation::WPARAM,
        l_param: windows::Win32::Foundation::LPARAM,
    ) -> windows::Win32::Foundation::LRESULT {
        use windows::Win32::UI::WindowsAndMessaging::{
            CallNextHookEx, HC_ACTION, KBDLLHOOKSTRUCT, KBDLLHOOKSTRUCT_FLAGS, WM_KEYDOWN,
            WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
        };

        if n_code == HC_ACTION as i32 {
            let msg = w_param.0 as u32;
            let info = unsafe { &*(l_param.0 as *const KBDLLHOOKSTRUCT) };
            let injected = (info.flags & KBDLLHOOKSTRUCT_FLAGS(0x10)) != KBDLLHOOKSTRUCT_FLAGS(0);
            if !injected {
                if let Some(key) = map_vk_to_key(info.vkCode) {
                    if msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN {
                        deliver(HookChannel::Keyboard, InputEvent::KeyDown(key));
                    } else if msg == WM_KEYUP || msg == WM_SYSKEYUP {
                        deliver(HookChannel::Keyboard, InputEvent::KeyUp(key));
                    }
                }
            }
        }

        // Observation only: the event always continues down the hook chain.
        CallNextHookEx(
            windows::Win32::UI::WindowsAndMessaging::HHOOK(std::ptr::null_mut()),
            n_code,
            w_param,
            l_param,
        )
    }

    unsafe extern "system" fn mouse_hook_proc(
        n_code: i32,
        w_param: windows::Win32::Foundation::WPARAM,
        l_param: windows::Win32::Foundation::LPARAM,
    ) -> windows::Win32::Foundation::LRESULT {
        use windows::Win32::UI::WindowsAndMessaging::{
            CallNextHookEx, HC_ACTION, MSLLHOOKSTRUCT, WM_LBUTTONDOWN, WM_LBUTTONUP,
            WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_RBUTTONDOWN,
            WM_RBUTTONUP,
        };

        if n_code == HC_ACTION as i32 {
            let msg = w_param.0 as u32;
            let info = unsafe { &*(l_param.0 as *const MSLLHOOKSTRUCT) };

            // Flags: 0x1 = LLMHF_INJECTED, 0x2 = LLMHF_LOWER_IL_INJECTED.
            let injected = (info.flags & 0x1) != 0 || (info.flags & 0x2) != 0;
            if !injected {
                let event = match msg {
                    m if m == WM_LBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Left)),
                    m if m == WM_LBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Left)),
                    m if m == WM_RBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Right)),
                    m if m == WM_RBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Right)),
                    m if m == WM_MBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Middle)),
                    m if m == WM_MBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Middle)),
                    m if m == WM_MOUSEWHEEL => {
                        // mouseData high word is the signed wheel delta; only
                        // the sign matters here.
                        let delta = ((info.mouseData >> 16) & 0xFFFF) as i16;
                        if delta > 0 {
                            Some(InputEvent::Wheel(WheelDirection::Up))
                        } else if delta < 0 {
                            Some(InputEvent::Wheel(WheelDirection::Down))
                        } else {
                            None
                        }
                    }
                    m if m == WM_MOUSEMOVE => Some(InputEvent::PointerMoved),
                    _ => None,
                };
                if let Some(event) = event {
                    deliver(HookChannel::Mouse, event);
                }
            }
        }

        CallNextHookEx(
            windows::Win32::UI::WindowsAndMessaging::HHOOK(std::ptr::null_mut()),
            n_code,
            w_param,
            l_param,
        )
    }

    fn map_vk_to_key(vk_code: u32) -> Option<Key> {
        let vk = VIRTUAL_KEY(vk_code as u16);
        let key = match vk {
            k if k == VK_ESCAPE => Key::Escape,
            k if k == VK_F1 => Key::F1,
            k if k == VK_F2 => Key::F2,
            k if k == VK_F3 => Key::F3,
            k if k == VK_F4 => Key::F4,
            k if k == VK_F5 => Key::F5,
            k if k == VK_F6 => Key::F6,
            k if k == VK_F7 => Key::F7,
            k if k == VK_F8 => Key::F8,
            k if k == VK_F9 => Key::F9,
            k if k == VK_F10 => Key::F10,
            k if k == VK_F11 => Key::F11,
            k if k == VK_F12 => Key::F12,
            k if k == VK_SNAPSHOT => Key::PrintScreen,
            k if k == VK_OEM_3 => Key::Grave,
            k if k == VK_1 => Key::Num1,
            k if k == VK_2 => Key::Num2,
            k if k == VK_3 => Key::Num3,
            k if k == VK_4 => Key::Num4,
            k if k == VK_5 => Key::Num5,
            k if k == VK_6 => Key::Num6,
            k if k == VK_7 => Key::Num7,
            k if k == VK_8 => Key::Num8,
            k if k == VK_9 => Key::Num9,
            k if k == VK_0 => Key::Num0,
            k if k == VK_OEM_MINUS => Key::Minus,
            k if k == VK_OEM_PLUS => Key::Equal,
            k if k == VK_BACK => Key::Backspace,
            k if k == VK_INSERT => Key::Insert,
            k if k == VK_HOME => Key::Home,
            k if k == VK_PRIOR => Key::PageUp,
            k if k == VK_TAB => Key::Tab,
            k if k == VK_Q => Key::Q,
            k if k == VK_W => Key::W,
            k if k == VK_E => Key::E,
            k if k == VK_R => Key::R,
            k if k == VK_T => Key::T,
            k if k == VK_Y => Key::Y,
            k if k == VK_U => Key::U,
            k if k == VK_I => Key::I,
            k if k == VK_O => Key::O,
            k if k == VK_P => Key::P,
            k if k == VK_OEM_4 => Key::LeftBracket,
            k if k == VK_OEM_6 => Key::RightBracket,
            k if k == VK_OEM_5 => Key::Backslash,
            k if k == VK_DELETE => Key::Delete,
            k if k == VK_END => Key::End,
            k if k == VK_NEXT => Key::PageDown,
            k if k == VK_CAPITAL => Key::CapsLock,
            k if k == VK_A => Key::A,
            k if k == VK_S => Key::S,
            k if k == VK_D => Key::D,
            k if k == VK_F => Key::F,
            k if k == VK_G => Key::G,
            k if k == VK_H => Key::H,
            k if k == VK_J => Key::J,
            k if k == VK_K => Key::K,
            k if k == VK_L => Key::L,
            k if k == VK_OEM_1 => Key::Semicolon,
            k if k == VK_OEM_7 => Key::Quote,
            k if k == VK_RETURN => Key::Enter,
            k if k == VK_LSHIFT => Key::ShiftLeft,
            k if k == VK_Z => Key::Z,
            k if k == VK_X => Key::X,
            k if k == VK_C => Key::C,
            k if k == VK_V => Key::V,
            k if k == VK_B => Key::B,
            k if k == VK_N => Key::N,
            k if k == VK_M => Key::M,
            k if k == VK_OEM_COMMA => Key::Comma,
            k if k == VK_OEM_PERIOD => Key::Period,
            k if k == VK_OEM_2 => Key::Slash,
            k if k == VK_RSHIFT => Key::ShiftRight,
            k if k == VK_UP => Key::ArrowUp,
            k if k == VK_DOWN => Key::ArrowDown,
            k if k == VK_LEFT => Key::ArrowLeft,
            k if k == VK_RIGHT => Key::ArrowRight,
            k if k == VK_LCONTROL => Key::ControlLeft,
            k if k == VK_RCONTROL => Key::ControlRight,
            k if k == VK_LWIN => Key::SuperLeft,
            k if k == VK_RWIN => Key::SuperRight,
            k if k == VK_LMENU => Key::AltLeft,
            k if k == VK_RMENU => Key::AltRight,
            k if k == VK_SPACE => Key::Space,
            k if k == VK_APPS => Key::Menu,
            k if k == VK_NUMPAD0 => Key::Numpad0,
            k if k == VK_NUMPAD1 => Key::Numpad1,
            k if k == VK_NUMPAD2 => Key::Numpad2,
            k if k == VK_NUMPAD3 => Key::Numpad3,
            k if k == VK_NUMPAD4 => Key::Numpad4,
            k if k == VK_NUMPAD5 => Key::Numpad5,
            k if k == VK_NUMPAD6 => Key::Numpad6,
            k if k == VK_NUMPAD7 => Key::Numpad7,
            k if k == VK_NUMPAD8 => Key::Numpad8,
            k if k == VK_NUMPAD9 => Key::Numpad9,
            k if k == VK_ADD => Key::NumpadAdd,
            k if k == VK_SUBTRACT => Key::NumpadSubtract,
            k if k == VK_MULTIPLY => Key::NumpadMultiply,
            k if k == VK_DIVIDE => Key::NumpadDivide,
            k if k == VK_DECIMAL => Key::NumpadDecimal,
            k if k == VK_NUMLOCK => Key::NumLock,
            k if k == VK_SCROLL => Key::ScrollLock,
            k if k == VK_PAUSE => Key::PauseBreak,
            _ => return None,
        };
        Some(key)
    }

    #[cfg(test)]
    mod windows_tests {
        use super::*;

        #[test]
        fn vk_mapping_covers_letters_and_drops_unknown_codes() {
            assert_eq!(map_vk_to_key(VK_A.0 as u32), Some(Key::A));
            assert_eq!(map_vk_to_key(VK_SPACE.0 as u32), Some(Key::Space));
            assert_eq!(map_vk_to_key(VK_LSHIFT.0 as u32), Some(Key::ShiftLeft));
            assert_eq!(map_vk_to_key(0xFF), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_backend_counts_each_lifecycle_transition_once() {
        let (backend, handle) = MockHookBackend::new();
        let mut hook = InputHook::with_backend(HookChannel::Keyboard, Box::new(backend));

        let sink: EventSink = Arc::new(|_| {});
        hook.install(Arc::clone(&sink)).expect("mock install");
        hook.install(sink).expect("mock install is idempotent");
        assert_eq!(handle.install_count(), 1);
        assert!(hook.is_installed());

        hook.uninstall();
        hook.uninstall();
        assert_eq!(handle.uninstall_count(), 1);
        assert!(!hook.is_installed());
    }

    #[test]
    fn emit_fails_once_the_hook_is_gone() {
        let (backend, handle) = MockHookBackend::new();
        let mut hook = InputHook::with_backend(HookChannel::Mouse, Box::new(backend));
        hook.install(Arc::new(|_| {})).expect("mock install");
        assert!(handle.emit(InputEvent::PointerMoved));

        drop(hook);
        assert!(!handle.emit(InputEvent::PointerMoved));
        assert_eq!(handle.uninstall_count(), 1);
    }

    #[test]
    fn unsupported_backend_refuses_install() {
        let mut hook = InputHook::with_backend(
            HookChannel::Keyboard,
            Box::new(UnsupportedHookBackend),
        );
        let err = hook.install(Arc::new(|_| {})).unwrap_err();
        assert!(matches!(err, HookInstallError::Unsupported));
        assert!(!hook.is_installed());
    }
}
