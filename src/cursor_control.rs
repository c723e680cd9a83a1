//! Input effector for X11-based systems.
//!
//! Pointer moves use `WarpPointer`; clicks, wheel scrolling and the
//! Alt+Left/Alt+Right navigation shortcuts are injected through XTEST.
//! Failures are logged and dropped: the pipeline never waits on the display.

use crate::{
    constants::X11_PIXELS_PER_WHEEL_STEP,
    effector::InputEffector,
    error::{Error, Result},
    pointer::{ScreenMetrics, ScreenPoint},
    utils::safe_cast::f64_to_i16_clamp,
};
use log::{debug, info, warn};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt as _, Keycode, Window, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, KEY_PRESS_EVENT, KEY_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

const BUTTON_LEFT: u8 = 1;
const BUTTON_WHEEL_UP: u8 = 4;
const BUTTON_WHEEL_DOWN: u8 = 5;
const BUTTON_WHEEL_LEFT: u8 = 6;
const BUTTON_WHEEL_RIGHT: u8 = 7;

const KEYSYM_ALT_L: u32 = 0xffe9;
const KEYSYM_LEFT: u32 = 0xff51;
const KEYSYM_RIGHT: u32 = 0xff53;

/// Keycodes of the navigation shortcut keys on the current keyboard map
#[derive(Debug, Clone, Copy)]
struct NavigationKeys {
    alt: Keycode,
    left: Keycode,
    right: Keycode,
}

/// Input effector backed by an X11 display
pub struct X11Effector {
    connection: RustConnection,
    root: Window,
    screen_width: u16,
    screen_height: u16,
    keys: Option<NavigationKeys>,
    wheel_remainder: (i32, i32),
}

impl X11Effector {
    /// Connect to the display named by `$DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns `Error::X11` if the connection or XTEST setup fails
    pub fn new() -> Result<Self> {
        info!("Initializing X11 input effector");

        let (connection, screen_num) =
            RustConnection::connect(None).map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?;
        let root = screen.root;
        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        connection
            .xtest_get_version(2, 2)
            .map_err(|e| Error::X11(format!("Failed to query XTEST: {e}")))?
            .reply()
            .map_err(|e| Error::X11(format!("XTEST extension unavailable: {e}")))?;

        let keys = match Self::lookup_navigation_keys(&connection) {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Keyboard mapping lookup failed: {e}");
                None
            }
        };
        if keys.is_none() {
            warn!("Alt/Left/Right not found in keyboard map; navigation disabled");
        }

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            root,
            screen_width,
            screen_height,
            keys,
            wheel_remainder: (0, 0),
        })
    }

    /// Get screen dimensions
    #[must_use]
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    fn lookup_navigation_keys(connection: &RustConnection) -> Result<Option<NavigationKeys>> {
        let setup = connection.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let reply = connection
            .get_keyboard_mapping(min, max.saturating_sub(min).saturating_add(1))
            .map_err(|e| Error::X11(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| Error::X11(format!("Failed to get keyboard mapping: {e}")))?;

        let per_keycode = usize::from(reply.keysyms_per_keycode);
        if per_keycode == 0 {
            return Ok(None);
        }
        let find = |keysym: u32| {
            reply
                .keysyms
                .chunks(per_keycode)
                .position(|syms| syms.contains(&keysym))
                .and_then(|offset| u8::try_from(offset).ok())
                .and_then(|offset| min.checked_add(offset))
        };

        Ok(match (find(KEYSYM_ALT_L), find(KEYSYM_LEFT), find(KEYSYM_RIGHT)) {
            (Some(alt), Some(left), Some(right)) => Some(NavigationKeys { alt, left, right }),
            _ => None,
        })
    }

    fn warp(&self, point: ScreenPoint) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = f64_to_i16_clamp(point.x, 0, max_x);
        let y = f64_to_i16_clamp(point.y, 0, max_y);

        self.connection
            .warp_pointer(x11rb::NONE, self.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::X11(format!("Failed to warp pointer: {e}")))?;
        self.flush()
    }

    fn fake(&self, event_type: u8, detail: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(event_type, detail, x11rb::CURRENT_TIME, self.root, 0, 0, 0)
            .map_err(|e| Error::X11(format!("Failed to inject input: {e}")))?;
        Ok(())
    }

    fn press_button(&self, button: u8, times: u32) -> Result<()> {
        for _ in 0..times {
            self.fake(BUTTON_PRESS_EVENT, button)?;
            self.fake(BUTTON_RELEASE_EVENT, button)?;
        }
        self.flush()
    }

    fn chord(&self, modifier: Keycode, key: Keycode) -> Result<()> {
        self.fake(KEY_PRESS_EVENT, modifier)?;
        self.fake(KEY_PRESS_EVENT, key)?;
        self.fake(KEY_RELEASE_EVENT, key)?;
        self.fake(KEY_RELEASE_EVENT, modifier)?;
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| Error::X11(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }

    fn navigate(&self, forward: bool) {
        let Some(keys) = self.keys else {
            debug!("Navigation keys unavailable");
            return;
        };
        let key = if forward { keys.right } else { keys.left };
        if let Err(e) = self.chord(keys.alt, key) {
            warn!("Navigation failed: {e}");
        }
    }
}

/// Accumulate a pixel delta and return the whole wheel notches it yields,
/// keeping the remainder for the next call
fn wheel_steps(remainder: &mut i32, delta: i32) -> i32 {
    let total = remainder.saturating_add(delta);
    let steps = total / X11_PIXELS_PER_WHEEL_STEP;
    *remainder = total - steps * X11_PIXELS_PER_WHEEL_STEP;
    steps
}

impl InputEffector for X11Effector {
    fn move_mouse(&mut self, point: ScreenPoint) {
        if let Err(e) = self.warp(point) {
            warn!("Pointer move failed: {e}");
        }
    }

    fn click(&mut self, point: ScreenPoint) {
        let result = self.warp(point).and_then(|()| self.press_button(BUTTON_LEFT, 1));
        if let Err(e) = result {
            warn!("Click failed: {e}");
        }
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        let vertical = wheel_steps(&mut self.wheel_remainder.1, dy);
        let horizontal = wheel_steps(&mut self.wheel_remainder.0, dx);

        let mut result = Ok(());
        if vertical != 0 {
            let button = if vertical > 0 { BUTTON_WHEEL_UP } else { BUTTON_WHEEL_DOWN };
            result = self.press_button(button, vertical.unsigned_abs());
        }
        if horizontal != 0 && result.is_ok() {
            let button = if horizontal > 0 { BUTTON_WHEEL_RIGHT } else { BUTTON_WHEEL_LEFT };
            result = self.press_button(button, horizontal.unsigned_abs());
        }
        if let Err(e) = result {
            warn!("Scroll failed: {e}");
        }
    }

    fn navigate_back(&mut self) {
        self.navigate(false);
    }

    fn navigate_forward(&mut self) {
        self.navigate(true);
    }

    fn screen_metrics(&self) -> Option<ScreenMetrics> {
        let (width, height) = self.screen_size();
        Some(ScreenMetrics::new(f64::from(width), f64::from(height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_effector_creation() {
        let effector = X11Effector::new();
        assert!(effector.is_ok() || effector.is_err()); // Will fail without X11
    }

    #[test]
    fn test_wheel_steps_accumulate() {
        let mut remainder = 0;
        assert_eq!(wheel_steps(&mut remainder, 50), 0);
        assert_eq!(wheel_steps(&mut remainder, 50), 0);
        assert_eq!(wheel_steps(&mut remainder, 50), 1);
        assert_eq!(remainder, 30);
    }

    #[test]
    fn test_wheel_steps_signed() {
        let mut remainder = 0;
        assert_eq!(wheel_steps(&mut remainder, -250), -2);
        assert_eq!(remainder, -10);
        // Reversal eats the remainder first
        assert_eq!(wheel_steps(&mut remainder, 130), 1);
        assert_eq!(remainder, 0);
    }
}
