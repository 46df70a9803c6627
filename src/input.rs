//! Button input sampler
//!
//! [`PinInput`] binds ten logical [`Button`]s to GPIO lines and reads them all
//! on every [`Controller::get_frame`] call. Lines are pulled up and the
//! buttons short them to ground, so a low level reads as pressed.
//!
//! Sampling is stateless: no debouncing, no edge detection. Callers that need
//! press/release events compare consecutive [`KeyStatus`] frames.
//!
//! ## Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, InputPin};
//! use pico_lcd::{board, Button, Controller, PinFactory, PinInput};
//!
//! struct BoardPin(u8);
//! impl ErrorType for BoardPin { type Error = Infallible; }
//! impl InputPin for BoardPin {
//!     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(self.0 != board::KEY_A) }
//!     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(self.0 == board::KEY_A) }
//! }
//!
//! struct Board;
//! impl PinFactory for Board {
//!     type Error = Infallible;
//!     type Pin = BoardPin;
//!     fn pull_up_input(&mut self, line: u8) -> Result<BoardPin, Infallible> { Ok(BoardPin(line)) }
//! }
//!
//! let mut input = match PinInput::new(&board::KEY_MAPPING, &mut Board) {
//!     Ok(input) => input,
//!     Err(_) => return,
//! };
//! let frame = match input.get_frame() {
//!     Ok(frame) => frame,
//!     Err(_) => return,
//! };
//! assert!(frame.get(Button::Settings));
//! assert!(!frame.up);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::InputPin;

use crate::error::{ArgumentError, InputError};

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Navigate up
    Up,
    /// Navigate down
    Down,
    /// Navigate left
    Left,
    /// Navigate right
    Right,
    /// Confirm
    Select,
    /// Back out
    Cancel,
    /// Unlock the device
    Unlock,
    /// Open settings
    Settings,
    /// Toggle wifi
    Wifi,
    /// Put the device to sleep
    Sleep,
}

impl Button {
    /// Every button, in [`KeyStatus`] field order
    pub const ALL: [Button; 10] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Select,
        Button::Cancel,
        Button::Unlock,
        Button::Settings,
        Button::Wifi,
        Button::Sleep,
    ];

    /// Whether the button must be wired to a line
    ///
    /// Settings, Wifi and Sleep are optional.
    pub const fn is_mandatory(self) -> bool {
        !matches!(self, Button::Settings | Button::Wifi | Button::Sleep)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// GPIO line number for each button, 0 for a button that is not wired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMapping {
    /// Up line
    pub up: u8,
    /// Down line
    pub down: u8,
    /// Left line
    pub left: u8,
    /// Right line
    pub right: u8,
    /// Select line
    pub select: u8,
    /// Cancel line
    pub cancel: u8,
    /// Unlock line
    pub unlock: u8,
    /// Settings line (optional)
    pub settings: u8,
    /// Wifi toggle line (optional)
    pub wifi: u8,
    /// Sleep line (optional)
    pub sleep: u8,
}

impl KeyMapping {
    /// Line bound to `button`, 0 if unwired
    pub fn line(&self, button: Button) -> u8 {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Select => self.select,
            Button::Cancel => self.cancel,
            Button::Unlock => self.unlock,
            Button::Settings => self.settings,
            Button::Wifi => self.wifi,
            Button::Sleep => self.sleep,
        }
    }

    /// Check that mandatory buttons are wired and no line is used twice
    ///
    /// # Errors
    ///
    /// - `ArgumentError::MissingButton` for the first unwired mandatory button
    /// - `ArgumentError::DuplicateLine` for the first line bound to two buttons
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if let Some(button) = Button::ALL
            .into_iter()
            .find(|&b| b.is_mandatory() && self.line(b) == 0)
        {
            return Err(ArgumentError::MissingButton(button));
        }
        for (i, &first) in Button::ALL.iter().enumerate() {
            let line = self.line(first);
            if line == 0 {
                continue;
            }
            if let Some(&second) = Button::ALL[i + 1..]
                .iter()
                .find(|&&b| self.line(b) == line)
            {
                return Err(ArgumentError::DuplicateLine {
                    line,
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}

/// Snapshot of every button, `true` while pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStatus {
    /// Up pressed
    pub up: bool,
    /// Down pressed
    pub down: bool,
    /// Left pressed
    pub left: bool,
    /// Right pressed
    pub right: bool,
    /// Select pressed
    pub select: bool,
    /// Cancel pressed
    pub cancel: bool,
    /// Unlock pressed
    pub unlock: bool,
    /// Settings pressed
    pub settings: bool,
    /// Wifi toggle pressed
    pub wifi: bool,
    /// Sleep pressed
    pub sleep: bool,
}

impl KeyStatus {
    /// State of one button
    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Select => self.select,
            Button::Cancel => self.cancel,
            Button::Unlock => self.unlock,
            Button::Settings => self.settings,
            Button::Wifi => self.wifi,
            Button::Sleep => self.sleep,
        }
    }

    /// Whether any button is pressed
    pub fn any_pressed(&self) -> bool {
        Button::ALL.into_iter().any(|b| self.get(b))
    }

    fn field_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Select => &mut self.select,
            Button::Cancel => &mut self.cancel,
            Button::Unlock => &mut self.unlock,
            Button::Settings => &mut self.settings,
            Button::Wifi => &mut self.wifi,
            Button::Sleep => &mut self.sleep,
        }
    }
}

/// A button's line: a wired input or the null line
#[derive(Debug)]
pub enum LogicalPin<P> {
    /// Pulled-up input, low while pressed
    Wired {
        /// GPIO line number
        line: u8,
        /// Input pin
        pin: P,
    },
    /// Not wired, always released
    Null,
}

impl<P: InputPin> LogicalPin<P> {
    /// Whether the button is pressed
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        match self {
            Self::Wired { pin, .. } => pin.is_low(),
            Self::Null => Ok(false),
        }
    }

    /// GPIO line, `None` for the null line
    pub fn line(&self) -> Option<u8> {
        match self {
            Self::Wired { line, .. } => Some(*line),
            Self::Null => None,
        }
    }
}

/// Source of pulled-up input pins, implemented by the board HAL
pub trait PinFactory {
    /// Error raised while configuring a line
    type Error: Debug;
    /// Input pin type
    type Pin: InputPin<Error = Self::Error>;

    /// Configure `line` as an input with its pull-up enabled
    fn pull_up_input(&mut self, line: u8) -> Result<Self::Pin, Self::Error>;
}

/// Provider of input frames
pub trait Controller {
    /// Error raised while sampling
    type Error: Debug;

    /// Sample every button once
    fn get_frame(&mut self) -> Result<KeyStatus, Self::Error>;
}

/// Polling sampler over ten logical pins
#[derive(Debug)]
pub struct PinInput<P> {
    pins: [LogicalPin<P>; 10],
}

impl<P: InputPin> PinInput<P> {
    /// Validate `mapping` and request a pulled-up input for every wired line
    ///
    /// No pin is requested unless the whole mapping is valid.
    ///
    /// # Errors
    ///
    /// - `InputError::InvalidArgument` if the mapping is rejected by
    ///   [`KeyMapping::validate`]
    /// - `InputError::Pin` if the factory fails to configure a line
    pub fn new<F>(mapping: &KeyMapping, factory: &mut F) -> Result<Self, InputError<F::Error>>
    where
        F: PinFactory<Pin = P>,
    {
        mapping.validate()?;
        let mut pins: [LogicalPin<P>; 10] = core::array::from_fn(|_| LogicalPin::Null);
        for button in Button::ALL {
            let line = mapping.line(button);
            if line != 0 {
                let pin = factory.pull_up_input(line).map_err(InputError::Pin)?;
                pins[button.index()] = LogicalPin::Wired { line, pin };
            }
        }
        Ok(Self { pins })
    }

    /// The logical pin bound to `button`
    pub fn pin(&self, button: Button) -> &LogicalPin<P> {
        &self.pins[button.index()]
    }

    /// Release the pins
    pub fn release(self) -> [LogicalPin<P>; 10] {
        self.pins
    }
}

impl<P: InputPin> Controller for PinInput<P> {
    type Error = P::Error;

    fn get_frame(&mut self) -> Result<KeyStatus, Self::Error> {
        let mut status = KeyStatus::default();
        for button in Button::ALL {
            *status.field_mut(button) = self.pins[button.index()].is_pressed()?;
        }
        Ok(status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::board::KEY_MAPPING;
    use crate::error::ErrorKind;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Line levels shared between the fake board and its pins, `true` = high
    type Levels = Rc<RefCell<[bool; 32]>>;

    #[derive(Debug)]
    struct FakePin {
        line: u8,
        levels: Levels,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.levels.borrow()[self.line as usize])
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.levels.borrow()[self.line as usize])
        }
    }

    struct FakeBoard {
        levels: Levels,
        requested: Vec<u8>,
    }

    impl FakeBoard {
        fn new() -> Self {
            Self {
                levels: Rc::new(RefCell::new([true; 32])),
                requested: Vec::new(),
            }
        }

        fn press(&self, line: u8) {
            self.levels.borrow_mut()[line as usize] = false;
        }
    }

    impl PinFactory for FakeBoard {
        type Error = Infallible;
        type Pin = FakePin;

        fn pull_up_input(&mut self, line: u8) -> Result<FakePin, Infallible> {
            self.requested.push(line);
            Ok(FakePin {
                line,
                levels: Rc::clone(&self.levels),
            })
        }
    }

    #[test]
    fn test_released_board_reads_all_zero() {
        let mut board = FakeBoard::new();
        let mut input = PinInput::new(&KEY_MAPPING, &mut board).unwrap();
        let frame = input.get_frame().unwrap();
        assert_eq!(frame, KeyStatus::default());
        assert!(!frame.any_pressed());
    }

    #[test]
    fn test_pressing_up_changes_only_up() {
        let mut board = FakeBoard::new();
        let mut input = PinInput::new(&KEY_MAPPING, &mut board).unwrap();
        let baseline = input.get_frame().unwrap();

        board.press(KEY_MAPPING.up);
        let frame = input.get_frame().unwrap();
        assert_eq!(
            frame,
            KeyStatus {
                up: true,
                ..baseline
            }
        );
        assert!(frame.get(Button::Up));
        assert!(frame.any_pressed());
    }

    #[test]
    fn test_missing_mandatory_button_is_rejected() {
        let mapping = KeyMapping {
            up: 0,
            ..KEY_MAPPING
        };
        let mut board = FakeBoard::new();
        let err = PinInput::new(&mapping, &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(
            err,
            InputError::InvalidArgument(ArgumentError::MissingButton(Button::Up))
        ));
        assert!(board.requested.is_empty());
    }

    #[test]
    fn test_optional_button_reads_released() {
        let mapping = KeyMapping {
            settings: 0,
            ..KEY_MAPPING
        };
        let mut board = FakeBoard::new();
        let mut input = PinInput::new(&mapping, &mut board).unwrap();
        assert!(matches!(input.pin(Button::Settings), LogicalPin::Null));
        assert!(!board.requested.contains(&KEY_MAPPING.settings));

        // Pressing the line settings would have used has no effect
        board.press(KEY_MAPPING.settings);
        assert!(!input.get_frame().unwrap().settings);
    }

    #[test]
    fn test_duplicate_line_is_rejected_in_either_order() {
        let mapping = KeyMapping {
            down: 5,
            up: 5,
            ..KEY_MAPPING
        };
        assert_eq!(
            mapping.validate().unwrap_err(),
            ArgumentError::DuplicateLine {
                line: 5,
                first: Button::Up,
                second: Button::Down
            }
        );

        let mapping = KeyMapping {
            sleep: 5,
            left: 5,
            ..KEY_MAPPING
        };
        let mut board = FakeBoard::new();
        let err = PinInput::new(&mapping, &mut board).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidArgument(ArgumentError::DuplicateLine {
                line: 5,
                first: Button::Left,
                second: Button::Sleep
            })
        ));
        assert!(board.requested.is_empty());
    }

    #[test]
    fn test_unwired_optional_buttons_may_share_zero() {
        let mapping = KeyMapping {
            settings: 0,
            wifi: 0,
            sleep: 0,
            ..KEY_MAPPING
        };
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn test_pins_requested_for_wired_lines_only() {
        let mut board = FakeBoard::new();
        let input = PinInput::new(&KEY_MAPPING, &mut board).unwrap();
        let wired: Vec<u8> = Button::ALL
            .into_iter()
            .map(|b| KEY_MAPPING.line(b))
            .filter(|&line| line != 0)
            .collect();
        assert_eq!(board.requested, wired);
        assert_eq!(input.pin(Button::Up).line(), Some(KEY_MAPPING.up));
    }

    #[test]
    fn test_wired_pin_reads_inverted_level() {
        use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

        let mut mock = Mock::new(&[
            Transaction::get(State::Low),
            Transaction::get(State::High),
        ]);
        let mut pin = LogicalPin::Wired {
            line: 2,
            pin: mock.clone(),
        };
        assert!(pin.is_pressed().unwrap());
        assert!(!pin.is_pressed().unwrap());

        let mut null: LogicalPin<Mock> = LogicalPin::Null;
        assert!(!null.is_pressed().unwrap());
        assert_eq!(null.line(), None);

        mock.done();
    }
}
