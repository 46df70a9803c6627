//! Application contract
//!
//! An [`Application`] is handed the two halves of the board: a
//! [`Controller`] producing input frames and an [`LcdDriver`] producing and
//! showing pixel buffers. [`Display`] is the `LcdDriver` for the ST7789 and
//! [`PinInput`](crate::PinInput) the `Controller` for GPIO buttons.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use embedded_hal::pwm::SetDutyCycle;

use crate::buffer::PixelBuffer;
use crate::color::PixelValue;
use crate::input::Controller;
#[cfg(feature = "alloc")]
use crate::{color::Rgb565, display::Display, error::Error, interface::DisplayInterface};

/// Display capability offered to applications
pub trait LcdDriver {
    /// Color type whose `to_int` matches the active color space
    type Color: PixelValue;
    /// Frame buffer storage
    type Storage: AsRef<[u8]> + AsMut<[u8]>;
    /// Error raised by the driver
    type Error;

    /// Panel width in pixels
    fn width(&self) -> u16;

    /// Panel height in pixels
    fn height(&self) -> u16;

    /// A blank frame buffer matching the panel
    fn make_frame_buffer(&self) -> PixelBuffer<Self::Storage>;

    /// Transfer a frame to the panel
    fn show(&mut self, buffer: &PixelBuffer<Self::Storage>) -> Result<(), Self::Error>;

    /// Enter sleep mode
    fn sleep(&mut self) -> Result<(), Self::Error>;

    /// Leave sleep mode
    fn wake(&mut self) -> Result<(), Self::Error>;

    /// Set, or with `None` re-apply, the backlight brightness
    fn dim(&mut self, brightness: Option<f32>) -> Result<(), Self::Error>;
}

#[cfg(feature = "alloc")]
impl<I, BL> LcdDriver for Display<I, BL>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
{
    type Color = Rgb565;
    type Storage = Vec<u8>;
    type Error = Error<I, BL>;

    fn width(&self) -> u16 {
        self.dimensions().width
    }

    fn height(&self) -> u16 {
        self.dimensions().height
    }

    fn make_frame_buffer(&self) -> PixelBuffer<Vec<u8>> {
        Display::make_frame_buffer(self)
    }

    fn show(&mut self, buffer: &PixelBuffer<Vec<u8>>) -> Result<(), Self::Error> {
        Display::show(self, buffer)
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        Display::sleep(self)
    }

    fn wake(&mut self) -> Result<(), Self::Error> {
        Display::wake(self)
    }

    fn dim(&mut self, brightness: Option<f32>) -> Result<(), Self::Error> {
        Display::dim(self, brightness)
    }
}

/// How an application run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnCode {
    /// Completed
    Ok,
    /// Failed
    Error,
    /// Abandoned by the user
    Cancel,
}

/// Result of [`Application::run`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationReturn<T> {
    /// How the run ended
    pub code: ReturnCode,
    /// Value produced by the run, if any
    pub value: Option<T>,
}

impl<T> ApplicationReturn<T> {
    /// Completed with `value`
    pub fn ok(value: T) -> Self {
        Self {
            code: ReturnCode::Ok,
            value: Some(value),
        }
    }

    /// Failed without a value
    pub fn error() -> Self {
        Self {
            code: ReturnCode::Error,
            value: None,
        }
    }

    /// Cancelled without a value
    pub fn cancel() -> Self {
        Self {
            code: ReturnCode::Cancel,
            value: None,
        }
    }
}

/// A screen-owning application
pub trait Application {
    /// Value returned on success
    type Output;

    /// Run until the application finishes
    fn run<C, D>(&mut self, inputs: &mut C, display: &mut D) -> ApplicationReturn<Self::Output>
    where
        C: Controller,
        D: LcdDriver;

    /// Called after the device wakes up
    fn wake(&mut self) {}

    /// Called before the device goes to sleep
    fn sleep(&mut self) {}
}

#[cfg(all(test, feature = "alloc"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::color::Color;
    use crate::command::MEMORY_WRITE;
    use crate::display::tests::test_display;
    use crate::input::KeyStatus;
    use core::convert::Infallible;

    /// Replays a fixed list of frames, then reports nothing pressed
    struct Script {
        frames: Vec<KeyStatus>,
    }

    impl Controller for Script {
        type Error = Infallible;

        fn get_frame(&mut self) -> Result<KeyStatus, Self::Error> {
            Ok(if self.frames.is_empty() {
                KeyStatus::default()
            } else {
                self.frames.remove(0)
            })
        }
    }

    /// Fills the screen until select or cancel is pressed, counting frames
    struct Fill {
        color: Color,
        woken: bool,
    }

    impl Application for Fill {
        type Output = usize;

        fn run<C, D>(&mut self, inputs: &mut C, display: &mut D) -> ApplicationReturn<usize>
        where
            C: Controller,
            D: LcdDriver,
        {
            let value = D::Color::from(self.color).to_int() as u16;
            let mut frames = 0;
            loop {
                let Ok(keys) = inputs.get_frame() else {
                    return ApplicationReturn::error();
                };
                if keys.cancel {
                    return ApplicationReturn::cancel();
                }
                let mut buffer = display.make_frame_buffer();
                buffer.fill(value);
                if display.show(&buffer).is_err() {
                    return ApplicationReturn::error();
                }
                frames += 1;
                if keys.select {
                    return ApplicationReturn::ok(frames);
                }
            }
        }

        fn wake(&mut self) {
            self.woken = true;
        }
    }

    #[test]
    fn test_display_satisfies_driver_contract() {
        let mut display = test_display();
        assert_eq!(LcdDriver::width(&display), 240);
        assert_eq!(LcdDriver::height(&display), 240);
        LcdDriver::dim(&mut display, Some(0.25)).unwrap();
        LcdDriver::sleep(&mut display).unwrap();
        LcdDriver::wake(&mut display).unwrap();
        assert_eq!(display.brightness_duty(), 16384);
    }

    #[test]
    fn test_application_draws_with_driver_color() {
        let mut display = test_display();
        let mut inputs = Script {
            frames: vec![
                KeyStatus::default(),
                KeyStatus {
                    select: true,
                    ..KeyStatus::default()
                },
            ],
        };
        let mut app = Fill {
            color: Color::new(255, 0, 0),
            woken: false,
        };

        let result = app.run(&mut inputs, &mut display);
        assert_eq!(result, ApplicationReturn::ok(2));

        let (interface, _) = display.release();
        let (opcode, pixels) = interface.command_data.last().unwrap();
        assert_eq!(*opcode, MEMORY_WRITE);
        assert_eq!(&pixels[..4], &[0xF8, 0x00, 0xF8, 0x00]);
    }

    #[test]
    fn test_application_cancel_and_hooks() {
        let mut display = test_display();
        let mut inputs = Script {
            frames: vec![KeyStatus {
                cancel: true,
                ..KeyStatus::default()
            }],
        };
        let mut app = Fill {
            color: Color::new(0, 0, 0),
            woken: false,
        };

        let result = app.run(&mut inputs, &mut display);
        assert_eq!(result.code, ReturnCode::Cancel);
        assert_eq!(result.value, None);

        app.sleep();
        app.wake();
        assert!(app.woken);
    }
}
